//! Generator configuration file.
//!
//! Everything the command line accepts can also be kept in a YAML file so a
//! project can check in its generator settings.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "8.0.0"
//! package: ecs
//! template: templates/go.tmpl
//! output: ecs/fields.go
//! exclude:
//!   - process.args
//!   - tags
//! types:
//!   scaled_float:
//!     name: float64
//!     constructor: Float64
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use fieldgen_core::{TypeDescriptor, TypeTable};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Package name used when neither the config nor the command line sets one.
pub const DEFAULT_PACKAGE: &str = "ecs";

/// Settings for one generator run.
///
/// All fields are optional so that a config file can hold any subset and the
/// command line can fill in the rest.
///
/// # Examples
///
/// ```
/// use fieldgen_loader::GeneratorConfig;
///
/// let config: GeneratorConfig = serde_yaml::from_str("exclude: [tags]").unwrap();
/// assert!(config.is_excluded("tags"));
/// assert_eq!(config.package_name(), "ecs");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schema version stamped into the generated code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Target package or module name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Template used to render the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Output file (stdout when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Field paths or base field names to leave out.
    pub exclude: Vec<String>,
    /// Extra or replacement type keywords.
    pub types: BTreeMap<String, TypeDescriptor>,
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if the file cannot be read, or
    /// [`LoadError::Config`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Write`] if the file cannot be created, or
    /// [`LoadError::Config`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| LoadError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::to_writer(BufWriter::new(file), self).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the package name, falling back to [`DEFAULT_PACKAGE`].
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    /// Returns `true` if `field` is in the exclusion list.
    pub fn is_excluded(&self, field: &str) -> bool {
        self.exclude.iter().any(|f| f == field)
    }

    /// Returns the exclusion list as a set.
    pub fn exclude_set(&self) -> BTreeSet<String> {
        self.exclude.iter().cloned().collect()
    }

    /// Returns the built-in type table extended with [`types`](Self::types).
    pub fn type_table(&self) -> TypeTable {
        TypeTable::default().with_overrides(self.types.clone())
    }

    /// Overlays `other` onto `self`: set options in `other` win and
    /// exclusions are combined.
    pub fn merge(mut self, other: GeneratorConfig) -> Self {
        self.version = other.version.or(self.version);
        self.package = other.package.or(self.package);
        self.template = other.template.or(self.template);
        self.output = other.output.or(self.output);
        for field in other.exclude {
            if !self.is_excluded(&field) {
                self.exclude.push(field);
            }
        }
        self.types.extend(other.types);
        self
    }
}
