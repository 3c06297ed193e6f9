//! Loading and merging of field definition documents.
//!
//! Inputs are files or directories. Directories are scanned (not
//! recursively) for `*.yml` and `*.yaml` documents in file name order and
//! expanded in place, so the caller's input order decides which document is
//! loaded last.
//!
//! ```no_run
//! use fieldgen_loader::DefinitionSet;
//!
//! let set = DefinitionSet::load(["schemas/"]).unwrap();
//! for key in set.keys() {
//!     println!("{key}");
//! }
//! ```
//!
//! When two documents define the same top-level key, the later document
//! replaces the earlier entry as a whole. Nested fields are not merged.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use fieldgen_core::{Definition, Definitions, Schema, TypeTable};
use tracing::{debug, info};

use crate::error::{LoadError, Result};

const DOCUMENT_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Merged definitions from one or more documents.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Definitions,
    sources: Vec<PathBuf>,
}

impl DefinitionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every document named by `inputs`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoInputs`] for an empty input list, or the first
    /// access, read or decode failure with the offending path.
    pub fn load<I, P>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let inputs: Vec<PathBuf> = inputs
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        let files = collect_definition_paths(&inputs)?;

        let mut set = Self::new();
        for file in &files {
            set.merge_document(file)?;
        }

        info!(
            documents = set.sources.len(),
            definitions = set.definitions.len(),
            "Loaded field definitions"
        );
        Ok(set)
    }

    /// Loads a single document and merges it over the current entries.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] or [`LoadError::Decode`] for `path`.
    pub fn merge_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = load_document(path)?;
        self.merge(document);
        self.sources.push(path.to_path_buf());
        Ok(())
    }

    /// Merges `document` over the current entries, replacing same-named
    /// top-level keys.
    pub fn merge(&mut self, document: Definitions) {
        for (key, def) in document {
            if self.definitions.insert(key.clone(), def).is_some() {
                debug!(key = %key, "Replaced definition from earlier document");
            }
        }
    }

    /// Looks up a top-level definition.
    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.definitions.get(key)
    }

    /// Returns `true` if a top-level definition named `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    /// Returns the number of top-level definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no definitions were loaded.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns an iterator over top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    /// Returns the merged definitions.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Documents loaded so far, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Assembles the merged definitions into a [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Schema`] if assembly fails.
    pub fn assemble(
        &self,
        version: &str,
        exclude: &BTreeSet<String>,
        table: &TypeTable,
    ) -> Result<Schema> {
        Ok(fieldgen_core::assemble(
            version,
            &self.definitions,
            exclude,
            table,
        )?)
    }
}

/// Expands `inputs` into the list of definition documents to load.
///
/// Files are taken as given. Directories contribute their `*.yml` and
/// `*.yaml` entries sorted by name.
///
/// # Errors
///
/// Returns [`LoadError::NoInputs`] if `inputs` is empty,
/// [`LoadError::Access`] for paths that cannot be inspected, or
/// [`LoadError::ReadDir`] if a directory cannot be listed.
pub fn collect_definition_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(LoadError::NoInputs);
    }

    let mut files = Vec::new();
    for input in inputs {
        let meta = fs::metadata(input).map_err(|source| LoadError::Access {
            path: input.clone(),
            source,
        })?;

        if !meta.is_dir() {
            files.push(input.clone());
            continue;
        }

        let read_dir_err = |source| LoadError::ReadDir {
            path: input.clone(),
            source,
        };
        let mut local = Vec::new();
        for entry in fs::read_dir(input).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if is_document(&path) {
                local.push(path);
            }
        }
        local.sort();
        debug!(dir = %input.display(), documents = local.len(), "Scanned directory");
        files.extend(local);
    }

    Ok(files)
}

fn is_document(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Reads and decodes one definition document.
///
/// Definitions without a `name` take their mapping key. An empty document
/// yields no definitions.
///
/// # Errors
///
/// Returns [`LoadError::Read`] or [`LoadError::Decode`] naming `path`.
pub fn load_document(path: impl AsRef<Path>) -> Result<Definitions> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut defs = if raw.trim().is_empty() {
        Definitions::new()
    } else {
        serde_yaml::from_str::<Option<Definitions>>(&raw)
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .unwrap_or_default()
    };

    fill_names(&mut defs);
    debug!(file = %path.display(), definitions = defs.len(), "Decoded document");
    Ok(defs)
}

// `name` is informational: assembly keys everything by mapping key, so this
// only keeps decoded documents self-describing for callers of `get`.
fn fill_names(defs: &mut Definitions) {
    for (key, def) in defs.iter_mut() {
        if def.name.is_empty() {
            def.name = key.clone();
        }
        fill_names(&mut def.fields);
    }
}

/// Loads `inputs` and assembles them into a [`Schema`] in one step.
///
/// # Errors
///
/// Returns any loading error, or [`LoadError::Schema`] if assembly fails.
pub fn load_schema<I, P>(
    version: &str,
    inputs: I,
    exclude: &BTreeSet<String>,
    table: &TypeTable,
) -> Result<Schema>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    DefinitionSet::load(inputs)?.assemble(version, exclude, table)
}
