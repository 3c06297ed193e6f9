//! Definition document loading and generator configuration.
//!
//! This crate reads YAML field definition documents from files and
//! directories, merges them into one [`Definitions`] map and hands them to
//! [`fieldgen_core`] for assembly.
//!
//! # Quick start
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use fieldgen_core::TypeTable;
//! use fieldgen_loader::{DefinitionSet, GeneratorConfig};
//!
//! let config = GeneratorConfig::load("fieldgen.yml").unwrap();
//! let set = DefinitionSet::load(["schemas/", "extra/custom.yml"]).unwrap();
//! let schema = set
//!     .assemble("8.0.0", &config.exclude_set(), &config.type_table())
//!     .unwrap();
//! println!("{} namespaces", schema.namespaces().len());
//! ```
//!
//! [`Definitions`]: fieldgen_core::Definitions

mod config;
mod error;
mod loader;

pub use config::{DEFAULT_PACKAGE, GeneratorConfig};
pub use error::{LoadError, Result};
pub use loader::{DefinitionSet, collect_definition_paths, load_document, load_schema};
