//! Field definition flattening and schema assembly for code generators.
//!
//! This crate turns nested field definitions into a normalized tree of
//! namespaces and typed values:
//!
//! - [`TypeTable`]: maps type keywords to [`TypeDescriptor`]s.
//! - [`flatten`]: walks nested [`Definitions`] and produces dotted paths
//!   with resolved types. Groups only contribute path prefixes.
//! - [`build_schema`]: links flattened fields into a [`Schema`], creating
//!   each namespace once and honoring the `base` root prefix and exclusions.
//! - [`apply_descriptions`]: copies documentation from the original
//!   definitions onto the built nodes.
//! - [`SchemaView`]: serializable view for templates, together with the
//!   [`type_name`] and [`comment`] naming helpers.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use fieldgen_core::*;
//!
//! let mut defs = Definitions::new();
//! defs.insert(
//!     "base".into(),
//!     Definition::group().with_field("message", Definition::field("text")),
//! );
//! defs.insert(
//!     "process".into(),
//!     Definition::group()
//!         .with_description("Process fields.")
//!         .with_field("pid", Definition::field("integer"))
//!         .with_field("name", Definition::field("keyword")),
//! );
//!
//! let schema = assemble("1.0.0", &defs, &BTreeSet::new(), &TypeTable::default()).unwrap();
//! assert!(schema.base_value("message").is_some());
//! assert_eq!(schema.namespace("process").unwrap().values.len(), 2);
//! assert_eq!(type_name("process.pid"), "ProcessPID");
//! ```

mod describe;
mod error;
mod flatten;
mod naming;
mod path;
mod schema;
mod types;
mod view;

use std::collections::BTreeSet;

pub use describe::apply_descriptions;
pub use error::{Result, SchemaError};
pub use flatten::{FlatTypes, flatten};
pub use naming::{
    ABBREVIATIONS, COMMENT_MARKER, COMMENT_WIDTH, comment, comment_with, type_name,
};
pub use path::{join_path, normalize_path, split_path};
pub use schema::{Namespace, NamespaceId, Schema, Value, ValueId, build_schema};
pub use types::{Definition, Definitions, GROUP_TYPE, TypeDescriptor, TypeTable};
pub use view::{NamespaceEntry, NamespaceView, SchemaView, ValueView};

/// Runs flatten, build and description passes over already-merged
/// definitions.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownType`] for unresolvable type keywords.
pub fn assemble(
    version: &str,
    defs: &Definitions,
    exclude: &BTreeSet<String>,
    table: &TypeTable,
) -> Result<Schema> {
    let flat = flatten("", defs, table)?;
    let mut schema = build_schema(version, &flat, exclude);
    apply_descriptions(&mut schema, "", defs)?;
    Ok(schema)
}
