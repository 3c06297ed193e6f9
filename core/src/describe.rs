//! Copies documentation from the nested definitions onto built nodes.

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::path::{join_path, normalize_path};
use crate::schema::Schema;
use crate::types::Definitions;

/// Applies the descriptions in `defs` (rooted at `prefix`) to `schema`.
///
/// This pass never adds or removes nodes. Group descriptions land on the
/// namespace at the same normalized path and field descriptions on the value.
/// Values that were excluded or never built are skipped. Groups without any
/// surviving field below them are skipped as well.
///
/// # Errors
///
/// Returns [`SchemaError::MissingNamespace`] if a described group still has
/// values below it but no namespace, which means the schema was not built
/// from the same definitions.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use fieldgen_core::*;
///
/// let mut defs = Definitions::new();
/// defs.insert(
///     "process".into(),
///     Definition::group()
///         .with_description("Process fields.")
///         .with_field("pid", Definition::field("integer").with_description("Process id.")),
/// );
///
/// let flat = flatten("", &defs, &TypeTable::default()).unwrap();
/// let mut schema = build_schema("1.0.0", &flat, &BTreeSet::new());
/// apply_descriptions(&mut schema, "", &defs).unwrap();
///
/// assert_eq!(schema.namespace("process").unwrap().description, "Process fields.");
/// assert_eq!(schema.value_at("process.pid").unwrap().description, "Process id.");
/// ```
pub fn apply_descriptions(schema: &mut Schema, prefix: &str, defs: &Definitions) -> Result<()> {
    for (key, def) in defs {
        let full_path = join_path(prefix, key);
        let path = normalize_path(&full_path);

        if !path.is_empty() && !def.description.is_empty() {
            if def.is_group() {
                if !schema.has_values_under(path) {
                    debug!(namespace = path, "Skipped description of empty group");
                } else {
                    let ns = schema
                        .namespace_mut(path)
                        .ok_or_else(|| SchemaError::MissingNamespace(path.to_string()))?;
                    ns.description = def.description.clone();
                }
            } else if let Some(value) = schema.value_mut(path) {
                value.description = def.description.clone();
            } else {
                debug!(field = path, "Skipped description of absent field");
            }
        }

        apply_descriptions(schema, &full_path, &def.fields)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{Definition, TypeTable, build_schema, flatten};

    fn sample() -> Definitions {
        let mut defs = Definitions::new();
        defs.insert(
            "base".into(),
            Definition::group()
                .with_description("Root fields.")
                .with_field(
                    "message",
                    Definition::field("text").with_description("Log message."),
                ),
        );
        defs.insert(
            "host".into(),
            Definition::group()
                .with_description("Host fields.")
                .with_field(
                    "os",
                    Definition::group()
                        .with_description("OS fields.")
                        .with_field(
                            "name",
                            Definition::field("keyword").with_description("OS name.\nLong form."),
                        ),
                )
                .with_field("hostname", Definition::field("keyword")),
        );
        defs
    }

    fn assemble(defs: &Definitions, exclude: &[&str]) -> Schema {
        let flat = flatten("", defs, &TypeTable::default()).unwrap();
        let exclude: BTreeSet<String> = exclude.iter().map(|s| s.to_string()).collect();
        build_schema("1", &flat, &exclude)
    }

    #[test]
    fn test_descriptions_land_on_matching_nodes() {
        let defs = sample();
        let mut schema = assemble(&defs, &[]);
        apply_descriptions(&mut schema, "", &defs).unwrap();

        assert_eq!(schema.namespace("host").unwrap().description, "Host fields.");
        assert_eq!(schema.namespace("host.os").unwrap().description, "OS fields.");
        assert_eq!(
            schema.value_at("host.os.name").unwrap().description,
            "OS name.\nLong form."
        );
        assert_eq!(schema.base_value("message").unwrap().description, "Log message.");
        assert_eq!(schema.value_at("host.hostname").unwrap().description, "");
    }

    #[test]
    fn test_node_counts_unchanged() {
        let defs = sample();
        let mut schema = assemble(&defs, &[]);
        let before = (schema.namespaces().len(), schema.values().len());
        apply_descriptions(&mut schema, "", &defs).unwrap();
        assert_eq!(before, (schema.namespaces().len(), schema.values().len()));
    }

    #[test]
    fn test_excluded_field_is_skipped() {
        let defs = sample();
        let mut schema = assemble(&defs, &["message"]);
        apply_descriptions(&mut schema, "", &defs).unwrap();
        assert!(schema.value_at("message").is_none());
    }

    #[test]
    fn test_fully_excluded_group_is_skipped() {
        let defs = sample();
        let mut schema = assemble(&defs, &["host.os.name"]);
        apply_descriptions(&mut schema, "", &defs).unwrap();
        assert!(schema.namespace("host.os").is_none());
        assert_eq!(schema.namespace("host").unwrap().description, "Host fields.");
    }

    #[test]
    fn test_flat_group_key_matches_nested_namespace() {
        let defs = sample();
        let mut schema = assemble(&defs, &[]);

        let mut other = Definitions::new();
        other.insert(
            "host.os".into(),
            Definition::group()
                .with_description("Flat group key.")
                .with_field("name", Definition::field("keyword")),
        );
        apply_descriptions(&mut schema, "", &other).unwrap();
        assert_eq!(schema.namespace("host.os").unwrap().description, "Flat group key.");
    }

    #[test]
    fn test_missing_namespace_is_an_error() {
        let mut schema = Schema::new("1");
        schema.insert_detached_value("ghost.field");

        let mut defs = Definitions::new();
        defs.insert(
            "ghost".into(),
            Definition::group()
                .with_description("Never built.")
                .with_field("field", Definition::field("keyword")),
        );
        assert_eq!(
            apply_descriptions(&mut schema, "", &defs),
            Err(SchemaError::MissingNamespace("ghost".into()))
        );
    }
}
