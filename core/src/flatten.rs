//! Flattening of nested definitions into dotted field paths.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::path::join_path;
use crate::types::{Definitions, TypeDescriptor, TypeTable};

/// Resolved field types keyed by full dotted path.
pub type FlatTypes = BTreeMap<String, TypeDescriptor>;

/// Flattens `defs` below `prefix` into a map of dotted path to type.
///
/// Groups add their key to the prefix of their children but produce no entry
/// of their own. Any other definition is resolved through `table` and still
/// has its nested `fields` visited.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownType`](crate::SchemaError::UnknownType)
/// for the first field whose type keyword is not in `table`.
///
/// # Examples
///
/// ```
/// use fieldgen_core::{Definition, Definitions, TypeTable, flatten};
///
/// let mut defs = Definitions::new();
/// defs.insert(
///     "process".into(),
///     Definition::group().with_field("pid", Definition::field("integer")),
/// );
///
/// let flat = flatten("", &defs, &TypeTable::default()).unwrap();
/// assert_eq!(flat.len(), 1);
/// assert_eq!(flat["process.pid"].name, "int");
/// ```
pub fn flatten(prefix: &str, defs: &Definitions, table: &TypeTable) -> Result<FlatTypes> {
    let mut flat = FlatTypes::new();
    flatten_into(prefix, defs, table, &mut flat)?;
    debug!(prefix, fields = flat.len(), "Flattened definitions");
    Ok(flat)
}

fn flatten_into(
    prefix: &str,
    defs: &Definitions,
    table: &TypeTable,
    out: &mut FlatTypes,
) -> Result<()> {
    for (key, def) in defs {
        let path = join_path(prefix, key);

        if !def.is_group() {
            let ty = table.resolve(&def.type_name, &path)?;
            out.insert(path.clone(), ty);
        }

        flatten_into(&path, &def.fields, table, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Definition, SchemaError};

    fn defs(entries: Vec<(&str, Definition)>) -> Definitions {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_nested_groups_become_prefixes() {
        let input = defs(vec![(
            "host",
            Definition::group()
                .with_field("name", Definition::field("keyword"))
                .with_field(
                    "os",
                    Definition::group().with_field("family", Definition::field("keyword")),
                ),
        )]);

        let flat = flatten("", &input, &TypeTable::default()).unwrap();
        let paths: Vec<&str> = flat.keys().map(|s| s.as_str()).collect();
        assert_eq!(paths, vec!["host.name", "host.os.family"]);
    }

    #[test]
    fn test_dotted_keys_and_prefix() {
        let input = defs(vec![("agent.ephemeral_id", Definition::field("keyword"))]);
        let flat = flatten("ecs", &input, &TypeTable::default()).unwrap();
        assert!(flat.contains_key("ecs.agent.ephemeral_id"));
    }

    #[test]
    fn test_non_group_children_are_visited() {
        let input = defs(vec![(
            "labels",
            Definition::field("object").with_field("env", Definition::field("keyword")),
        )]);
        let flat = flatten("", &input, &TypeTable::default()).unwrap();
        assert_eq!(flat["labels"].constructor, "Any");
        assert_eq!(flat["labels.env"].constructor, "String");
    }

    #[test]
    fn test_unknown_type_reports_full_path() {
        let input = defs(vec![(
            "file",
            Definition::group().with_field("size", Definition::field("bytes")),
        )]);
        let err = flatten("", &input, &TypeTable::default()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                type_name: "bytes".into(),
                field: "file.size".into(),
            }
        );
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let input = defs(vec![("tags", Definition::default())]);
        assert!(matches!(
            flatten("", &input, &TypeTable::default()),
            Err(SchemaError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_empty_group_contributes_nothing() {
        let input = defs(vec![("empty", Definition::group())]);
        assert!(flatten("", &input, &TypeTable::default()).unwrap().is_empty());
    }
}
