//! Serializable, template-friendly views of a [`Schema`].
//!
//! Templates cannot follow arena handles, so [`SchemaView`] resolves them
//! into nested records: top-level namespaces carry their children and values
//! inline, while the `namespaces` and `values` maps give flat lookup by path.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{Namespace, NamespaceId, Schema, Value, ValueId};
use crate::types::TypeDescriptor;

/// Whole-schema view handed to templates.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaView<'a> {
    pub version: &'a str,
    /// Packages the generated code must import, sorted.
    pub packages: Vec<&'a str>,
    /// Base fields sorted by name.
    pub base: Vec<ValueView<'a>>,
    /// Top-level namespace trees sorted by name.
    pub top: Vec<NamespaceView<'a>>,
    pub namespaces: BTreeMap<&'a str, NamespaceEntry<'a>>,
    pub values: BTreeMap<&'a str, ValueView<'a>>,
}

/// A value with its type inlined.
#[derive(Debug, Clone, Serialize)]
pub struct ValueView<'a> {
    pub name: &'a str,
    pub flat_name: &'a str,
    pub description: &'a str,
    #[serde(rename = "type")]
    pub ty: &'a TypeDescriptor,
    /// Flat name of the owning namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
}

/// A namespace with its subtree inlined.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceView<'a> {
    pub name: &'a str,
    pub flat_name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    pub children: Vec<NamespaceView<'a>>,
    pub values: Vec<ValueView<'a>>,
}

/// A namespace whose children and values are referenced by flat name.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceEntry<'a> {
    pub name: &'a str,
    pub flat_name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    pub children: Vec<&'a str>,
    pub values: Vec<&'a str>,
}

impl<'a> SchemaView<'a> {
    /// Resolves every handle in `schema`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use fieldgen_core::{FlatTypes, SchemaView, TypeDescriptor, build_schema};
    ///
    /// let mut flat = FlatTypes::new();
    /// flat.insert("host.name".into(), TypeDescriptor::new("string", "String"));
    /// let schema = build_schema("8.0.0", &flat, &BTreeSet::new());
    ///
    /// let view = SchemaView::new(&schema);
    /// assert_eq!(view.top[0].values[0].flat_name, "host.name");
    /// assert_eq!(view.values["host.name"].parent, Some("host"));
    /// ```
    pub fn new(schema: &'a Schema) -> Self {
        let resolver = Resolver { schema };

        Self {
            version: schema.version(),
            packages: schema.packages().into_iter().collect(),
            base: schema
                .base()
                .values()
                .map(|id| resolver.value(*id))
                .collect(),
            top: schema
                .top()
                .values()
                .map(|id| resolver.tree(*id))
                .collect(),
            namespaces: schema
                .namespaces()
                .iter()
                .map(|(path, id)| (path.as_str(), resolver.entry(*id)))
                .collect(),
            values: schema
                .values()
                .iter()
                .map(|(path, id)| (path.as_str(), resolver.value(*id)))
                .collect(),
        }
    }
}

struct Resolver<'a> {
    schema: &'a Schema,
}

impl<'a> Resolver<'a> {
    fn parent_name(&self, parent: Option<NamespaceId>) -> Option<&'a str> {
        parent.map(|id| self.schema.ns(id).flat_name.as_str())
    }

    fn value(&self, id: ValueId) -> ValueView<'a> {
        let value: &'a Value = self.schema.value(id);
        ValueView {
            name: &value.name,
            flat_name: &value.flat_name,
            description: &value.description,
            ty: &value.ty,
            parent: self.parent_name(value.parent),
        }
    }

    fn tree(&self, id: NamespaceId) -> NamespaceView<'a> {
        let ns: &'a Namespace = self.schema.ns(id);
        NamespaceView {
            name: &ns.name,
            flat_name: &ns.flat_name,
            description: &ns.description,
            parent: self.parent_name(ns.parent),
            children: ns.children.iter().map(|child| self.tree(*child)).collect(),
            values: ns.values.iter().map(|value| self.value(*value)).collect(),
        }
    }

    fn entry(&self, id: NamespaceId) -> NamespaceEntry<'a> {
        let ns: &'a Namespace = self.schema.ns(id);
        NamespaceEntry {
            name: &ns.name,
            flat_name: &ns.flat_name,
            description: &ns.description,
            parent: self.parent_name(ns.parent),
            children: ns
                .children
                .iter()
                .map(|child| self.schema.ns(*child).flat_name.as_str())
                .collect(),
            values: ns
                .values
                .iter()
                .map(|value| self.schema.value(*value).flat_name.as_str())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{FlatTypes, build_schema};

    fn sample() -> Schema {
        let mut flat = FlatTypes::new();
        let kw = TypeDescriptor::new("string", "String");
        flat.insert("message".into(), kw.clone());
        flat.insert("host.name".into(), kw.clone());
        flat.insert("host.os.family".into(), kw);
        flat.insert(
            "event.created".into(),
            TypeDescriptor::new("time.Time", "Time").in_package("time"),
        );
        build_schema("1.2.0", &flat, &BTreeSet::new())
    }

    #[test]
    fn test_tree_is_nested() {
        let schema = sample();
        let view = SchemaView::new(&schema);

        assert_eq!(view.version, "1.2.0");
        assert_eq!(view.packages, vec!["time"]);
        assert_eq!(view.base.len(), 1);
        assert_eq!(view.base[0].parent, None);

        let names: Vec<&str> = view.top.iter().map(|ns| ns.name).collect();
        assert_eq!(names, vec!["event", "host"]);

        let host = &view.top[1];
        assert_eq!(host.values.len(), 1);
        assert_eq!(host.children[0].flat_name, "host.os");
        assert_eq!(host.children[0].parent, Some("host"));
        assert_eq!(host.children[0].values[0].name, "family");
    }

    #[test]
    fn test_flat_lookups() {
        let schema = sample();
        let view = SchemaView::new(&schema);
        assert_eq!(view.namespaces["host"].children, vec!["host.os"]);
        assert_eq!(view.namespaces["host.os"].values, vec!["host.os.family"]);
        assert_eq!(view.values.len(), 4);
    }

    #[test]
    fn test_serializes_type_key() {
        let schema = sample();
        let json = serde_json::to_value(SchemaView::new(&schema)).unwrap();
        assert_eq!(json["values"]["event.created"]["type"]["package"], "time");
        assert_eq!(json["values"]["message"]["type"]["constructor"], "String");
        assert!(json["values"]["message"].get("parent").is_none());
        assert!(json["values"]["message"]["type"].get("package").is_none());
    }
}
