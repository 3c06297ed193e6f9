//! The assembled namespace/value tree.
//!
//! A [`Schema`] owns every [`Namespace`] and [`Value`] in two arenas and
//! links them through [`NamespaceId`] and [`ValueId`] handles. Path-keyed
//! indexes give O(1) lookup of any node by its dotted name.
//!
//! [`build_schema`] is the only way to populate a schema. Each namespace is
//! created at most once per dotted path, no matter how many fields share it.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use fieldgen_core::{FlatTypes, TypeDescriptor, build_schema};
//!
//! let int = TypeDescriptor::new("int", "Int");
//! let mut flat = FlatTypes::new();
//! flat.insert("process.pid".into(), int.clone());
//! flat.insert("process.parent.pid".into(), int);
//!
//! let schema = build_schema("1.0.0", &flat, &BTreeSet::new());
//! let process = schema.namespace("process").unwrap();
//! assert_eq!(process.values.len(), 1);
//! assert_eq!(process.children.len(), 1);
//! assert!(schema.top_namespace("process").is_some());
//! assert!(schema.top_namespace("parent").is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::flatten::FlatTypes;
use crate::path::{normalize_path, split_path};
use crate::types::TypeDescriptor;

/// Handle of a [`Namespace`] inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(usize);

/// Handle of a [`Value`] inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(usize);

/// An inner node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Last path segment.
    pub name: String,
    /// Full dotted path.
    pub flat_name: String,
    /// Documentation, empty until descriptions are applied.
    pub description: String,
    /// Enclosing namespace, `None` for top-level namespaces.
    pub parent: Option<NamespaceId>,
    /// Direct child namespaces in creation order.
    pub children: Vec<NamespaceId>,
    /// Values owned by this namespace in creation order.
    pub values: Vec<ValueId>,
}

/// A leaf field of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// Last path segment.
    pub name: String,
    /// Full dotted path with any root prefix removed.
    pub flat_name: String,
    /// Resolved field type.
    pub ty: TypeDescriptor,
    /// Documentation, empty until descriptions are applied.
    pub description: String,
    /// Owning namespace, `None` for base fields.
    pub parent: Option<NamespaceId>,
}

/// Normalized schema handed to code emitters.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    version: String,
    namespace_arena: Vec<Namespace>,
    value_arena: Vec<Value>,
    base: BTreeMap<String, ValueId>,
    top: BTreeMap<String, NamespaceId>,
    namespaces: BTreeMap<String, NamespaceId>,
    values: BTreeMap<String, ValueId>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Returns the schema version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the namespace behind `id`.
    ///
    /// Handles are only valid for the schema that issued them.
    pub fn ns(&self, id: NamespaceId) -> &Namespace {
        &self.namespace_arena[id.0]
    }

    /// Returns the value behind `id`.
    pub fn value(&self, id: ValueId) -> &Value {
        &self.value_arena[id.0]
    }

    /// Looks up a namespace by full dotted path.
    pub fn namespace(&self, path: &str) -> Option<&Namespace> {
        self.namespaces.get(path).map(|id| self.ns(*id))
    }

    /// Looks up a value by full dotted path (base fields by their name).
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        self.values.get(path).map(|id| self.value(*id))
    }

    /// Looks up a base field by name.
    pub fn base_value(&self, name: &str) -> Option<&Value> {
        self.base.get(name).map(|id| self.value(*id))
    }

    /// Looks up a top-level namespace by name.
    pub fn top_namespace(&self, name: &str) -> Option<&Namespace> {
        self.top.get(name).map(|id| self.ns(*id))
    }

    /// Base fields keyed by name.
    pub fn base(&self) -> &BTreeMap<String, ValueId> {
        &self.base
    }

    /// Top-level namespaces keyed by name.
    pub fn top(&self) -> &BTreeMap<String, NamespaceId> {
        &self.top
    }

    /// Every namespace keyed by full path.
    pub fn namespaces(&self) -> &BTreeMap<String, NamespaceId> {
        &self.namespaces
    }

    /// Every value keyed by full path, base fields included.
    pub fn values(&self) -> &BTreeMap<String, ValueId> {
        &self.values
    }

    /// Returns the sorted set of packages referenced by value types.
    pub fn packages(&self) -> BTreeSet<&str> {
        self.values
            .values()
            .filter_map(|id| self.value(*id).ty.package.as_deref())
            .collect()
    }

    /// Returns `true` if any non-base value lives below `path`.
    pub fn has_values_under(&self, path: &str) -> bool {
        let prefix = format!("{path}.");
        self.values
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(&prefix))
    }

    pub(crate) fn namespace_mut(&mut self, path: &str) -> Option<&mut Namespace> {
        let id = *self.namespaces.get(path)?;
        Some(&mut self.namespace_arena[id.0])
    }

    pub(crate) fn value_mut(&mut self, path: &str) -> Option<&mut Value> {
        let id = *self.values.get(path)?;
        Some(&mut self.value_arena[id.0])
    }

    /// Registers a value with no namespace, bypassing assembly.
    #[cfg(test)]
    pub(crate) fn insert_detached_value(&mut self, path: &str) {
        let (name, _) = split_path(path);
        let ty = TypeDescriptor::new("string", "String");
        let id = self.push_value(name, path, &ty);
        self.values.insert(path.to_string(), id);
    }

    fn push_value(&mut self, name: &str, flat_name: &str, ty: &TypeDescriptor) -> ValueId {
        let id = ValueId(self.value_arena.len());
        self.value_arena.push(Value {
            name: name.to_string(),
            flat_name: flat_name.to_string(),
            ty: ty.clone(),
            description: String::new(),
            parent: None,
        });
        id
    }

    /// Returns the namespace registered at `path`, creating it when absent.
    /// The flag is `true` when the namespace was created by this call.
    fn namespace_entry(&mut self, path: &str) -> (NamespaceId, bool) {
        if let Some(id) = self.namespaces.get(path) {
            return (*id, false);
        }

        let id = NamespaceId(self.namespace_arena.len());
        let (name, _) = split_path(path);
        self.namespace_arena.push(Namespace {
            name: name.to_string(),
            flat_name: path.to_string(),
            description: String::new(),
            parent: None,
            children: Vec::new(),
            values: Vec::new(),
        });
        self.namespaces.insert(path.to_string(), id);
        debug!(namespace = path, "Created namespace");
        (id, true)
    }

    /// Attaches `value` to the namespace at `parent_path`, creating missing
    /// ancestors from the innermost outwards.
    ///
    /// `orphan` is always a namespace created during this call that has no
    /// parent yet. Once an ancestor already exists it is wired into the tree
    /// from an earlier field, so linking `orphan` to it completes the walk.
    /// If every ancestor was new, `orphan` ends as a new top-level namespace.
    fn attach_value(&mut self, value: ValueId, parent_path: &str) {
        let (owner, created) = self.namespace_entry(parent_path);
        self.value_arena[value.0].parent = Some(owner);
        self.namespace_arena[owner.0].values.push(value);
        if !created {
            return;
        }

        let mut orphan = owner;
        let (_, mut path) = split_path(parent_path);
        while !path.is_empty() {
            let (ancestor, created) = self.namespace_entry(path);
            self.namespace_arena[orphan.0].parent = Some(ancestor);
            self.namespace_arena[ancestor.0].children.push(orphan);
            if !created {
                return;
            }
            orphan = ancestor;
            path = split_path(path).1;
        }

        let name = self.namespace_arena[orphan.0].name.clone();
        self.top.insert(name, orphan);
    }
}

/// Assembles a [`Schema`] from flattened field types.
///
/// A field is skipped when its raw path, its normalized path or (for base
/// fields) its name is in `exclude`. A leading `base.` is stripped before
/// placement; fields left without a parent path become base fields, and a
/// bare `base` entry is dropped. Paths that normalize to an existing value
/// (`base.process.pid` and `process.pid`) share one value, typed by the last
/// path in iteration order.
pub fn build_schema(version: &str, flat: &FlatTypes, exclude: &BTreeSet<String>) -> Schema {
    let mut schema = Schema::new(version);

    for (full_name, ty) in flat {
        if exclude.contains(full_name) {
            debug!(field = %full_name, "Excluded field");
            continue;
        }

        let path = normalize_path(full_name);
        let (name, parent_path) = split_path(path);
        if name.is_empty() {
            debug!(field = %full_name, "Dropped field without a name");
            continue;
        }
        if exclude.contains(path) || (parent_path.is_empty() && exclude.contains(name)) {
            debug!(field = %full_name, "Excluded field");
            continue;
        }

        if let Some(existing) = schema.value_mut(path) {
            existing.ty = ty.clone();
            debug!(field = %full_name, path, "Merged field into existing value");
            continue;
        }

        let value = schema.push_value(name, path, ty);
        schema.values.insert(path.to_string(), value);

        if parent_path.is_empty() {
            schema.base.insert(name.to_string(), value);
        } else {
            schema.attach_value(value, parent_path);
        }
    }

    debug!(
        namespaces = schema.namespaces.len(),
        values = schema.values.len(),
        base = schema.base.len(),
        "Assembled schema"
    );
    schema
}
