//! Field definition records and the type keyword table.
//!
//! [`Definition`] is the decoded shape of one entry in a field definition
//! document. [`TypeTable`] maps the `type` keyword of a definition to the
//! [`TypeDescriptor`] a code emitter uses for the generated field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Type keyword marking a definition as a namespace rather than a field.
pub const GROUP_TYPE: &str = "group";

/// Top-level or nested definitions keyed by their (possibly dotted) name.
pub type Definitions = BTreeMap<String, Definition>;

/// A field or group as written in a definition document.
///
/// # Examples
///
/// ```
/// use fieldgen_core::Definition;
///
/// let yaml = r#"
/// type: group
/// description: Process fields.
/// fields:
///   pid:
///     type: integer
/// "#;
/// let def: Definition = serde_yaml::from_str(yaml).unwrap();
/// assert!(def.is_group());
/// assert_eq!(def.fields["pid"].type_name, "integer");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Display name. Empty until the loader fills it from the mapping key.
    /// Informational only: flattening and placement use the mapping key.
    #[serde(default)]
    pub name: String,
    /// Type keyword, or `"group"` for namespaces.
    #[serde(default, rename = "type")]
    pub type_name: String,
    /// Free-form documentation, may span lines.
    #[serde(default)]
    pub description: String,
    /// Nested definitions, only meaningful for groups.
    #[serde(default)]
    pub fields: Definitions,
}

impl Definition {
    /// Creates a leaf definition with the given type keyword.
    pub fn field(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            ..Self::default()
        }
    }

    /// Creates an empty group definition.
    pub fn group() -> Self {
        Self::field(GROUP_TYPE)
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Adds a nested definition.
    pub fn with_field(mut self, key: &str, def: Definition) -> Self {
        self.fields.insert(key.to_string(), def);
        self
    }

    /// Returns `true` if this definition only groups other definitions.
    pub fn is_group(&self) -> bool {
        self.type_name == GROUP_TYPE
    }
}

/// Semantic type of a generated field.
///
/// Many values share the same descriptor, so it is cloned freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Module or package the type lives in, if it needs an import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Type name as written in generated code.
    pub name: String,
    /// Tag the emitter uses to pick a value constructor.
    pub constructor: String,
}

impl TypeDescriptor {
    /// Creates a descriptor for a type that needs no import.
    pub fn new(name: &str, constructor: &str) -> Self {
        Self {
            package: None,
            name: name.to_string(),
            constructor: constructor.to_string(),
        }
    }

    /// Sets the package qualifier.
    pub fn in_package(mut self, package: &str) -> Self {
        self.package = Some(package.to_string());
        self
    }
}

/// Immutable lookup table from type keyword to [`TypeDescriptor`].
///
/// [`TypeTable::default`] holds the built-in keywords. Additional keywords
/// can be layered on with [`TypeTable::with_overrides`].
///
/// # Examples
///
/// ```
/// use fieldgen_core::TypeTable;
///
/// let table = TypeTable::default();
/// let ty = table.resolve("date", "event.created").unwrap();
/// assert_eq!(ty.package.as_deref(), Some("time"));
/// assert!(table.resolve("blob", "file.data").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TypeTable {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeTable {
    /// Creates a table from explicit entries.
    pub fn new(types: BTreeMap<String, TypeDescriptor>) -> Self {
        Self { types }
    }

    /// Returns a copy of this table with `overrides` added, replacing any
    /// built-in keyword of the same name.
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (String, TypeDescriptor)>,
    ) -> Self {
        self.types.extend(overrides);
        self
    }

    /// Resolves `keyword` for the field at `field`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownType`] naming both the keyword and the
    /// field path when the keyword is not in the table.
    pub fn resolve(&self, keyword: &str, field: &str) -> Result<TypeDescriptor> {
        self.types
            .get(keyword)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownType {
                type_name: keyword.to_string(),
                field: field.to_string(),
            })
    }

    /// Returns `true` if `keyword` is known.
    pub fn contains(&self, keyword: &str) -> bool {
        self.types.contains_key(keyword)
    }

    /// Returns an iterator over known keywords.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        let string = TypeDescriptor::new("string", "String");
        let boolean = TypeDescriptor::new("bool", "Bool");

        let entries = [
            ("keyword", string.clone()),
            ("text", string.clone()),
            ("bool", boolean.clone()),
            ("boolean", boolean),
            ("integer", TypeDescriptor::new("int", "Int")),
            ("long", TypeDescriptor::new("int64", "Int64")),
            ("float", TypeDescriptor::new("float64", "Float64")),
            (
                "date",
                TypeDescriptor::new("time.Time", "Time").in_package("time"),
            ),
            (
                "duration",
                TypeDescriptor::new("time.Duration", "Dur").in_package("time"),
            ),
            (
                "object",
                TypeDescriptor::new("map[string]interface{}", "Any"),
            ),
            ("ip", string.clone()),
            ("geo_point", string),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(keyword, ty)| (keyword.to_string(), ty))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keywords_resolve() {
        let table = TypeTable::default();
        for keyword in [
            "keyword",
            "text",
            "bool",
            "boolean",
            "integer",
            "long",
            "float",
            "date",
            "duration",
            "object",
            "ip",
            "geo_point",
        ] {
            assert!(table.resolve(keyword, "f").is_ok(), "{keyword}");
        }
    }

    #[test]
    fn test_string_like_keywords_share_descriptor() {
        let table = TypeTable::default();
        let keyword = table.resolve("keyword", "a").unwrap();
        assert_eq!(table.resolve("text", "b").unwrap(), keyword);
        assert_eq!(table.resolve("ip", "c").unwrap(), keyword);
        assert_eq!(keyword.name, "string");
        assert_eq!(keyword.package, None);
    }

    #[test]
    fn test_unknown_keyword_names_field() {
        let err = TypeTable::default()
            .resolve("half_float", "host.cpu.pct")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                type_name: "half_float".into(),
                field: "host.cpu.pct".into(),
            }
        );
        assert!(err.to_string().contains("host.cpu.pct"));
    }

    #[test]
    fn test_group_is_not_a_type() {
        assert!(!TypeTable::default().contains(GROUP_TYPE));
    }

    #[test]
    fn test_overrides_replace_builtin() {
        let table = TypeTable::default().with_overrides([
            ("ip".to_string(), TypeDescriptor::new("net.IP", "IP").in_package("net")),
            ("scaled_float".to_string(), TypeDescriptor::new("float64", "Float64")),
        ]);
        assert_eq!(table.resolve("ip", "x").unwrap().name, "net.IP");
        assert!(table.contains("scaled_float"));
        assert_eq!(table.resolve("keyword", "x").unwrap().name, "string");
    }

    #[test]
    fn test_definition_defaults() {
        let def: Definition = serde_yaml::from_str("type: keyword").unwrap();
        assert_eq!(def.name, "");
        assert_eq!(def.description, "");
        assert!(def.fields.is_empty());
        assert!(!def.is_group());
    }
}
