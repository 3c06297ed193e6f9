//! Error types for schema assembly.

use thiserror::Error;

/// Errors raised while turning definitions into a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A definition uses a type keyword missing from the
    /// [`TypeTable`](crate::TypeTable).
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// The unresolved keyword.
        type_name: String,
        /// Full dotted path of the offending field.
        field: String,
    },

    /// A described group has surviving fields but no namespace was built
    /// for it.
    #[error("no namespace for: {0}")]
    MissingNamespace(String),
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
