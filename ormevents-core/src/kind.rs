//! Runtime type descriptions for configuration values.

use std::fmt;

/// The kind of a configuration value, as reported in error messages.
///
/// Entries that are neither object instances nor names keep only their kind;
/// the builder rejects them with a message such as `"integer" given`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An absent or null value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A signed or unsigned integer.
    Integer,
    /// A floating point number.
    Float,
    /// A string.
    String,
    /// A sequence.
    Array,
    /// A key/value mapping.
    Mapping,
    /// A live object instance.
    Object,
}

impl ValueKind {
    /// Returns the lowercase name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Mapping => "mapping",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
