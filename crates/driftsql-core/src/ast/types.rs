//! Column type names.

use crate::lexer::Span;

/// SQLite type affinity, derived from a declared type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

/// How a drift enum column stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStorage {
    /// `ENUM(Type)`: stored as the variant index (an integer).
    Index,
    /// `ENUMNAME(Type)`: stored as the variant name (text).
    Name,
}

/// A drift enum mapping declared through the type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMapping<'a> {
    /// Storage strategy.
    pub storage: EnumStorage,
    /// The Dart enum type.
    pub dart_type: &'a str,
}

/// A declared type: one or more words plus optional arguments,
/// e.g. `VARCHAR(255)`, `UNSIGNED BIG INT`, `ENUM(Status)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// The type words joined by single spaces.
    pub name: String,
    /// The arguments inside the parentheses, verbatim.
    pub arguments: Vec<String>,
    /// Source span.
    pub span: Span,
}

impl TypeName {
    /// Returns the column affinity SQLite assigns to this type name.
    ///
    /// Follows the rules of section 3.1 of the SQLite datatype docs.
    #[must_use]
    pub fn affinity(&self) -> Affinity {
        if let Some(mapping) = self.enum_mapping() {
            return match mapping.storage {
                EnumStorage::Index => Affinity::Integer,
                EnumStorage::Name => Affinity::Text,
            };
        }

        let upper = self.name.to_ascii_uppercase();
        if upper.contains("INT") {
            Affinity::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Affinity::Text
        } else if upper.contains("BLOB") || upper.is_empty() {
            Affinity::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }

    /// Returns the drift enum mapping for `ENUM(T)` / `ENUMNAME(T)`.
    #[must_use]
    pub fn enum_mapping(&self) -> Option<EnumMapping<'_>> {
        let storage = if self.name.eq_ignore_ascii_case("ENUM") {
            EnumStorage::Index
        } else if self.name.eq_ignore_ascii_case("ENUMNAME") {
            EnumStorage::Name
        } else {
            return None;
        };
        match self.arguments.as_slice() {
            [dart_type] => Some(EnumMapping {
                storage,
                dart_type,
            }),
            _ => None,
        }
    }
}
