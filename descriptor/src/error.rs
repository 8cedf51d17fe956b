//! Validation failures raised while building descriptors and argument values.

use std::convert::Infallible;

use thiserror::Error;

use crate::value::ElementKind;

/// What a validated name is used for; reported in [`ArgumentError`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// The attribute type name.
    AttributeName,
    /// The namespace owning the attribute type.
    Namespace,
    /// A named argument (property or field of the attribute).
    ArgumentName,
    /// The qualified name of an enumeration type.
    EnumType,
    /// A member of an enumeration.
    EnumMember,
    /// The target of a `typeof` expression.
    TypeName,
}

impl NameRole {
    /// Returns a short human-readable label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NameRole::AttributeName => "attribute name",
            NameRole::Namespace => "namespace",
            NameRole::ArgumentName => "argument name",
            NameRole::EnumType => "enum type",
            NameRole::EnumMember => "enum member",
            NameRole::TypeName => "type name",
        }
    }
}

impl std::fmt::Display for NameRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a descriptor or argument value would fall outside the
/// permitted shapes.
///
/// Every failure surfaces at construction or attachment time; rendering an
/// already-built descriptor cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The attribute type name was empty.
    #[error("attribute name must not be empty")]
    EmptyName,

    /// The namespace was empty.
    #[error("attribute namespace must not be empty")]
    EmptyNamespace,

    /// A simple name is not a legal C# identifier.
    #[error("invalid {role} `{value}`: not a C# identifier")]
    InvalidIdentifier {
        /// Where the name was used.
        role: NameRole,
        /// The rejected text.
        value: String,
    },

    /// A dotted name contains an empty or illegal segment.
    #[error("invalid {role} `{value}`: expected dot-separated C# identifiers")]
    InvalidQualifiedName {
        /// Where the name was used.
        role: NameRole,
        /// The rejected text.
        value: String,
    },

    /// The same argument name appeared twice in one named-argument bag.
    #[error("named argument `{0}` supplied more than once")]
    DuplicateArgumentName(String),

    /// A sequence element does not match the sequence's element kind.
    #[error("sequence of {expected} cannot hold a {found} element (index {index})")]
    MixedSequence {
        /// The declared element kind.
        expected: ElementKind,
        /// The kind of the offending element.
        found: ElementKind,
        /// Position of the offending element.
        index: usize,
    },

    /// An empty sequence was supplied without a declared element type.
    #[error("empty sequence has no element type; declare it with `Sequence::empty_of`")]
    UntypedEmptySequence,

    /// A character that does not fit a single UTF-16 code unit.
    #[error("character {0:?} cannot be represented as a single UTF-16 `char`")]
    UnrepresentableChar(char),
}

impl From<Infallible> for ArgumentError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
