//! C# identifiers and dotted names.
//!
//! Names are validated once, on construction, so that everything holding an
//! [`Identifier`] or [`QualifiedName`] can render it verbatim. Comparison and
//! hashing ignore the `@` verbatim prefix: `@Foo` and `Foo` name the same
//! thing in C#.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{ArgumentError, NameRole};

/// Reserved C# keywords. These are only legal as identifiers with the `@`
/// verbatim prefix.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Returns true if `s` is a reserved C# keyword.
#[must_use]
pub fn is_reserved_keyword(s: &str) -> bool {
    RESERVED_KEYWORDS.contains(&s)
}

/// Returns true if `s` is a legal C# simple name.
///
/// Accepts an optional `@` verbatim prefix, which is required for reserved
/// keywords. The first character is `_` or XID_Start (letters and letter
/// numbers); the rest are XID_Continue, which adds decimal digits,
/// combining marks and connector punctuation. Formatting characters (Cf)
/// and `\uXXXX` escapes are not accepted.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let (verbatim, body) = match s.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut chars = body.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    };
    valid && (verbatim || !is_reserved_keyword(body))
}

/// Strips the `@` verbatim prefix.
fn unescaped(s: &str) -> &str {
    s.strip_prefix('@').unwrap_or(s)
}

/// A validated C# simple name such as `Foo`, `_bar` or `@class`.
#[derive(Debug, Clone)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `value` as a simple name used as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyName`] for an empty attribute name and
    /// [`ArgumentError::InvalidIdentifier`] for any other illegal input.
    pub fn new(value: impl Into<String>, role: NameRole) -> Result<Self, ArgumentError> {
        let value = value.into();
        if value.is_empty() && role == NameRole::AttributeName {
            return Err(ArgumentError::EmptyName);
        }
        if !is_identifier(&value) {
            return Err(ArgumentError::InvalidIdentifier { role, value });
        }
        Ok(Self(value))
    }

    /// Returns the name as written, including any `@` prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name without its `@` prefix; this is what equality
    /// compares.
    #[must_use]
    pub fn name(&self) -> &str {
        unescaped(&self.0)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Borrows the unescaped name, consistent with `Eq` and `Hash`.
impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        self.name()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// A validated dot-separated name such as `System.Runtime` or `Bar`.
#[derive(Debug, Clone)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Validates `value` as a dotted name used as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyNamespace`] for an empty namespace and
    /// [`ArgumentError::InvalidQualifiedName`] when any segment is not an
    /// identifier.
    pub fn new(value: impl Into<String>, role: NameRole) -> Result<Self, ArgumentError> {
        let value = value.into();
        if value.is_empty() && role == NameRole::Namespace {
            return Err(ArgumentError::EmptyNamespace);
        }
        if value.is_empty() || !value.split('.').all(is_identifier) {
            return Err(ArgumentError::InvalidQualifiedName { role, value });
        }
        Ok(Self(value))
    }

    /// Returns the dotted name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    fn unescaped_segments(&self) -> impl Iterator<Item = &str> {
        self.segments().map(unescaped)
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.unescaped_segments().eq(other.unescaped_segments())
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for segment in self.unescaped_segments() {
            segment.hash(state);
        }
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QualifiedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unescaped_segments().cmp(other.unescaped_segments())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.0
    }
}
