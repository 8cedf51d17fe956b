//! The closed set of attribute argument values.
//!
//! C# restricts attribute arguments to constants of the built-in primitive
//! types, `string`, enum members, `typeof` expressions and one-dimensional
//! arrays of those. [`ArgumentValue`] models exactly that set:
//!
//! - [`Scalar`]: one value of a primitive, string, enum or type kind.
//! - [`Sequence`]: a homogeneous, explicitly typed array of scalars.
//!
//! A sequence holds [`Scalar`]s only, so arrays of arrays cannot be built.
//! There is no conversion from `Vec<T>`, arrays or slices into
//! [`ArgumentValue`]; callers wrap collections in a [`Sequence`] first.
//!
//! ```compile_fail
//! use featuregen_descriptor::AttributeDescriptor;
//!
//! let attribute = AttributeDescriptor::new("Foo", "Bar").unwrap();
//! // A raw Vec is not an argument value.
//! let _ = attribute.with_positional_arguments([vec!["Fizz"]]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, NameRole};
use crate::identifier::{Identifier, QualifiedName};
use crate::sequence::Sequence;

/// Predefined C# type keywords accepted as `typeof` targets.
const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "object", "short", "ushort", "string",
];

/// The kind of a scalar, used as the element type of a [`Sequence`].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "ElementKindRepr", into = "ElementKindRepr")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `bool`.
    Bool,
    /// `char` (one UTF-16 code unit).
    Char,
    /// `sbyte`.
    SByte,
    /// `byte`.
    Byte,
    /// `short`.
    Int16,
    /// `ushort`.
    UInt16,
    /// `int`.
    Int32,
    /// `uint`.
    UInt32,
    /// `long`.
    Int64,
    /// `ulong`.
    UInt64,
    /// `float`.
    Single,
    /// `double`.
    Double,
    /// `string`.
    String,
    /// Members of the named enumeration.
    Enum(QualifiedName),
    /// `System.Type`, i.e. `typeof` expressions.
    Type,
}

impl ElementKind {
    /// Returns the C# keyword for primitive kinds, or `None` for enum and
    /// type kinds.
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        Some(match self {
            ElementKind::Bool => "bool",
            ElementKind::Char => "char",
            ElementKind::SByte => "sbyte",
            ElementKind::Byte => "byte",
            ElementKind::Int16 => "short",
            ElementKind::UInt16 => "ushort",
            ElementKind::Int32 => "int",
            ElementKind::UInt32 => "uint",
            ElementKind::Int64 => "long",
            ElementKind::UInt64 => "ulong",
            ElementKind::Single => "float",
            ElementKind::Double => "double",
            ElementKind::String => "string",
            ElementKind::Enum(_) | ElementKind::Type => return None,
        })
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Enum(name) => write!(f, "{name}"),
            ElementKind::Type => f.write_str("System.Type"),
            other => f.write_str(other.keyword().unwrap_or_default()),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
enum ElementKindRepr {
    Bool,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    String,
    Enum(String),
    Type,
}

#[cfg(feature = "serde")]
impl TryFrom<ElementKindRepr> for ElementKind {
    type Error = ArgumentError;

    fn try_from(repr: ElementKindRepr) -> Result<Self, Self::Error> {
        Ok(match repr {
            ElementKindRepr::Bool => ElementKind::Bool,
            ElementKindRepr::Char => ElementKind::Char,
            ElementKindRepr::SByte => ElementKind::SByte,
            ElementKindRepr::Byte => ElementKind::Byte,
            ElementKindRepr::Int16 => ElementKind::Int16,
            ElementKindRepr::UInt16 => ElementKind::UInt16,
            ElementKindRepr::Int32 => ElementKind::Int32,
            ElementKindRepr::UInt32 => ElementKind::UInt32,
            ElementKindRepr::Int64 => ElementKind::Int64,
            ElementKindRepr::UInt64 => ElementKind::UInt64,
            ElementKindRepr::Single => ElementKind::Single,
            ElementKindRepr::Double => ElementKind::Double,
            ElementKindRepr::String => ElementKind::String,
            ElementKindRepr::Enum(name) => {
                ElementKind::Enum(QualifiedName::new(name, NameRole::EnumType)?)
            }
            ElementKindRepr::Type => ElementKind::Type,
        })
    }
}

#[cfg(feature = "serde")]
impl From<ElementKind> for ElementKindRepr {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Bool => ElementKindRepr::Bool,
            ElementKind::Char => ElementKindRepr::Char,
            ElementKind::SByte => ElementKindRepr::SByte,
            ElementKind::Byte => ElementKindRepr::Byte,
            ElementKind::Int16 => ElementKindRepr::Int16,
            ElementKind::UInt16 => ElementKindRepr::UInt16,
            ElementKind::Int32 => ElementKindRepr::Int32,
            ElementKind::UInt32 => ElementKindRepr::UInt32,
            ElementKind::Int64 => ElementKindRepr::Int64,
            ElementKind::UInt64 => ElementKindRepr::UInt64,
            ElementKind::Single => ElementKindRepr::Single,
            ElementKind::Double => ElementKindRepr::Double,
            ElementKind::String => ElementKindRepr::String,
            ElementKind::Enum(name) => ElementKindRepr::Enum(name.into()),
            ElementKind::Type => ElementKindRepr::Type,
        }
    }
}

/// A named constant of an enumeration, e.g. `System.AttributeTargets.Class`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "EnumValueRepr", into = "EnumValueRepr")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: QualifiedName,
    member: Identifier,
}

impl EnumValue {
    /// Creates a member reference from the enumeration's qualified name and
    /// the member name.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if either name is not valid C#.
    pub fn new(enum_type: &str, member: &str) -> Result<Self, ArgumentError> {
        Ok(Self {
            enum_type: QualifiedName::new(enum_type, NameRole::EnumType)?,
            member: Identifier::new(member, NameRole::EnumMember)?,
        })
    }

    /// The declaring enumeration.
    #[must_use]
    pub fn enum_type(&self) -> &QualifiedName {
        &self.enum_type
    }

    /// The member name.
    #[must_use]
    pub fn member(&self) -> &Identifier {
        &self.member
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct EnumValueRepr {
    enum_type: String,
    member: String,
}

#[cfg(feature = "serde")]
impl TryFrom<EnumValueRepr> for EnumValue {
    type Error = ArgumentError;

    fn try_from(repr: EnumValueRepr) -> Result<Self, Self::Error> {
        EnumValue::new(&repr.enum_type, &repr.member)
    }
}

#[cfg(feature = "serde")]
impl From<EnumValue> for EnumValueRepr {
    fn from(value: EnumValue) -> Self {
        EnumValueRepr {
            enum_type: value.enum_type.into(),
            member: value.member.into(),
        }
    }
}

/// The target of a `typeof` expression.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(TypeName);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TypeName {
    Keyword(&'static str),
    Named(QualifiedName),
}

impl TypeRef {
    /// Parses a type name: either a predefined keyword such as `string` or a
    /// dotted name such as `System.Uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidQualifiedName`] when `name` is neither.
    pub fn new(name: &str) -> Result<Self, ArgumentError> {
        match PREDEFINED_TYPES.iter().copied().find(|keyword| *keyword == name) {
            Some(keyword) => Ok(TypeRef(TypeName::Keyword(keyword))),
            None => Ok(TypeRef(TypeName::Named(QualifiedName::new(
                name,
                NameRole::TypeName,
            )?))),
        }
    }

    /// `typeof` target for the Rust type's C# counterpart.
    #[must_use]
    pub fn of<T: ScalarType>() -> Self {
        // Every ScalarType maps to a primitive kind, which always has a keyword.
        TypeRef(TypeName::Keyword(T::kind().keyword().unwrap_or("object")))
    }

    /// Returns true for predefined type keywords.
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        matches!(self.0, TypeName::Keyword(_))
    }

    /// Returns the name as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            TypeName::Keyword(keyword) => keyword,
            TypeName::Named(name) => name.as_str(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TypeRef {
    type Error = ArgumentError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        TypeRef::new(&name)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.as_str().to_owned()
    }
}

/// A single attribute argument constant.
///
/// Floating point values compare and hash by bit pattern, so `NaN` equals
/// itself and `0.0` differs from `-0.0`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub enum Scalar {
    /// `bool`.
    Bool(bool),
    /// `char`, stored as its UTF-16 code unit.
    Char(u16),
    /// `sbyte`.
    SByte(i8),
    /// `byte`.
    Byte(u8),
    /// `short`.
    Int16(i16),
    /// `ushort`.
    UInt16(u16),
    /// `int`.
    Int32(i32),
    /// `uint`.
    UInt32(u32),
    /// `long`.
    Int64(i64),
    /// `ulong`.
    UInt64(u64),
    /// `float`.
    Single(#[cfg_attr(feature = "serde", serde(with = "special_float::single"))] f32),
    /// `double`.
    Double(#[cfg_attr(feature = "serde", serde(with = "special_float::double"))] f64),
    /// `string`.
    String(String),
    /// An enum member.
    Enum(EnumValue),
    /// A `typeof` expression.
    Type(TypeRef),
}

impl Scalar {
    /// Returns the kind of this scalar.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Scalar::Bool(_) => ElementKind::Bool,
            Scalar::Char(_) => ElementKind::Char,
            Scalar::SByte(_) => ElementKind::SByte,
            Scalar::Byte(_) => ElementKind::Byte,
            Scalar::Int16(_) => ElementKind::Int16,
            Scalar::UInt16(_) => ElementKind::UInt16,
            Scalar::Int32(_) => ElementKind::Int32,
            Scalar::UInt32(_) => ElementKind::UInt32,
            Scalar::Int64(_) => ElementKind::Int64,
            Scalar::UInt64(_) => ElementKind::UInt64,
            Scalar::Single(_) => ElementKind::Single,
            Scalar::Double(_) => ElementKind::Double,
            Scalar::String(_) => ElementKind::String,
            Scalar::Enum(value) => ElementKind::Enum(value.enum_type.clone()),
            Scalar::Type(_) => ElementKind::Type,
        }
    }

    /// Returns true if this scalar can be an element of a sequence of `kind`.
    #[must_use]
    pub fn is_kind(&self, kind: &ElementKind) -> bool {
        match (self, kind) {
            (Scalar::Enum(value), ElementKind::Enum(name)) => value.enum_type == *name,
            _ => std::mem::discriminant(&self.kind()) == std::mem::discriminant(kind),
        }
    }

    /// Creates a `char` scalar from a Rust character.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::UnrepresentableChar`] for characters outside
    /// the Basic Multilingual Plane.
    pub fn char(c: char) -> Result<Self, ArgumentError> {
        let mut units = [0u16; 2];
        match c.encode_utf16(&mut units) {
            [unit] => Ok(Scalar::Char(*unit)),
            _ => {
                tracing::debug!(character = ?c, "rejected non-BMP char argument");
                Err(ArgumentError::UnrepresentableChar(c))
            }
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::SByte(a), Scalar::SByte(b)) => a == b,
            (Scalar::Byte(a), Scalar::Byte(b)) => a == b,
            (Scalar::Int16(a), Scalar::Int16(b)) => a == b,
            (Scalar::UInt16(a), Scalar::UInt16(b)) => a == b,
            (Scalar::Int32(a), Scalar::Int32(b)) => a == b,
            (Scalar::UInt32(a), Scalar::UInt32(b)) => a == b,
            (Scalar::Int64(a), Scalar::Int64(b)) => a == b,
            (Scalar::UInt64(a), Scalar::UInt64(b)) => a == b,
            (Scalar::Single(a), Scalar::Single(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Double(a), Scalar::Double(b)) => a.to_bits() == b.to_bits(),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Enum(a), Scalar::Enum(b)) => a == b,
            (Scalar::Type(a), Scalar::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Bool(v) => v.hash(state),
            Scalar::Char(v) => v.hash(state),
            Scalar::SByte(v) => v.hash(state),
            Scalar::Byte(v) => v.hash(state),
            Scalar::Int16(v) => v.hash(state),
            Scalar::UInt16(v) => v.hash(state),
            Scalar::Int32(v) => v.hash(state),
            Scalar::UInt32(v) => v.hash(state),
            Scalar::Int64(v) => v.hash(state),
            Scalar::UInt64(v) => v.hash(state),
            Scalar::Single(v) => v.to_bits().hash(state),
            Scalar::Double(v) => v.to_bits().hash(state),
            Scalar::String(v) => v.hash(state),
            Scalar::Enum(v) => v.hash(state),
            Scalar::Type(v) => v.hash(state),
        }
    }
}

/// Serde form for floats: finite values as numbers, `NaN` and the
/// infinities as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
#[cfg(feature = "serde")]
mod special_float {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FloatRepr {
        Number(f64),
        Name(String),
    }

    fn name_of(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some("NaN")
        } else if value == f64::INFINITY {
            Some("Infinity")
        } else if value == f64::NEG_INFINITY {
            Some("-Infinity")
        } else {
            None
        }
    }

    fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match FloatRepr::deserialize(deserializer)? {
            FloatRepr::Number(value) => Ok(value),
            FloatRepr::Name(name) => match name.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"NaN\", \"Infinity\" or \"-Infinity\"",
                )),
            },
        }
    }

    pub(super) mod double {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &f64,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match super::name_of(*value) {
                Some(name) => serializer.serialize_str(name),
                None => serializer.serialize_f64(*value),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<f64, D::Error> {
            super::read(deserializer)
        }
    }

    pub(super) mod single {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &f32,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match super::name_of(f64::from(*value)) {
                Some(name) => serializer.serialize_str(name),
                None => serializer.serialize_f32(*value),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<f32, D::Error> {
            // Shortest f32 text read as f64 narrows back to the same f32.
            super::read(deserializer).map(|value| value as f32)
        }
    }
}

/// Rust types with a direct C# primitive counterpart.
///
/// Used to declare the element type of sequences (including empty ones) and
/// the target of [`TypeRef::of`].
pub trait ScalarType {
    /// The C# kind this type maps to.
    fn kind() -> ElementKind;

    /// Converts the value into a scalar.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if the value has no C# representation.
    fn into_scalar(self) -> Result<Scalar, ArgumentError>;
}

macro_rules! scalar_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ScalarType for $ty {
                fn kind() -> ElementKind {
                    ElementKind::$variant
                }

                fn into_scalar(self) -> Result<Scalar, ArgumentError> {
                    Ok(Scalar::$variant(self.into()))
                }
            }

            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for ArgumentValue {
                fn from(value: $ty) -> Self {
                    ArgumentValue::Scalar(Scalar::$variant(value.into()))
                }
            }
        )*
    };
}

scalar_type! {
    bool => Bool,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
    String => String,
    &str => String,
}

impl ScalarType for char {
    fn kind() -> ElementKind {
        ElementKind::Char
    }

    fn into_scalar(self) -> Result<Scalar, ArgumentError> {
        Scalar::char(self)
    }
}

impl TryFrom<char> for Scalar {
    type Error = ArgumentError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Scalar::char(c)
    }
}

impl From<EnumValue> for Scalar {
    fn from(value: EnumValue) -> Self {
        Scalar::Enum(value)
    }
}

impl From<TypeRef> for Scalar {
    fn from(ty: TypeRef) -> Self {
        Scalar::Type(ty)
    }
}

/// A value accepted as an attribute argument.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentValue {
    /// A single constant.
    Scalar(Scalar),
    /// An array of constants of one kind.
    Sequence(Sequence),
}

impl ArgumentValue {
    /// Returns the scalar, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ArgumentValue::Scalar(scalar) => Some(scalar),
            ArgumentValue::Sequence(_) => None,
        }
    }

    /// Returns the sequence, if this is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            ArgumentValue::Sequence(sequence) => Some(sequence),
            ArgumentValue::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for ArgumentValue {
    fn from(scalar: Scalar) -> Self {
        ArgumentValue::Scalar(scalar)
    }
}

impl From<Sequence> for ArgumentValue {
    fn from(sequence: Sequence) -> Self {
        ArgumentValue::Sequence(sequence)
    }
}

impl From<EnumValue> for ArgumentValue {
    fn from(value: EnumValue) -> Self {
        ArgumentValue::Scalar(Scalar::Enum(value))
    }
}

impl From<TypeRef> for ArgumentValue {
    fn from(ty: TypeRef) -> Self {
        ArgumentValue::Scalar(Scalar::Type(ty))
    }
}

impl TryFrom<char> for ArgumentValue {
    type Error = ArgumentError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Scalar::char(c).map(ArgumentValue::Scalar)
    }
}
