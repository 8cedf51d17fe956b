//! Typed, homogeneous arrays of scalars.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, NameRole};
use crate::identifier::QualifiedName;
use crate::value::{ElementKind, EnumValue, Scalar, ScalarType};

/// An attribute array argument: every item is a [`Scalar`] of one
/// [`ElementKind`].
///
/// The element kind is fixed when the sequence is built, so an empty
/// sequence still renders with a concrete array type (`new string[] {}`).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "SequenceRepr", into = "SequenceRepr")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    element: ElementKind,
    items: Vec<Scalar>,
}

impl Sequence {
    /// An empty sequence whose element type is the C# counterpart of `T`.
    ///
    /// ```
    /// use featuregen_descriptor::{ElementKind, Sequence};
    ///
    /// let empty = Sequence::empty::<String>();
    /// assert_eq!(empty.element(), &ElementKind::String);
    /// assert!(empty.is_empty());
    /// ```
    #[must_use]
    pub fn empty<T: ScalarType>() -> Self {
        Self::empty_of(T::kind())
    }

    /// An empty sequence of the given element kind.
    #[must_use]
    pub fn empty_of(element: ElementKind) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Builds a sequence from Rust values, typed by `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if any value has no C# representation
    /// (for example a `char` outside the Basic Multilingual Plane).
    pub fn of<T, I>(items: I) -> Result<Self, ArgumentError>
    where
        T: ScalarType,
        I: IntoIterator<Item = T>,
    {
        let items = items
            .into_iter()
            .map(ScalarType::into_scalar)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            element: T::kind(),
            items,
        })
    }

    /// Builds a sequence of members of one enumeration.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if the enum type or any member name is
    /// not valid C#.
    pub fn of_enum<I, S>(enum_type: &str, members: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let element = ElementKind::Enum(QualifiedName::new(enum_type, NameRole::EnumType)?);
        let items = members
            .into_iter()
            .map(|member| EnumValue::new(enum_type, member.as_ref()).map(Scalar::Enum))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { element, items })
    }

    /// Builds a sequence of an explicit element kind, checking every item.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MixedSequence`] for the first item whose kind
    /// differs from `element`.
    pub fn new<I>(element: ElementKind, items: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = Scalar>,
    {
        let items: Vec<Scalar> = items.into_iter().collect();
        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| !item.is_kind(&element))
        {
            let found = item.kind();
            tracing::debug!(%element, %found, index, "rejected mixed-kind sequence");
            return Err(ArgumentError::MixedSequence {
                expected: element,
                found,
                index,
            });
        }
        Ok(Self { element, items })
    }

    /// Builds a sequence whose element kind is taken from its first item.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::UntypedEmptySequence`] when `items` is empty
    /// and [`ArgumentError::MixedSequence`] when the items disagree.
    pub fn infer<I>(items: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = Scalar>,
    {
        let items: Vec<Scalar> = items.into_iter().collect();
        match items.first() {
            Some(first) => Self::new(first.kind(), items),
            None => Err(ArgumentError::UntypedEmptySequence),
        }
    }

    /// The declared element kind.
    #[must_use]
    pub fn element(&self) -> &ElementKind {
        &self.element
    }

    /// The items, in order.
    #[must_use]
    pub fn items(&self) -> &[Scalar] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the sequence has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct SequenceRepr {
    element: ElementKind,
    items: Vec<Scalar>,
}

#[cfg(feature = "serde")]
impl TryFrom<SequenceRepr> for Sequence {
    type Error = ArgumentError;

    fn try_from(repr: SequenceRepr) -> Result<Self, Self::Error> {
        Sequence::new(repr.element, repr.items)
    }
}

#[cfg(feature = "serde")]
impl From<Sequence> for SequenceRepr {
    fn from(sequence: Sequence) -> Self {
        SequenceRepr {
            element: sequence.element,
            items: sequence.items,
        }
    }
}
