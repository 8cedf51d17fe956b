//! The attribute usage value object.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, NameRole};
use crate::identifier::{Identifier, QualifiedName};
use crate::render::{write_attribute, RenderOptions};
use crate::value::ArgumentValue;

/// One attribute usage: `[Namespace.Name(positional..., Named = value...)]`.
///
/// Descriptors are immutable. The `with_*` methods validate their input and
/// return a new descriptor, leaving the receiver untouched.
///
/// Equality compares the name, the namespace, the positional arguments in
/// order and the named arguments as a map, ignoring the order in which they
/// were attached. Rendering uses that attachment order.
///
/// ```
/// use featuregen_descriptor::{AttributeDescriptor, Sequence};
///
/// let attribute = AttributeDescriptor::new("Foo", "Bar")?
///     .with_positional_arguments([Sequence::of(["potato", "pancakes"])?])?;
/// assert_eq!(
///     attribute.to_string(),
///     r#"[Bar.Foo(new string[] {"potato", "pancakes"})]"#
/// );
/// # Ok::<(), featuregen_descriptor::ArgumentError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "DescriptorRepr", into = "DescriptorRepr")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: Identifier,
    namespace: QualifiedName,
    positional: Vec<ArgumentValue>,
    // IndexMap equality is order-insensitive; iteration keeps insertion order.
    named: IndexMap<Identifier, ArgumentValue>,
}

impl AttributeDescriptor {
    /// Creates a descriptor with no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyName`] / [`ArgumentError::EmptyNamespace`]
    /// for empty input, or an invalid-name error when either part is not
    /// legal C#.
    pub fn new(name: &str, namespace: &str) -> Result<Self, ArgumentError> {
        let build = || -> Result<Self, ArgumentError> {
            Ok(Self {
                name: Identifier::new(name, NameRole::AttributeName)?,
                namespace: QualifiedName::new(namespace, NameRole::Namespace)?,
                positional: Vec::new(),
                named: IndexMap::new(),
            })
        };
        build().inspect_err(|err| {
            tracing::debug!(name, namespace, error = %err, "rejected attribute descriptor");
        })
    }

    /// Returns a copy with `values` appended to the positional arguments.
    ///
    /// Accepts anything convertible into [`ArgumentValue`]: Rust scalars,
    /// `&str`/`String`, [`crate::EnumValue`], [`crate::TypeRef`],
    /// [`crate::Sequence`], or `ArgumentValue` itself for mixed lists.
    ///
    /// # Errors
    ///
    /// Returns the first conversion failure (for example a `char` outside
    /// the Basic Multilingual Plane); no arguments are attached in that case.
    pub fn with_positional_arguments<I>(&self, values: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator,
        I::Item: TryInto<ArgumentValue>,
        <I::Item as TryInto<ArgumentValue>>::Error: Into<ArgumentError>,
    {
        let mut next = self.clone();
        for value in values {
            next.positional.push(value.try_into().map_err(Into::into)?);
        }
        Ok(next)
    }

    /// Returns a copy with the `(name, value)` pairs merged into the named
    /// arguments.
    ///
    /// A name attached by an earlier call is overwritten and keeps its
    /// original position and spelling; new names are appended. Names are
    /// compared without their `@` prefix, so `@Foo` and `Foo` collide.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidIdentifier`] for an illegal name,
    /// [`ArgumentError::DuplicateArgumentName`] when `bag` repeats a name, or
    /// the first value conversion failure.
    pub fn with_named_arguments<I, K, V>(&self, bag: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: TryInto<ArgumentValue>,
        V::Error: Into<ArgumentError>,
    {
        let mut incoming: IndexMap<Identifier, ArgumentValue> = IndexMap::new();
        for (key, value) in bag {
            let key = Identifier::new(key.as_ref(), NameRole::ArgumentName)?;
            let value = value.try_into().map_err(Into::into)?;
            if incoming.contains_key(&key) {
                tracing::debug!(argument = %key, "rejected duplicate named argument");
                return Err(ArgumentError::DuplicateArgumentName(key.into()));
            }
            incoming.insert(key, value);
        }

        let mut next = self.clone();
        next.named.extend(incoming);
        Ok(next)
    }

    /// The attribute type name.
    #[must_use]
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// The namespace declaring the attribute type.
    #[must_use]
    pub fn namespace(&self) -> &QualifiedName {
        &self.namespace
    }

    /// `Namespace.Name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Positional (constructor) arguments, in order.
    #[must_use]
    pub fn positional_arguments(&self) -> &[ArgumentValue] {
        &self.positional
    }

    /// Named (property/field) arguments, in attachment order.
    pub fn named_arguments(&self) -> impl ExactSizeIterator<Item = (&Identifier, &ArgumentValue)> {
        self.named.iter()
    }

    /// Looks up a named argument; `@Name` and `Name` find the same entry.
    #[must_use]
    pub fn named_argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.named.get(name.strip_prefix('@').unwrap_or(name))
    }

    /// Returns true if any positional or named argument is attached.
    #[must_use]
    pub fn has_arguments(&self) -> bool {
        !self.positional.is_empty() || !self.named.is_empty()
    }

    /// Renders the attribute application, e.g. `[Bar.Foo("Fizz")]`.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Renders the attribute application with explicit options.
    #[must_use]
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        write_attribute(&mut out, self, options);
        out
    }
}

impl Hash for AttributeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.namespace.hash(state);
        self.positional.hash(state);

        // Commutative so that attachment order cannot change the hash.
        let named = self
            .named
            .iter()
            .map(|entry| {
                let mut hasher = DefaultHasher::new();
                entry.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, u64::wrapping_add);
        self.named.len().hash(state);
        named.hash(state);
    }
}

impl fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct DescriptorRepr {
    name: String,
    namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    positional: Vec<ArgumentValue>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    named: IndexMap<String, ArgumentValue>,
}

#[cfg(feature = "serde")]
impl TryFrom<DescriptorRepr> for AttributeDescriptor {
    type Error = ArgumentError;

    fn try_from(repr: DescriptorRepr) -> Result<Self, Self::Error> {
        AttributeDescriptor::new(&repr.name, &repr.namespace)?
            .with_positional_arguments(repr.positional)?
            .with_named_arguments(repr.named)
    }
}

#[cfg(feature = "serde")]
impl From<AttributeDescriptor> for DescriptorRepr {
    fn from(descriptor: AttributeDescriptor) -> Self {
        DescriptorRepr {
            name: descriptor.name.into(),
            namespace: descriptor.namespace.into(),
            positional: descriptor.positional,
            named: descriptor
                .named
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}
