//! The attribute block applied to one generated declaration.

use featuregen_descriptor::{AttributeDescriptor, RenderOptions};
use indexmap::IndexSet;

/// Descriptors applied to one declaration, in insertion order, without
/// duplicates.
///
/// Two descriptors are duplicates when they compare equal, so the same
/// attribute built twice (or with its named arguments in another order) is
/// emitted once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    items: IndexSet<AttributeDescriptor>,
}

impl AttributeList {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `attribute` unless an equal descriptor is already present.
    ///
    /// Returns true if the descriptor was added.
    pub fn push(&mut self, attribute: AttributeDescriptor) -> bool {
        let full_name = attribute.full_name();
        let added = self.items.insert(attribute);
        if !added {
            tracing::trace!(attribute = %full_name, "skipped duplicate attribute");
        }
        added
    }

    /// Returns true if an equal descriptor is present.
    #[must_use]
    pub fn contains(&self, attribute: &AttributeDescriptor) -> bool {
        self.items.contains(attribute)
    }

    /// Number of distinct descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the descriptors in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &AttributeDescriptor> {
        self.items.iter()
    }

    /// Renders each descriptor as one line of attribute-application text.
    #[must_use]
    pub fn render_lines(&self, options: &RenderOptions) -> Vec<String> {
        self.items
            .iter()
            .map(|attribute| attribute.render_with(options))
            .collect()
    }
}

impl Extend<AttributeDescriptor> for AttributeList {
    fn extend<I: IntoIterator<Item = AttributeDescriptor>>(&mut self, iter: I) {
        for attribute in iter {
            self.push(attribute);
        }
    }
}

impl FromIterator<AttributeDescriptor> for AttributeList {
    fn from_iter<I: IntoIterator<Item = AttributeDescriptor>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a AttributeDescriptor;
    type IntoIter = indexmap::set::Iter<'a, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
