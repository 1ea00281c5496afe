//! The flat output of cascade resolution.

/// A flat `property -> value` map for one block in one concrete context.
///
/// Pure resolution output, never persisted. Insertion order is preserved
/// so emitted CSS declarations follow the order properties were first
/// written, not a sort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    entries: Vec<(String, String)>,
}

impl ResolvedStyle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a property, keeping the original position on
    /// update.
    pub fn insert(&mut self, property: &str, value: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing == property)
        {
            entry.1 = value.to_owned();
        } else {
            self.entries.push((property.to_owned(), value.to_owned()));
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == property)
            .map(|(_, value)| value.as_str())
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ResolvedStyle {
    fn from_iter<Iterable: IntoIterator<Item = (String, String)>>(iterable: Iterable) -> Self {
        let mut style = Self::new();
        for (property, value) in iterable {
            style.insert(&property, &value);
        }
        style
    }
}
