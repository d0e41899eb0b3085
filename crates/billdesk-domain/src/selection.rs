//! Transient item selection used while composing a bill.

/// Ordered mapping of inventory id to requested quantity.
///
/// Entries keep their first insertion position. Setting a quantity of zero or
/// less removes the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: Vec<(String, f64)>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity for `id`, removing it when `quantity <= 0`.
    pub fn set(&mut self, id: impl Into<String>, quantity: f64) {
        let id = id.into();
        let position = self.entries.iter().position(|(key, _)| *key == id);
        match (position, quantity > 0.0) {
            (Some(idx), true) => self.entries[idx].1 = quantity,
            (Some(idx), false) => {
                self.entries.remove(idx);
            }
            (None, true) => self.entries.push((id, quantity)),
            (None, false) => {}
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|(key, _)| key != id);
    }

    pub fn quantity(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, quantity)| *quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(key, quantity)| (key.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut selection = SelectionSet::new();
        for (id, quantity) in iter {
            selection.set(id, quantity);
        }
        selection
    }
}
