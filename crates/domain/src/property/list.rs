//! Ordered, key-unique property container.

use super::Property;
use crate::error::{DomainError, DomainResult};

/// An ordered sequence of [`Property`] values with unique keys.
///
/// Adding a property whose key is already present replaces the existing entry
/// at its current position, so at most one entry can lack a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyList {
    entries: Vec<Property>,
}

impl PropertyList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a list from properties, applying replace-or-append to each.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NullKeyValue`] if a property has neither key nor value.
    pub fn try_from_iter(properties: impl IntoIterator<Item = Property>) -> DomainResult<Self> {
        let mut list = Self::new();
        for property in properties {
            list.add(property)?;
        }
        Ok(list)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(Property::key)
    }

    /// Returns the entry with the given key. `None` matches the keyless entry.
    #[must_use]
    pub fn get(&self, key: Option<&str>) -> Option<&Property> {
        self.entries.iter().find(|p| p.has_key(key))
    }

    /// Sets the value of the entry with the given key, keeping its type and
    /// description. Returns false when no entry has that key.
    pub fn set_value(&mut self, key: Option<&str>, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|p| p.has_key(key)) {
            Some(property) => {
                property.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Changes the key of an entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if no entry has key `from`,
    /// [`DomainError::DuplicateVariableKey`] if another entry already uses `to`
    /// and [`DomainError::NullKeyValue`] when dropping the key of an entry
    /// without a value.
    pub fn rename(&mut self, from: Option<&str>, to: Option<&str>) -> DomainResult<()> {
        let index = self
            .position(from)
            .ok_or_else(|| DomainError::NotFound(format!("property {}", from.unwrap_or(""))))?;
        if from == to {
            return Ok(());
        }
        if self.position(to).is_some() {
            return Err(DomainError::DuplicateVariableKey(
                to.unwrap_or_default().to_string(),
            ));
        }
        let entry = &mut self.entries[index];
        if to.is_none() && entry.value.is_none() {
            return Err(DomainError::NullKeyValue);
        }
        entry.key = to.map(str::to_owned);
        Ok(())
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.get(Some(key)).and_then(Property::value)
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Property> {
        self.entries.get(index)
    }

    /// Returns true if an entry with the given key exists.
    #[must_use]
    pub fn contains_key(&self, key: Option<&str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if a structurally equal entry exists.
    #[must_use]
    pub fn contains(&self, property: &Property) -> bool {
        self.entries.iter().any(|p| p == property)
    }

    /// Returns the position of the entry sharing `property`'s key.
    #[must_use]
    pub fn index_of(&self, property: &Property) -> Option<usize> {
        self.position(property.key())
    }

    /// Adds a property, replacing an entry with the same key in place.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NullKeyValue`] if the property has neither key nor value.
    pub fn add(&mut self, property: Property) -> DomainResult<bool> {
        if property.key.is_none() && property.value.is_none() {
            return Err(DomainError::NullKeyValue);
        }
        self.upsert(property);
        Ok(true)
    }

    /// Places `property` at `index`.
    ///
    /// When the key is already present at another position, that occurrence is
    /// removed and the property is inserted at `index`. Otherwise the entry at
    /// `index` is replaced, or the property is appended when `index == len`.
    /// Returns the entry that was displaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index > len` and
    /// [`DomainError::NullKeyValue`] for a property with neither key nor value.
    pub fn set(&mut self, index: usize, property: Property) -> DomainResult<Option<Property>> {
        let len = self.entries.len();
        if index > len {
            return Err(DomainError::IndexOutOfRange { index, len });
        }
        if property.key.is_none() && property.value.is_none() {
            return Err(DomainError::NullKeyValue);
        }

        match self.position(property.key()) {
            Some(existing) if existing != index => {
                let old = self.entries.remove(existing);
                let at = index.min(self.entries.len());
                self.entries.insert(at, property);
                Ok(Some(old))
            }
            _ if index == len => {
                self.entries.push(property);
                Ok(None)
            }
            _ => Ok(Some(std::mem::replace(&mut self.entries[index], property))),
        }
    }

    /// Removes the first entry with the given key.
    pub fn remove(&mut self, key: Option<&str>) -> Option<Property> {
        self.position(key).map(|index| self.entries.remove(index))
    }

    /// Removes the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if there is no entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<Property> {
        let len = self.entries.len();
        if index >= len {
            return Err(DomainError::IndexOutOfRange { index, len });
        }
        Ok(self.entries.remove(index))
    }

    /// Merges `other` into this list using replace-or-append per entry.
    ///
    /// Returns true if any entry was added or replaced.
    pub fn add_all(&mut self, other: &Self) -> bool {
        for property in &other.entries {
            self.upsert(property.clone());
        }
        !other.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, key: Option<&str>) -> Option<usize> {
        self.entries.iter().position(|p| p.has_key(key))
    }

    fn upsert(&mut self, property: Property) {
        match self.position(property.key()) {
            Some(index) => self.entries[index] = property,
            None => self.entries.push(property),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(pairs: &[(&str, &str)]) -> PropertyList {
        PropertyList::try_from_iter(pairs.iter().map(|(k, v)| Property::new(*k, *v))).unwrap()
    }

    fn keys(list: &PropertyList) -> Vec<&str> {
        list.keys().map(Option::unwrap_or_default).collect()
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut props = list(&[("a", "1"), ("b", "2"), ("c", "3")]);
        props.add(Property::new("b", "20")).unwrap();

        assert_eq!(props.len(), 3);
        assert_eq!(props.index_of(&Property::with_key("b")), Some(1));
        assert_eq!(props.value_of("b"), Some("20"));
    }

    #[test]
    fn test_add_rejects_null_key_and_value() {
        let mut props = PropertyList::new();
        assert_eq!(
            props.add(Property::default()),
            Err(DomainError::NullKeyValue)
        );
        assert!(props.is_empty());
    }

    #[test]
    fn test_single_keyless_entry() {
        let mut props = PropertyList::new();
        props.add(Property::from_parts(None, Some("one".into()))).unwrap();
        props.add(Property::from_parts(None, Some("two".into()))).unwrap();

        assert_eq!(props.len(), 1);
        assert_eq!(props.get(None).and_then(Property::value), Some("two"));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut props = list(&[("a", "1")]);
        assert!(props.remove(Some("zzz")).is_none());
        assert_eq!(props.len(), 1);
        assert_eq!(props.remove(Some("a")), Some(Property::new("a", "1")));
        assert!(props.is_empty());
    }

    #[test]
    fn test_set_replaces_by_position() {
        let mut props = list(&[("a", "1"), ("b", "2")]);
        let old = props.set(0, Property::new("x", "9")).unwrap();

        assert_eq!(old, Some(Property::new("a", "1")));
        assert_eq!(keys(&props), vec!["x", "b"]);
    }

    #[test]
    fn test_set_moves_existing_key_to_index() {
        let mut props = list(&[("a", "1"), ("b", "2"), ("c", "3")]);
        props.set(0, Property::new("c", "30")).unwrap();

        assert_eq!(keys(&props), vec!["c", "a", "b"]);
        assert_eq!(props.value_of("c"), Some("30"));
    }

    #[test]
    fn test_set_appends_at_len_and_rejects_beyond() {
        let mut props = list(&[("a", "1")]);
        assert_eq!(props.set(1, Property::new("b", "2")).unwrap(), None);
        assert_eq!(
            props.set(5, Property::new("c", "3")),
            Err(DomainError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_add_all_merges_preserving_left_order() {
        let mut left = list(&[("a", "1"), ("b", "2")]);
        let right = list(&[("c", "3"), ("a", "10")]);

        assert!(left.add_all(&right));
        assert_eq!(keys(&left), vec!["a", "b", "c"]);
        assert_eq!(left.value_of("a"), Some("10"));
    }

    #[test]
    fn test_set_value_keeps_key_and_type() {
        let mut props = PropertyList::new();
        props.add(Property::boolean("flag", false)).unwrap();

        assert!(props.set_value(Some("flag"), "true"));
        assert!(!props.set_value(Some("missing"), "x"));
        assert_eq!(props.get(Some("flag")), Some(&Property::boolean("flag", true)));
    }

    #[test]
    fn test_rename_rejects_existing_key() {
        let mut props = list(&[("a", "1"), ("b", "2")]);

        assert_eq!(
            props.rename(Some("a"), Some("b")),
            Err(DomainError::DuplicateVariableKey("b".into()))
        );
        assert_eq!(keys(&props), vec!["a", "b"]);

        props.rename(Some("a"), Some("c")).unwrap();
        assert_eq!(keys(&props), vec!["c", "b"]);
        assert_eq!(props.value_of("c"), Some("1"));
        assert!(matches!(
            props.rename(Some("a"), Some("d")),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_index_of_is_key_based() {
        let props = list(&[("a", "1"), ("b", "2")]);
        assert_eq!(props.index_of(&Property::new("b", "different")), Some(1));
        assert!(!props.contains(&Property::new("b", "different")));
        assert!(props.contains(&Property::new("b", "2")));
    }
}
