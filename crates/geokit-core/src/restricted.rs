//! # RestrictedMap — Key-Restricted Mutable Mapping
//!
//! A key/value container whose key set is fixed at construction and only
//! grows or shrinks through explicit `register()` and `remove()` calls.
//! `update()` can change values but never introduces a key.
//!
//! ## Invariants
//!
//! - The valid-key set and the stored values are one `IndexMap`; a key is
//!   valid if and only if it has a value.
//! - Enumeration follows registration order: construction order first, then
//!   `register()` order. `remove()` keeps the order of the remaining keys.
//! - `update()` and `register()` validate the full batch before mutating.
//!   On error nothing has been written.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::NamespaceError;

/// Iterator over the keys of a `RestrictedMap`, in registration order.
pub type Keys<'a, K, V> = indexmap::map::Keys<'a, K, V>;

/// Iterator over the values of a `RestrictedMap`, aligned with [`Keys`].
pub type Values<'a, K, V> = indexmap::map::Values<'a, K, V>;

/// Iterator over `(key, value)` pairs of a `RestrictedMap`.
pub type Entries<'a, K, V> = indexmap::map::Iter<'a, K, V>;

/// A mutable mapping whose set of valid keys is fixed until explicitly
/// changed with [`register`](Self::register) or [`remove`](Self::remove).
///
/// Serializes as a plain map in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "K: Deserialize<'de> + Hash + Eq, V: Deserialize<'de>"))]
pub struct RestrictedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> RestrictedMap<K, V> {
    /// Create a map where every supplied key becomes a valid key.
    ///
    /// If a key is supplied more than once the last value is kept, at the
    /// position of the first occurrence.
    pub fn new<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: initial.into_iter().collect(),
        }
    }

    /// Number of valid keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is a valid key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Look up the current value for `key`.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` if `key` is not registered.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, NamespaceError<K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.entries
            .get(key)
            .ok_or_else(|| NamespaceError::UnknownKey(key.to_owned()))
    }

    /// Remove `key` and its value, returning the value.
    ///
    /// The key must be registered again before it can be updated.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` if `key` is not registered.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, NamespaceError<K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.entries
            .shift_remove(key)
            .ok_or_else(|| NamespaceError::UnknownKey(key.to_owned()))
    }

    /// The valid keys, in registration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.entries.keys()
    }

    /// The stored values, in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> Values<'_, K, V> {
        self.entries.values()
    }

    /// Each key paired with its value. Every call starts a fresh pass.
    pub fn entries(&self) -> Entries<'_, K, V> {
        self.entries.iter()
    }

    /// Alias for [`entries`](Self::entries).
    pub fn iter(&self) -> Entries<'_, K, V> {
        self.entries()
    }

    /// An independent copy of the current key/value associations.
    pub fn to_mapping(&self) -> IndexMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone()
    }

    /// Consume the map and return its key/value associations.
    pub fn into_mapping(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: Hash + Eq + fmt::Debug, V> RestrictedMap<K, V> {
    /// Overwrite the value of every key in `changes`.
    ///
    /// The whole batch is checked first; if any key is unknown nothing is
    /// written. A key repeated within the batch keeps its last value.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` naming the first unregistered key.
    pub fn update<I>(&mut self, changes: I) -> Result<(), NamespaceError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut changes: Vec<(K, V)> = changes.into_iter().collect();

        if let Some(pos) = changes
            .iter()
            .position(|(key, _)| !self.entries.contains_key(key))
        {
            let (key, _) = changes.swap_remove(pos);
            tracing::debug!(?key, "rejected update for unregistered key");
            return Err(NamespaceError::UnknownKey(key));
        }

        for (key, value) in changes {
            if let Some(slot) = self.entries.get_mut(&key) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Overwrite the value of a single registered key, returning the
    /// previous value.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` if `key` is not registered.
    pub fn set(&mut self, key: K, value: V) -> Result<V, NamespaceError<K>> {
        match self.entries.get_mut(&key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => {
                tracing::debug!(?key, "rejected update for unregistered key");
                Err(NamespaceError::UnknownKey(key))
            }
        }
    }

    /// Add new keys with their values.
    ///
    /// The whole batch is checked first. A key that is already registered,
    /// or that appears twice in the batch, rejects the batch.
    ///
    /// # Errors
    ///
    /// `NamespaceError::DuplicateKey` naming the first clashing key.
    pub fn register<I>(&mut self, new_entries: I) -> Result<(), NamespaceError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut additions: Vec<(K, V)> = new_entries.into_iter().collect();

        let clash = additions.iter().enumerate().position(|(i, (key, _))| {
            self.entries.contains_key(key)
                || additions[..i].iter().any(|(earlier, _)| earlier == key)
        });
        if let Some(pos) = clash {
            let (key, _) = additions.swap_remove(pos);
            tracing::debug!(?key, "rejected registration of existing key");
            return Err(NamespaceError::DuplicateKey(key));
        }

        self.entries.extend(additions);
        Ok(())
    }
}

impl<K, V> Default for RestrictedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

/// Two maps are equal when they hold the same keys with equal values.
/// Registration order is not compared.
impl<K: Hash + Eq, V: PartialEq> PartialEq for RestrictedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.entries.get(key).is_some_and(|o| o == value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for RestrictedMap<K, V> {}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RestrictedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Namespace: ")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(">")
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for RestrictedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<K: Hash + Eq, V> From<IndexMap<K, V>> for RestrictedMap<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        Self { entries }
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for RestrictedMap<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::new(pairs)
    }
}

impl<K, V> IntoIterator for RestrictedMap<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a RestrictedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> RestrictedMap<&'static str, i32> {
        RestrictedMap::from([("a", 1), ("b", 2), ("c", 3)])
    }

    #[test]
    fn test_construct_registers_every_key() {
        let m = abc();
        assert_eq!(m.len(), 3);
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(m.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_construct_repeated_key_keeps_last_value() {
        let m = RestrictedMap::new([("a", 1), ("b", 2), ("a", 7)]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&"a"), Ok(&7));
        assert_eq!(m.keys().next(), Some(&"a"));
    }

    #[test]
    fn test_update_known_key() {
        let mut m = abc();
        m.update([("a", 5)]).unwrap();
        assert_eq!(m.get(&"a"), Ok(&5));
        assert_eq!(m.get(&"b"), Ok(&2));
    }

    #[test]
    fn test_update_unknown_key_rejected() {
        let mut m = abc();
        assert_eq!(m.update([("z", 0)]), Err(NamespaceError::UnknownKey("z")));
        assert_eq!(m, abc());
    }

    #[test]
    fn test_update_batch_is_all_or_nothing() {
        let mut m = abc();
        let err = m.update([("a", 10), ("z", 0), ("b", 20)]).unwrap_err();
        assert_eq!(err, NamespaceError::UnknownKey("z"));
        assert_eq!(m.get(&"a"), Ok(&1));
        assert_eq!(m.get(&"b"), Ok(&2));
    }

    #[test]
    fn test_update_repeated_key_last_wins() {
        let mut m = abc();
        m.update([("c", 4), ("c", 9)]).unwrap();
        assert_eq!(m.get(&"c"), Ok(&9));
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut m = abc();
        assert_eq!(m.set("b", 22), Ok(2));
        assert_eq!(m.get(&"b"), Ok(&22));
        assert_eq!(m.set("q", 1), Err(NamespaceError::UnknownKey("q")));
    }

    #[test]
    fn test_register_new_key() {
        let mut m = abc();
        m.register([("d", 4)]).unwrap();
        assert_eq!(m.get(&"d"), Ok(&4));
        assert_eq!(m.keys().last(), Some(&"d"));
    }

    #[test]
    fn test_register_existing_key_rejected() {
        let mut m = abc();
        m.register([("d", 4)]).unwrap();
        assert_eq!(m.register([("d", 9)]), Err(NamespaceError::DuplicateKey("d")));
        assert_eq!(m.get(&"d"), Ok(&4));
    }

    #[test]
    fn test_register_repeated_within_batch_rejected() {
        let mut m = abc();
        assert_eq!(
            m.register([("e", 1), ("f", 2), ("e", 3)]),
            Err(NamespaceError::DuplicateKey("e"))
        );
        assert!(!m.contains_key(&"e"));
        assert!(!m.contains_key(&"f"));
    }

    #[test]
    fn test_remove_then_get_fails() {
        let mut m = abc();
        assert_eq!(m.remove(&"b"), Ok(2));
        assert_eq!(m.get(&"b"), Err(NamespaceError::UnknownKey("b")));
        assert_eq!(m.update([("b", 1)]), Err(NamespaceError::UnknownKey("b")));
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_key() {
        let mut m = abc();
        assert_eq!(m.remove(&"nope"), Err(NamespaceError::UnknownKey("nope")));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_removed_key_can_be_registered_again() {
        let mut m = abc();
        m.remove(&"a").unwrap();
        m.register([("a", 100)]).unwrap();
        assert_eq!(m.get(&"a"), Ok(&100));
    }

    #[test]
    fn test_entries_restartable_and_aligned() {
        let m = abc();
        let first: Vec<_> = m.entries().collect();
        let second: Vec<_> = m.iter().collect();
        assert_eq!(first, second);
        let zipped: Vec<_> = m.keys().zip(m.values()).collect();
        assert_eq!(first, zipped);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut m = abc();
        let snap = m.to_mapping();
        m.update([("a", 50)]).unwrap();
        assert_eq!(snap.get("a"), Some(&1));
    }

    #[test]
    fn test_equality_ignores_order() {
        let m = abc();
        let reordered = RestrictedMap::from([("c", 3), ("a", 1), ("b", 2)]);
        assert_eq!(m, reordered);
        assert_eq!(reordered, m);
    }

    #[test]
    fn test_equality_detects_differences() {
        let m = abc();
        assert_ne!(m, RestrictedMap::from([("a", 1), ("b", 2)]));
        assert_ne!(m, RestrictedMap::from([("a", 1), ("b", 2), ("c", 4)]));
        assert_ne!(m, RestrictedMap::from([("a", 1), ("b", 2), ("d", 3)]));
    }

    #[test]
    fn test_display() {
        assert_eq!(abc().to_string(), "<Namespace: a=1, b=2, c=3>");
        assert_eq!(RestrictedMap::<&str, i32>::default().to_string(), "<Namespace: >");
    }

    #[test]
    fn test_string_keys_lookup_by_str() {
        let mut m: RestrictedMap<String, i32> = RestrictedMap::from([("width".to_string(), 2)]);
        assert_eq!(m.get("width"), Ok(&2));
        assert_eq!(
            m.get("height"),
            Err(NamespaceError::UnknownKey("height".to_string()))
        );
        assert_eq!(m.remove("width"), Ok(2));
        assert!(m.is_empty());
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let m = RestrictedMap::from([("z".to_string(), 1), ("a".to_string(), 2)]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"z":1,"a":2}"#);
        let back: RestrictedMap<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.keys().next().map(String::as_str), Some("z"));
    }
}
