//! Event-to-destination lookup used by states and by the any-state table.

use std::collections::HashMap;
use std::hash::Hash;

/// Mapping from event identifier to destination kind.
///
/// Keys are unique. The table never overwrites: registration code checks
/// [`TransitionTable::get`] first and reports a duplicate instead.
#[derive(Clone, Debug)]
pub struct TransitionTable<K, E> {
    entries: HashMap<E, K>,
}

impl<K: Copy, E: Copy + Eq + Hash> TransitionTable<K, E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Destination registered for `event`.
    pub fn get(&self, event: &E) -> Option<K> {
        self.entries.get(event).copied()
    }

    /// Check if `event` has a destination.
    pub fn contains(&self, event: &E) -> bool {
        self.entries.contains_key(event)
    }

    /// Insert `event -> to`.
    ///
    /// Returns the existing destination, leaving the table untouched, if
    /// `event` is already present.
    pub(crate) fn insert(&mut self, event: E, to: K) -> Result<(), K> {
        if let Some(existing) = self.get(&event) {
            return Err(existing);
        }
        self.entries.insert(event, to);
        Ok(())
    }

    /// All `(event, destination)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (E, K)> + '_ {
        self.entries.iter().map(|(event, to)| (*event, *to))
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no event is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy, E: Copy + Eq + Hash> Default for TransitionTable<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_destination() {
        let mut table: TransitionTable<&str, u8> = TransitionTable::new();
        table.insert(1, "MoveForward").unwrap();
        table.insert(2, "Rotation").unwrap();

        assert_eq!(table.get(&1), Some("MoveForward"));
        assert_eq!(table.get(&2), Some("Rotation"));
        assert_eq!(table.get(&3), None);
        assert!(table.contains(&1));
        assert!(!table.contains(&3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_insert_is_rejected_without_mutation() {
        let mut table: TransitionTable<&str, u8> = TransitionTable::new();
        table.insert(1, "MoveForward").unwrap();

        assert_eq!(table.insert(1, "End"), Err("MoveForward"));
        assert_eq!(table.get(&1), Some("MoveForward"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn iter_yields_every_pair() {
        let mut table: TransitionTable<char, u8> = TransitionTable::default();
        assert!(table.is_empty());
        table.insert(0, 'a').unwrap();
        table.insert(5, 'b').unwrap();

        let mut pairs: Vec<_> = table.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![(0, 'a'), (5, 'b')]);
    }
}
