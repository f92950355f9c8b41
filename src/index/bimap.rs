use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

/// Two hash maps kept in lockstep so that every key has exactly one value and every
/// value exactly one key.
#[derive(Debug, Clone)]
pub struct BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    forward: HashMap<K, V, RandomState>,
    reverse: HashMap<V, K, RandomState>,
}

impl<K, V> Default for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            forward: HashMap::default(),
            reverse: HashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            reverse: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Insert the pair only if neither side is already mapped.
    ///
    /// Return
    /// ------
    /// * `true` if the pair was inserted, `false` if the key or the value was already present
    pub fn try_insert(&mut self, key: K, value: V) -> bool {
        if self.forward.contains_key(&key) || self.reverse.contains_key(&value) {
            return false;
        }
        self.forward.insert(key.clone(), value.clone());
        self.reverse.insert(value, key);
        true
    }

    pub fn get_by_key<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key)
    }

    pub fn get_by_value<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.reverse.get(value)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
