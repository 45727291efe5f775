//! Keyed registry that deduplicates values and can be frozen

use indexmap::IndexMap;
use log::debug;
use std::fmt::Debug;
use std::hash::Hash;

/// Write policy for [`StyleInterner::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The key must not exist
    Create,
    /// The key must exist
    Update,
    /// Works like a plain map insert
    CreateOrUpdate,
}

/// Mode-checked key/value registry.
///
/// Once frozen, no new key is accepted; existing keys may still be
/// updated if the mode allows it. Rejections are reported through the
/// `bool` result and logged at debug level, never as errors.
#[derive(Debug, Clone)]
pub struct StyleInterner<K, V> {
    value_by_key: IndexMap<K, V>,
    frozen: bool,
}

impl<K, V> StyleInterner<K, V>
where
    K: Eq + Hash + Debug,
{
    pub fn new() -> Self {
        StyleInterner {
            value_by_key: IndexMap::new(),
            frozen: false,
        }
    }

    /// Write `value` under `key` if `mode` allows it. Returns `true` if stored.
    pub fn add(&mut self, key: K, value: V, mode: Mode) -> bool {
        let exists = self.value_by_key.contains_key(&key);
        match (exists, mode) {
            (false, Mode::Update) => {
                debug!("interner: update of missing key {:?} rejected", key);
                return false;
            }
            (true, Mode::Create) => {
                debug!("interner: create of existing key {:?} rejected", key);
                return false;
            }
            _ => {}
        }

        if self.frozen && !exists {
            debug!("interner: frozen, new key {:?} rejected", key);
            return false;
        }

        self.value_by_key.insert(key, value);
        true
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.value_by_key.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.value_by_key.contains_key(key)
    }

    /// Refuse every key that is not already present
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.value_by_key.values()
    }

    pub fn len(&self) -> usize {
        self.value_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_by_key.is_empty()
    }
}

impl<K, V> Default for StyleInterner<K, V>
where
    K: Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
