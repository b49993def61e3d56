//! Build-once tables mapping a finite block-state key to precomputed geometry.

use std::fmt::Debug;
use std::marker::PhantomData;

use blockray_core::Facing;
use tracing::debug;

use crate::model::Model;

/// Finite block-state key with a dense index.
pub trait StateKey: Copy + Debug {
    /// Number of distinct keys.
    const COUNT: usize;

    /// Dense index in `0..COUNT`.
    fn index(self) -> usize;

    /// Inverse of [`StateKey::index`].
    fn from_index(index: usize) -> Self;
}

impl StateKey for Facing {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        Facing::index(self)
    }

    fn from_index(index: usize) -> Self {
        Facing::ALL[index]
    }
}

impl StateKey for bool {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        usize::from(self)
    }

    fn from_index(index: usize) -> Self {
        index != 0
    }
}

/// Precomputed geometry for every value of a state key.
///
/// Built once by evaluating a builder for each key; afterwards lookups are
/// plain indexing and the table is shared read-only.
#[derive(Debug, Clone)]
pub struct VariantTable<K: StateKey, V = Model> {
    name: &'static str,
    entries: Vec<V>,
    _key: PhantomData<fn(K)>,
}

impl<K: StateKey, V> VariantTable<K, V> {
    /// Evaluate `builder` for every key in index order.
    pub fn build(name: &'static str, mut builder: impl FnMut(K) -> V) -> Self {
        let entries: Vec<V> = (0..K::COUNT)
            .map(|index| {
                let key = K::from_index(index);
                debug_assert_eq!(key.index(), index, "{name}: key {key:?} does not round-trip");
                builder(key)
            })
            .collect();
        debug!(table = name, variants = entries.len(), "built variant table");
        Self {
            name,
            entries,
            _key: PhantomData,
        }
    }

    /// Geometry for `key`.
    ///
    /// # Panics
    ///
    /// If the key's index falls outside the table, which means the key type
    /// is inconsistent with its own `COUNT`.
    pub fn lookup(&self, key: K) -> &V {
        let index = key.index();
        assert!(
            index < self.entries.len(),
            "{}: state {key:?} outside table of {}",
            self.name,
            self.entries.len()
        );
        &self.entries[index]
    }

    /// Table name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the key space is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, entry)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (K::from_index(index), entry))
    }
}
