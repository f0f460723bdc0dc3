//! Fixed-capacity object pool with stable keys and dense ids.
//!
//! Storage slots never move, so a key stays valid for the life of the object.
//! Separately, `live` lists the keys of all live objects; an object's dense id
//! is its position there. Deleting swaps the last live key into the hole, so
//! ids stay in `0..len` and the moved object takes over the deleted id.

/// Key type addressing one storage slot.
pub(crate) trait PoolKey: Copy + Eq + std::fmt::Debug {
    fn from_slot(slot: usize) -> Self;
    fn slot(self) -> usize;
}

/// Object stored in a pool; reset to `Default` when a slot is recycled.
pub(crate) trait Pooled: Default {
    fn id(&self) -> usize;
    fn set_id(&mut self, id: usize);
}

#[derive(Clone, Debug)]
pub(crate) struct Pool<K, T> {
    slots: Vec<T>,
    live: Vec<K>,
    free: Vec<K>,
    capacity: usize,
}

impl<K: PoolKey, T: Pooled> Pool<K, T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            free: Vec::new(),
            capacity,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when `n` more objects fit under the capacity bound.
    #[inline]
    pub(crate) fn has_room(&self, n: usize) -> bool {
        self.live.len() + n <= self.capacity
    }

    /// Allocate an empty object with the next dense id.
    pub(crate) fn create(&mut self) -> K {
        assert!(
            self.live.len() < self.capacity,
            "object pool exhausted (capacity {})",
            self.capacity
        );
        let key = match self.free.pop() {
            Some(key) => {
                self.slots[key.slot()] = T::default();
                key
            }
            None => {
                self.slots.push(T::default());
                K::from_slot(self.slots.len() - 1)
            }
        };
        self.slots[key.slot()].set_id(self.live.len());
        self.live.push(key);
        key
    }

    /// Release `key`; the last live object takes over its dense id.
    pub(crate) fn delete(&mut self, key: K) {
        assert!(self.is_live(key), "deleting a dead or stale pool key {key:?}");
        let id = self.slots[key.slot()].id();
        self.live.swap_remove(id);
        if let Some(&moved) = self.live.get(id) {
            self.slots[moved.slot()].set_id(id);
        }
        self.slots[key.slot()].set_id(usize::MAX);
        self.free.push(key);
    }

    #[inline]
    pub(crate) fn get(&self, key: K) -> &T {
        &self.slots[key.slot()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: K) -> &mut T {
        &mut self.slots[key.slot()]
    }

    /// Key of the object with dense id `id`.
    #[inline]
    pub(crate) fn key_at(&self, id: usize) -> K {
        self.live[id]
    }

    /// Live keys in dense-id order.
    #[inline]
    pub(crate) fn keys(&self) -> &[K] {
        &self.live
    }

    #[inline]
    pub(crate) fn is_live(&self, key: K) -> bool {
        let id = self.slots.get(key.slot()).map(|t| t.id());
        matches!(id, Some(id) if self.live.get(id) == Some(&key))
    }
}
