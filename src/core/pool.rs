//! Bounded slot arena for pooled entities.

use std::cmp::Ordering;

/// Fixed-capacity slot arena.
///
/// Slots grow up to `capacity`; past that, an insert replaces the slot that
/// ranks lowest under the caller's key, so the hot loop never reallocates.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Store `item` and return its slot index. When full, the existing slot
    /// with the smallest `rank` is replaced; ties go to the lowest index.
    pub fn insert_by<K, F>(&mut self, item: T, rank: F) -> usize
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        if self.slots.len() < self.capacity {
            self.slots.push(item);
            return self.slots.len() - 1;
        }
        let slot = self
            .slots
            .iter()
            .map(&rank)
            .enumerate()
            .min_by(|(ia, a), (ib, b)| {
                a.partial_cmp(b)
                    .unwrap_or(Ordering::Equal)
                    .then(ia.cmp(ib))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.slots[slot] = item;
        slot
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}
