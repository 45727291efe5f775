//! Sparse, index-addressable list used for cells in a row and rows in a table

/// Growable list of optional slots with a "used size" watermark.
///
/// An unassigned slot reads as `None`, which is distinct from any stored
/// value: a stored void cell is still `Some`.
#[derive(Debug, Clone)]
pub struct SlotList<T> {
    slots: Vec<Option<T>>,
    used_size: usize,
}

impl<T> SlotList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        SlotList {
            slots: Vec::new(),
            used_size: 0,
        }
    }

    /// Create an empty list with room for `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        SlotList {
            slots: Vec::with_capacity(capacity),
            used_size: 0,
        }
    }

    /// One past the highest index ever set
    #[inline]
    pub fn used_size(&self) -> usize {
        self.used_size
    }

    pub fn is_empty(&self) -> bool {
        self.used_size == 0
    }

    /// Get the value at `index`, `None` if the slot was never set (or taken)
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Store `value` at `index`, growing the list as needed
    pub fn set(&mut self, index: usize, value: T) {
        self.ensure_len(index + 1);
        self.slots[index] = Some(value);
        self.used_size = self.used_size.max(index + 1);
    }

    /// Get the value at `index`, creating it with `f` if the slot is empty
    pub fn get_or_insert_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.ensure_len(index + 1);
        self.used_size = self.used_size.max(index + 1);
        self.slots[index].get_or_insert_with(f)
    }

    /// Move the value out of `index`. The used size is left untouched.
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Iterate over slots `0..used_size`
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        (0..self.used_size).map(move |i| self.get(i))
    }

    fn ensure_len(&mut self, len: usize) {
        if self.slots.len() < len {
            self.slots.resize_with(len, || None);
        }
    }
}

impl<T> Default for SlotList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_slots_are_absent() {
        let list: SlotList<u32> = SlotList::with_capacity(10);
        assert_eq!(list.used_size(), 0);
        assert!(list.get(0).is_none());
        assert!(list.get(100).is_none());
    }

    #[test]
    fn test_set_updates_used_size() {
        let mut list = SlotList::new();
        list.set(4, "e");
        assert_eq!(list.used_size(), 5);
        assert_eq!(list.get(4), Some(&"e"));
        assert!(list.get(2).is_none());

        list.set(1, "b");
        assert_eq!(list.used_size(), 5);

        list.set(9, "j");
        assert_eq!(list.used_size(), 10);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut list = SlotList::new();
        *list.get_or_insert_with(3, || 0) += 5;
        *list.get_or_insert_with(3, || 100) += 1;
        assert_eq!(list.get(3), Some(&6));
        assert_eq!(list.used_size(), 4);
    }

    #[test]
    fn test_take_keeps_used_size() {
        let mut list = SlotList::new();
        list.set(0, 1);
        list.set(2, 3);
        assert_eq!(list.take(2), Some(3));
        assert_eq!(list.take(2), None);
        assert_eq!(list.used_size(), 3);
        let collected: Vec<_> = list.iter().map(|v| v.copied()).collect();
        assert_eq!(collected, vec![Some(1), None, None]);
    }
}
