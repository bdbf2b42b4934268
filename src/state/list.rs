/// Ordered editable collection shared by the panel list and the staging list
///
/// Every operation consumes the list and returns the new value, so a caller
/// never sees its previous value change underneath it. All operations are
/// total: unknown keys and out-of-range indices leave the list as it was.

/// Items stored in an `OrderedList` expose a unique key
pub trait Keyed {
    type Key: Copy + Eq + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// An ordered sequence of items with unique keys
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> OrderedList<T> {
    /// Append items at the end, keeping their relative order.
    ///
    /// Items whose key is already present are skipped.
    #[must_use]
    pub fn append(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            if self.contains(item.key()) {
                tracing::warn!(key = ?item.key(), "skipping item with duplicate key");
                continue;
            }
            self.items.push(item);
        }
        self
    }

    /// Remove the entry with `key`. Removing a missing key is a no-op.
    #[must_use]
    pub fn remove(mut self, key: T::Key) -> Self {
        self.items.retain(|item| item.key() != key);
        self
    }

    /// Swap the entry at `index` with the one before it
    #[must_use]
    pub fn move_up(mut self, index: usize) -> Self {
        if index > 0 && index < self.items.len() {
            self.items.swap(index, index - 1);
        }
        self
    }

    /// Swap the entry at `index` with the one after it
    #[must_use]
    pub fn move_down(mut self, index: usize) -> Self {
        if index.saturating_add(1) < self.items.len() {
            self.items.swap(index, index + 1);
        }
        self
    }

    /// Apply `f` to the entry with `key`, if there is one
    #[must_use]
    pub fn update(mut self, key: T::Key, f: impl FnOnce(&mut T)) -> Self {
        if let Some(item) = self.items.iter_mut().find(|item| item.key() == key) {
            f(item);
        }
        self
    }

    /// Drop the current contents and install `items` instead
    #[must_use]
    pub fn replace_all(self, items: impl IntoIterator<Item = T>) -> Self {
        self.clear().append(items)
    }

    /// Remove every entry
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.items.clear();
        self
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.items.iter().any(|item| item.key() == key)
    }
}

#[cfg(test)]
impl<T: Keyed> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<T::Key> {
        self.items.iter().map(Keyed::key).collect()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<T> OrderedList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `index` is the final position (controls disable "move down")
    pub fn is_last(&self, index: usize) -> bool {
        !self.items.is_empty() && index == self.items.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        note: String,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32) -> Item {
        Item { id, note: String::new() }
    }

    fn list(ids: &[u32]) -> OrderedList<Item> {
        OrderedList::new().append(ids.iter().copied().map(item))
    }

    #[test]
    fn test_new_list_is_empty() {
        let list: OrderedList<Item> = OrderedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_append_keeps_prefix() {
        let before = list(&[1, 2]);
        let after = before.clone().append(vec![item(3), item(4)]);

        assert_eq!(after.len(), before.len() + 2);
        assert_eq!(after.keys(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_append_empty_is_noop() {
        let before = list(&[1, 2]);
        let after = before.clone().append(Vec::new());
        assert_eq!(after, before);
    }

    #[test]
    fn test_append_skips_duplicate_keys() {
        let after = list(&[1, 2]).append(vec![item(2), item(3), item(3)]);
        assert_eq!(after.keys(), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let once = list(&[1, 2, 3]).remove(2);
        let twice = once.clone().remove(2);

        assert_eq!(once.keys(), vec![1, 3]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let before = list(&[1, 2]);
        assert_eq!(before.clone().remove(9), before);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let original = list(&[1, 2, 3, 4]);
        for i in 1..original.len() {
            let round_trip = original.clone().move_up(i).move_down(i - 1);
            assert_eq!(round_trip, original);
        }
    }

    #[test]
    fn test_move_up_swaps_with_previous() {
        assert_eq!(list(&[1, 2, 3]).move_up(2).keys(), vec![1, 3, 2]);
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let original = list(&[1, 2, 3]);
        assert_eq!(original.clone().move_up(0), original);
        assert_eq!(original.clone().move_down(2), original);
    }

    #[test]
    fn test_move_out_of_bounds_is_noop() {
        let original = list(&[1, 2]);
        assert_eq!(original.clone().move_up(7), original);
        assert_eq!(original.clone().move_down(7), original);
        assert_eq!(original.clone().move_down(usize::MAX), original);

        let empty: OrderedList<Item> = OrderedList::new();
        assert!(empty.move_up(0).move_down(0).is_empty());
    }

    #[test]
    fn test_update_changes_only_matching_item() {
        let updated = list(&[1, 2]).update(2, |item| item.note = "hello".to_string());

        assert_eq!(updated.get(0).map(|i| i.note.as_str()), Some(""));
        assert_eq!(updated.get(1).map(|i| i.note.as_str()), Some("hello"));
    }

    #[test]
    fn test_update_missing_key_is_noop() {
        let before = list(&[1]);
        let after = before.clone().update(5, |item| item.note = "x".to_string());
        assert_eq!(after, before);
    }

    #[test]
    fn test_replace_all_and_clear() {
        let replaced = list(&[1, 2, 3]).replace_all(vec![item(7), item(8)]);
        assert_eq!(replaced.keys(), vec![7, 8]);
        assert!(replaced.clear().is_empty());
    }

    #[test]
    fn test_is_last() {
        let list = list(&[1, 2, 3]);
        assert!(!list.is_last(0));
        assert!(list.is_last(2));
        assert!(!list.is_last(3));
    }
}
