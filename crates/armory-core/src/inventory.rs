//! Ordered item collection with stable handles.
//!
//! Items live in a [`SlotMap`] arena, so removing one item never moves or
//! invalidates another. Insertion order is kept by an intrusive doubly-linked
//! list threaded through the arena entries: appending, erasing and moving an
//! item to the tail are all O(1).

use crate::id::ItemHandle;
use crate::item::Item;
use slotmap::SlotMap;

#[derive(Debug, Clone)]
struct Entry {
    item: Item,
    prev: Option<ItemHandle>,
    next: Option<ItemHandle>,
}

/// The owned, ordered item collection.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: SlotMap<ItemHandle, Entry>,
    head: Option<ItemHandle>,
    tail: Option<ItemHandle>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item at the tail. Always succeeds.
    pub fn push_back(&mut self, item: Item) -> ItemHandle {
        let handle = self.entries.insert(Entry {
            item,
            prev: None,
            next: None,
        });
        self.link_back(handle);
        handle
    }

    /// Remove an item. Returns the item and the handle that followed it, so
    /// a removal traversal can continue. `None` if the handle is stale.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<(Item, Option<ItemHandle>)> {
        if !self.entries.contains_key(handle) {
            return None;
        }
        let next = self.unlink(handle);
        let entry = self.entries.remove(handle)?;
        Some((entry.item, next))
    }

    /// Splice an item to the tail (most recently touched end).
    /// Returns false if the handle is stale.
    pub fn move_to_back(&mut self, handle: ItemHandle) -> bool {
        if !self.entries.contains_key(handle) {
            return false;
        }
        if self.tail == Some(handle) {
            return true;
        }
        self.unlink(handle);
        self.link_back(handle);
        true
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        self.entries.get(handle).map(|entry| &entry.item)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        self.entries.get_mut(handle).map(|entry| &mut entry.item)
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.entries.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<ItemHandle> {
        self.head
    }

    pub fn last(&self) -> Option<ItemHandle> {
        self.tail
    }

    /// The handle after `handle` in collection order.
    pub fn next(&self, handle: ItemHandle) -> Option<ItemHandle> {
        self.entries.get(handle).and_then(|entry| entry.next)
    }

    /// Iterate items in collection order, oldest first.
    pub fn iter(&self) -> InventoryIter<'_> {
        InventoryIter {
            inventory: self,
            cursor: self.head,
            remaining: self.entries.len(),
        }
    }

    /// Handles in collection order.
    pub fn handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }

    fn link_back(&mut self, handle: ItemHandle) {
        let old_tail = self.tail;
        if let Some(entry) = self.entries.get_mut(handle) {
            entry.prev = old_tail;
            entry.next = None;
        }
        match old_tail.and_then(|tail| self.entries.get_mut(tail)) {
            Some(tail) => tail.next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }

    /// Detach `handle` from the order list, leaving it in the arena.
    /// Returns its former successor.
    fn unlink(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        let (prev, next) = match self.entries.get_mut(handle) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return None,
        };
        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.entries.get_mut(n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
        next
    }
}

/// Iterator over an [`Inventory`] in collection order.
pub struct InventoryIter<'a> {
    inventory: &'a Inventory,
    cursor: Option<ItemHandle>,
    remaining: usize,
}

impl<'a> Iterator for InventoryIter<'a> {
    type Item = (ItemHandle, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let entry = self.inventory.entries.get(handle)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((handle, &entry.item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InventoryIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DefId;

    fn order(inv: &Inventory) -> Vec<u32> {
        inv.iter().map(|(_, item)| item.def.0).collect()
    }

    fn filled(n: u32) -> (Inventory, Vec<ItemHandle>) {
        let mut inv = Inventory::new();
        let handles = (0..n).map(|i| inv.push_back(Item::plain(DefId(i)))).collect();
        (inv, handles)
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let (inv, handles) = filled(3);
        assert_eq!(order(&inv), vec![0, 1, 2]);
        assert_eq!(inv.first(), Some(handles[0]));
        assert_eq!(inv.last(), Some(handles[2]));
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn remove_middle_returns_successor() {
        let (mut inv, handles) = filled(3);
        let (item, next) = inv.remove(handles[1]).unwrap();
        assert_eq!(item.def, DefId(1));
        assert_eq!(next, Some(handles[2]));
        assert_eq!(order(&inv), vec![0, 2]);
    }

    #[test]
    fn remove_keeps_other_handles_valid() {
        let (mut inv, handles) = filled(4);
        inv.remove(handles[0]);
        inv.remove(handles[2]);
        assert_eq!(inv.get(handles[1]).unwrap().def, DefId(1));
        assert_eq!(inv.get(handles[3]).unwrap().def, DefId(3));
        assert!(inv.get(handles[0]).is_none());
    }

    #[test]
    fn remove_stale_handle_is_none() {
        let (mut inv, handles) = filled(1);
        assert!(inv.remove(handles[0]).is_some());
        assert!(inv.remove(handles[0]).is_none());
        assert!(inv.is_empty());
        assert_eq!(inv.first(), None);
        assert_eq!(inv.last(), None);
    }

    #[test]
    fn remove_traversal_clears_everything() {
        let (mut inv, _) = filled(5);
        let mut cursor = inv.first();
        while let Some(handle) = cursor {
            cursor = inv.remove(handle).and_then(|(_, next)| next);
        }
        assert!(inv.is_empty());
    }

    #[test]
    fn move_to_back_splices_to_tail() {
        let (mut inv, handles) = filled(3);
        assert!(inv.move_to_back(handles[0]));
        assert_eq!(order(&inv), vec![1, 2, 0]);
        assert!(inv.move_to_back(handles[2]));
        assert_eq!(order(&inv), vec![1, 0, 2]);
        assert_eq!(inv.first(), Some(handles[1]));
    }

    #[test]
    fn move_tail_to_back_is_noop() {
        let (mut inv, handles) = filled(2);
        assert!(inv.move_to_back(handles[1]));
        assert_eq!(order(&inv), vec![0, 1]);
    }

    #[test]
    fn move_stale_handle_fails() {
        let (mut inv, handles) = filled(2);
        inv.remove(handles[0]);
        assert!(!inv.move_to_back(handles[0]));
        assert_eq!(order(&inv), vec![1]);
    }

    #[test]
    fn reused_slot_does_not_resurrect_old_handle() {
        let (mut inv, handles) = filled(1);
        inv.remove(handles[0]);
        let fresh = inv.push_back(Item::plain(DefId(9)));
        assert_ne!(fresh, handles[0]);
        assert!(inv.get(handles[0]).is_none());
    }

    #[test]
    fn iter_reports_exact_len() {
        let (inv, _) = filled(4);
        assert_eq!(inv.iter().len(), 4);
        assert_eq!(inv.handles().count(), 4);
    }
}
