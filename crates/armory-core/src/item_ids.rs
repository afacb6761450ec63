//! Bidirectional map between external item IDs and inventory handles.

use crate::id::{ItemHandle, ItemId};
use slotmap::SecondaryMap;
use std::collections::HashMap;

/// One-to-one mapping `ItemId <-> ItemHandle`.
///
/// Items without an ID simply have no entry. Both directions are kept in
/// sync by every operation, so neither an ID nor a handle can appear twice.
#[derive(Debug, Clone, Default)]
pub struct ItemIdMap {
    by_id: HashMap<ItemId, ItemHandle>,
    by_handle: SecondaryMap<ItemHandle, ItemId>,
}

impl ItemIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `id` to `handle`. Any previous mapping of either side is dropped.
    pub fn assign(&mut self, handle: ItemHandle, id: ItemId) {
        if let Some(old_handle) = self.by_id.remove(&id) {
            self.by_handle.remove(old_handle);
        }
        if let Some(old_id) = self.by_handle.insert(handle, id) {
            if old_id != id {
                self.by_id.remove(&old_id);
            }
        }
        self.by_id.insert(id, handle);
    }

    /// Repoint the entry for `old` to `new`. No-op if `old` is unmapped.
    /// If `new` already belonged to another item, that item loses its ID.
    pub fn renumber(&mut self, old: ItemId, new: ItemId) {
        if old == new {
            return;
        }
        let Some(handle) = self.by_id.get(&old).copied() else {
            return;
        };
        self.assign(handle, new);
    }

    pub fn handle(&self, id: ItemId) -> Option<ItemHandle> {
        self.by_id.get(&id).copied()
    }

    pub fn id_of(&self, handle: ItemHandle) -> Option<ItemId> {
        self.by_handle.get(handle).copied()
    }

    /// Drop the entry for `handle`, returning the freed ID.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<ItemId> {
        let id = self.by_handle.remove(handle)?;
        self.by_id.remove(&id);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All `(id, handle)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, ItemHandle)> + '_ {
        self.by_id.iter().map(|(&id, &handle)| (id, handle))
    }
}
