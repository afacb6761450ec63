//! Outcomes reported back to the caller through the response queue.
//!
//! Responses that name an [`ItemHandle`] may outlive the item: a handle to
//! an item removed before delivery simply no longer resolves.

use crate::id::{ItemHandle, ItemId};

/// The result of a mutation, delivered after its simulated delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    // -- Collection --
    ItemAdded {
        item: ItemHandle,
    },
    ItemRemoved {
        item_id: ItemId,
    },
    CounterUpdated {
        item_id: ItemId,
        value: i32,
    },
    ItemMovedToFront {
        item_id: ItemId,
    },

    // -- Tools --
    ContainerOpened {
        dropped: ItemHandle,
    },
    StickerApplied {
        item: ItemHandle,
        slot: u8,
    },
    StickerScraped {
        item: ItemHandle,
        slot: u8,
    },
    StickerRemoved {
        item: ItemHandle,
        slot: u8,
    },
    PatchApplied {
        item: ItemHandle,
        slot: u8,
    },
    NameTagAdded {
        item: ItemHandle,
    },
    NameTagRemoved {
        item: ItemHandle,
    },
    ViewerPassActivated {
        coin: ItemHandle,
    },
    GraffitiUnsealed {
        item: ItemHandle,
    },
    CountersSwapped {
        first: ItemHandle,
        second: ItemHandle,
    },
}

/// Discriminant tag for responses, used for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    ItemAdded,
    ItemRemoved,
    CounterUpdated,
    ItemMovedToFront,
    ContainerOpened,
    StickerApplied,
    StickerScraped,
    StickerRemoved,
    PatchApplied,
    NameTagAdded,
    NameTagRemoved,
    ViewerPassActivated,
    GraffitiUnsealed,
    CountersSwapped,
}

impl Response {
    /// Get the discriminant kind for this response.
    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::ItemAdded { .. } => ResponseKind::ItemAdded,
            Response::ItemRemoved { .. } => ResponseKind::ItemRemoved,
            Response::CounterUpdated { .. } => ResponseKind::CounterUpdated,
            Response::ItemMovedToFront { .. } => ResponseKind::ItemMovedToFront,
            Response::ContainerOpened { .. } => ResponseKind::ContainerOpened,
            Response::StickerApplied { .. } => ResponseKind::StickerApplied,
            Response::StickerScraped { .. } => ResponseKind::StickerScraped,
            Response::StickerRemoved { .. } => ResponseKind::StickerRemoved,
            Response::PatchApplied { .. } => ResponseKind::PatchApplied,
            Response::NameTagAdded { .. } => ResponseKind::NameTagAdded,
            Response::NameTagRemoved { .. } => ResponseKind::NameTagRemoved,
            Response::ViewerPassActivated { .. } => ResponseKind::ViewerPassActivated,
            Response::GraffitiUnsealed { .. } => ResponseKind::GraffitiUnsealed,
            Response::CountersSwapped { .. } => ResponseKind::CountersSwapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn kind_matches_variant() {
        let mut sm = SlotMap::<ItemHandle, ()>::with_key();
        let h = sm.insert(());

        assert_eq!(Response::ItemAdded { item: h }.kind(), ResponseKind::ItemAdded);
        assert_eq!(
            Response::ItemRemoved { item_id: ItemId(1) }.kind(),
            ResponseKind::ItemRemoved
        );
        assert_eq!(
            Response::StickerScraped { item: h, slot: 2 }.kind(),
            ResponseKind::StickerScraped
        );
        assert_eq!(
            Response::CountersSwapped {
                first: h,
                second: h
            }
            .kind(),
            ResponseKind::CountersSwapped
        );
    }
}
