use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Stable position of an item inside the [`Inventory`](crate::inventory::Inventory).
    ///
    /// Handles survive insertion, removal and reordering of other items. A
    /// handle to a removed item never resolves again, even after its slot is
    /// reused.
    pub struct ItemHandle;
}

/// Externally visible item identifier, as the inventory service would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Identifies an item definition in the [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefId(pub u32);

/// A loadout slot index (weapon, knife, gloves, music kit, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadoutSlot(pub u8);

/// Which side of the loadout an item is equipped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    TeamA,
    TeamB,
    Neutral,
}
