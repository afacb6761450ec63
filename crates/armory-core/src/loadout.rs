use crate::id::{ItemHandle, LoadoutSlot, Side};
use std::collections::BTreeMap;

/// Equipped items, keyed by `(side, slot)`.
///
/// No eligibility checks happen here: whoever equips decides whether the
/// item belongs in the slot.
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    slots: BTreeMap<(Side, LoadoutSlot), ItemHandle>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `(side, slot)`, replacing any previous occupant.
    /// Returns the handle that was replaced.
    pub fn equip(&mut self, side: Side, slot: LoadoutSlot, handle: ItemHandle) -> Option<ItemHandle> {
        self.slots.insert((side, slot), handle)
    }

    pub fn unequip(&mut self, side: Side, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.slots.remove(&(side, slot))
    }

    /// Clear every slot occupied by `handle`. Returns how many were cleared.
    pub fn unequip_item(&mut self, handle: ItemHandle) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, equipped| *equipped != handle);
        before - self.slots.len()
    }

    pub fn get(&self, side: Side, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.slots.get(&(side, slot)).copied()
    }

    pub fn is_equipped(&self, handle: ItemHandle) -> bool {
        self.slots.values().any(|&equipped| equipped == handle)
    }

    /// Occupied slots, ordered by side then slot.
    pub fn iter(&self) -> impl Iterator<Item = (Side, LoadoutSlot, ItemHandle)> + '_ {
        self.slots
            .iter()
            .map(|(&(side, slot), &handle)| (side, slot, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(n: usize) -> Vec<ItemHandle> {
        let mut sm = SlotMap::<ItemHandle, ()>::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn equip_overwrites_only_that_slot() {
        let h = handles(3);
        let mut loadout = Loadout::new();
        loadout.equip(Side::TeamA, LoadoutSlot(1), h[0]);
        loadout.equip(Side::TeamB, LoadoutSlot(1), h[1]);
        let replaced = loadout.equip(Side::TeamA, LoadoutSlot(1), h[2]);

        assert_eq!(replaced, Some(h[0]));
        assert_eq!(loadout.get(Side::TeamA, LoadoutSlot(1)), Some(h[2]));
        assert_eq!(loadout.get(Side::TeamB, LoadoutSlot(1)), Some(h[1]));
    }

    #[test]
    fn same_item_in_several_slots() {
        let h = handles(1);
        let mut loadout = Loadout::new();
        loadout.equip(Side::TeamA, LoadoutSlot(0), h[0]);
        loadout.equip(Side::TeamB, LoadoutSlot(0), h[0]);
        loadout.equip(Side::Neutral, LoadoutSlot(7), h[0]);
        assert!(loadout.is_equipped(h[0]));
        assert_eq!(loadout.unequip_item(h[0]), 3);
        assert!(!loadout.is_equipped(h[0]));
    }

    #[test]
    fn unequip_empty_slot_is_none() {
        let mut loadout = Loadout::new();
        assert_eq!(loadout.unequip(Side::Neutral, LoadoutSlot(3)), None);
    }

    #[test]
    fn iter_is_ordered() {
        let h = handles(2);
        let mut loadout = Loadout::new();
        loadout.equip(Side::Neutral, LoadoutSlot(0), h[0]);
        loadout.equip(Side::TeamA, LoadoutSlot(2), h[1]);
        let sides: Vec<Side> = loadout.iter().map(|(side, _, _)| side).collect();
        assert_eq!(sides, vec![Side::TeamA, Side::Neutral]);
    }
}
