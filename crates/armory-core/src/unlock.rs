//! Container unlocking.
//!
//! The backend delegates "what comes out of this case" to a
//! [`ContainerUnlocker`]. The backend owns the bookkeeping around it
//! (consuming the case and key, adding the drop); the unlocker only decides
//! whether the case opens and what it yields.

use crate::catalog::{Catalog, ItemKind};
use crate::fixed::Fixed32;
use crate::id::DefId;
use crate::item::{Item, Skin};
use crate::rng::SimRng;

/// Decides the drop for a container being opened.
pub trait ContainerUnlocker: std::fmt::Debug + Send {
    /// Open `container` with the optional `key`. Returns the dropped item, or
    /// `None` to refuse (wrong key, empty loot table, ...). Must not assume
    /// the drop will be added: the backend decides that.
    fn unlock(&mut self, catalog: &Catalog, container: &Item, key: Option<&Item>) -> Option<Item>;
}

/// Default unlocker: checks the case's key requirement, then rolls uniformly
/// over the case's loot table with a seeded [`SimRng`].
#[derive(Debug, Clone)]
pub struct LootTableUnlocker {
    rng: SimRng,
}

impl LootTableUnlocker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
        }
    }

    /// Build a fresh instance of `def` with rolled attributes.
    fn roll_item(&mut self, catalog: &Catalog, def: DefId) -> Item {
        match catalog.kind(def) {
            Some(ItemKind::Skin) | Some(ItemKind::Gloves) => {
                let wear_bits = (self.rng.next_u64() >> 48) as i32;
                let seed = (self.rng.next_u64() % 1000) as u32 + 1;
                Item::skin(
                    def,
                    Skin {
                        wear: Fixed32::from_bits(wear_bits),
                        seed,
                        ..Skin::default()
                    },
                )
            }
            Some(ItemKind::MusicKit) => Item::music_kit(def, None),
            Some(ItemKind::Agent) => Item::agent(def),
            Some(ItemKind::Graffiti) => Item::sealed_graffiti(def),
            _ => Item::plain(def),
        }
    }
}

impl ContainerUnlocker for LootTableUnlocker {
    fn unlock(&mut self, catalog: &Catalog, container: &Item, key: Option<&Item>) -> Option<Item> {
        let Some(ItemKind::Case {
            key: required,
            loot,
        }) = catalog.kind(container.def)
        else {
            return None;
        };

        let key_fits = match (required, key) {
            (Some(required), Some(key)) => key.def == *required,
            (None, None) => true,
            _ => false,
        };
        if !key_fits {
            tracing::debug!(case = container.def.0, "key does not fit case");
            return None;
        }

        let index = self.rng.index(loot.len())?;
        let def = loot[index];
        Some(self.roll_item(catalog, def))
    }
}
