use crate::fixed::Fixed32;
use crate::id::DefId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sticker attached to a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedSticker {
    pub def: DefId,
    /// 0 = pristine. Scraped off once it passes one wear step beyond 1.
    pub wear: Fixed32,
}

/// A patch attached to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPatch {
    pub def: DefId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub wear: Fixed32,
    pub seed: u32,
    /// Kill counter, if the skin has one.
    pub counter: Option<i32>,
    /// Stickers keyed by slot index.
    #[serde(default)]
    pub stickers: BTreeMap<u8, AppliedSticker>,
    pub name_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicKit {
    pub counter: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Patches keyed by slot index.
    #[serde(default)]
    pub patches: BTreeMap<u8, AppliedPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graffiti {
    pub sealed: bool,
    pub charges: u8,
}

impl Default for Graffiti {
    fn default() -> Self {
        Self {
            sealed: true,
            charges: 0,
        }
    }
}

/// Kind-specific mutable attributes of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemData {
    /// Tools, cases, keys, passes and coins carry no mutable state.
    #[default]
    Plain,
    Skin(Skin),
    MusicKit(MusicKit),
    Agent(Agent),
    Graffiti(Graffiti),
}

/// A single owned inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub def: DefId,
    pub data: ItemData,
}

impl Item {
    pub fn new(def: DefId, data: ItemData) -> Self {
        Self { def, data }
    }

    /// An item without mutable attributes.
    pub fn plain(def: DefId) -> Self {
        Self::new(def, ItemData::Plain)
    }

    pub fn skin(def: DefId, skin: Skin) -> Self {
        Self::new(def, ItemData::Skin(skin))
    }

    pub fn music_kit(def: DefId, counter: Option<i32>) -> Self {
        Self::new(def, ItemData::MusicKit(MusicKit { counter }))
    }

    pub fn agent(def: DefId) -> Self {
        Self::new(def, ItemData::Agent(Agent::default()))
    }

    pub fn sealed_graffiti(def: DefId) -> Self {
        Self::new(def, ItemData::Graffiti(Graffiti::default()))
    }

    pub fn as_skin(&self) -> Option<&Skin> {
        match &self.data {
            ItemData::Skin(skin) => Some(skin),
            _ => None,
        }
    }

    pub fn as_skin_mut(&mut self) -> Option<&mut Skin> {
        match &mut self.data {
            ItemData::Skin(skin) => Some(skin),
            _ => None,
        }
    }

    pub fn as_agent(&self) -> Option<&Agent> {
        match &self.data {
            ItemData::Agent(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn as_agent_mut(&mut self) -> Option<&mut Agent> {
        match &mut self.data {
            ItemData::Agent(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn as_graffiti(&self) -> Option<&Graffiti> {
        match &self.data {
            ItemData::Graffiti(graffiti) => Some(graffiti),
            _ => None,
        }
    }

    pub fn as_graffiti_mut(&mut self) -> Option<&mut Graffiti> {
        match &mut self.data {
            ItemData::Graffiti(graffiti) => Some(graffiti),
            _ => None,
        }
    }

    /// The counter attribute, if this item's attributes support one.
    /// `Some(None)` means the attribute exists but is unset.
    pub fn counter(&self) -> Option<Option<i32>> {
        match &self.data {
            ItemData::Skin(skin) => Some(skin.counter),
            ItemData::MusicKit(music) => Some(music.counter),
            _ => None,
        }
    }

    /// Write the counter. Returns false if the attributes have no counter.
    #[must_use = "false means the item has no counter attribute"]
    pub fn set_counter(&mut self, value: i32) -> bool {
        match &mut self.data {
            ItemData::Skin(skin) => {
                skin.counter = Some(value);
                true
            }
            ItemData::MusicKit(music) => {
                music.counter = Some(value);
                true
            }
            _ => false,
        }
    }
}
