//! Serde data file structs for catalog definitions.
//!
//! Definitions reference each other by name (a case names its key and loot,
//! a pass names its coin). The loader resolves names into catalog IDs.

use serde::Deserialize;

/// The kind of a definition, as spelled in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindData {
    Skin,
    Gloves,
    MusicKit,
    Agent,
    Sticker,
    Patch,
    NameTag,
    Graffiti,
    Case,
    CaseKey,
    OperationPass,
    ViewerPass,
    Coin,
    CounterSwapTool,
}

impl KindData {
    /// Data file spelling, for error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skin => "skin",
            Self::Gloves => "gloves",
            Self::MusicKit => "music_kit",
            Self::Agent => "agent",
            Self::Sticker => "sticker",
            Self::Patch => "patch",
            Self::NameTag => "name_tag",
            Self::Graffiti => "graffiti",
            Self::Case => "case",
            Self::CaseKey => "case_key",
            Self::OperationPass => "operation_pass",
            Self::ViewerPass => "viewer_pass",
            Self::Coin => "coin",
            Self::CounterSwapTool => "counter_swap_tool",
        }
    }
}

/// An item definition in a data file.
///
/// `key` and `loot` only apply to cases, `coin` only to passes.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub name: String,
    pub kind: KindData,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub loot: Vec<String>,
    #[serde(default)]
    pub coin: Option<String>,
}
