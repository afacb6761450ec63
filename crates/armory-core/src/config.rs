//! Tunables for the backend simulator.

use crate::fixed::{f32_to_fixed32, Fixed32};
use serde::{Deserialize, Serialize};

/// Simulator configuration. Every field has a default, so partial config
/// files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Valid sticker slots are `0..sticker_slots`.
    pub sticker_slots: u8,
    /// Valid patch slots are `0..patch_slots`.
    pub patch_slots: u8,
    /// Wear added to a sticker by each scrape.
    pub sticker_wear_step: f32,
    /// Charges on a freshly unsealed graffiti.
    pub graffiti_charges: u8,
    /// Delivered responses to retain for inspection. 0 = none.
    pub response_history: usize,
    /// Seed for the default loot-table unlocker.
    pub loot_seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            sticker_slots: 5,
            patch_slots: 5,
            sticker_wear_step: 0.12,
            graffiti_charges: 50,
            response_history: 0,
            loot_seed: 0,
        }
    }
}

impl SimulatorConfig {
    /// The wear step as fixed point. Negative steps are clamped to zero.
    pub fn wear_step(&self) -> Fixed32 {
        f32_to_fixed32(self.sticker_wear_step).max(Fixed32::ZERO)
    }
}
