//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::backend::Backend;
use crate::catalog::{Catalog, CatalogBuilder, ItemKind};
use crate::config::SimulatorConfig;
use crate::id::{DefId, ItemHandle, ItemId};
use crate::item::{Item, Skin};
use crate::response::Response;
use std::sync::Arc;

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ===========================================================================
// Catalog fixture
// ===========================================================================

/// A small catalog with one definition of every kind.
pub struct Fixture {
    pub catalog: Arc<Catalog>,
    pub skin: DefId,
    pub other_skin: DefId,
    pub gloves: DefId,
    pub music_kit: DefId,
    pub agent: DefId,
    pub sticker: DefId,
    pub patch: DefId,
    pub name_tag: DefId,
    pub graffiti: DefId,
    /// Needs [`Fixture::key`]; drops [`Fixture::skin`].
    pub case: DefId,
    pub key: DefId,
    /// Opens without a key; drops [`Fixture::sticker`].
    pub free_case: DefId,
    pub operation_pass: DefId,
    pub op_coin: DefId,
    pub viewer_pass: DefId,
    pub coin: DefId,
    pub swap_tool: DefId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut b = CatalogBuilder::new();
        let skin = b.register("ak_redline", ItemKind::Skin);
        let other_skin = b.register("awp_asiimov", ItemKind::Skin);
        let gloves = b.register("sport_gloves", ItemKind::Gloves);
        let music_kit = b.register("crimson_assault", ItemKind::MusicKit);
        let agent = b.register("sas_operator", ItemKind::Agent);
        let sticker = b.register("holo_crown", ItemKind::Sticker);
        let patch = b.register("bravo_patch", ItemKind::Patch);
        let name_tag = b.register("name_tag", ItemKind::NameTag);
        let graffiti = b.register("sealed_gg", ItemKind::Graffiti);
        let key = b.register("alpha_key", ItemKind::CaseKey);
        let case = b.register(
            "alpha_case",
            ItemKind::Case {
                key: Some(key),
                loot: vec![skin],
            },
        );
        let free_case = b.register(
            "sticker_capsule",
            ItemKind::Case {
                key: None,
                loot: vec![sticker],
            },
        );
        let op_coin = b.register("operation_coin", ItemKind::Coin);
        let operation_pass = b.register("operation_pass", ItemKind::OperationPass { coin: op_coin });
        let coin = b.register("viewer_coin", ItemKind::Coin);
        let viewer_pass = b.register("viewer_pass", ItemKind::ViewerPass { coin });
        let swap_tool = b.register("stattrak_swap_tool", ItemKind::CounterSwapTool);

        let catalog = b.build().expect("fixture catalog is valid");
        Self {
            catalog: Arc::new(catalog),
            skin,
            other_skin,
            gloves,
            music_kit,
            agent,
            sticker,
            patch,
            name_tag,
            graffiti,
            case,
            key,
            free_case,
            operation_pass,
            op_coin,
            viewer_pass,
            coin,
            swap_tool,
        }
    }

    /// A backend with default config over this catalog.
    pub fn backend(&self) -> Backend {
        Backend::new(Arc::clone(&self.catalog), SimulatorConfig::default())
    }

    /// A fresh skin without counter, stickers or name tag.
    pub fn skin_item(&self) -> Item {
        Item::skin(self.skin, Skin::default())
    }

    /// A skin of [`Fixture::skin`] with its counter set.
    pub fn counter_skin_item(&self, counter: i32) -> Item {
        Item::skin(
            self.skin,
            Skin {
                counter: Some(counter),
                ..Skin::default()
            },
        )
    }

    pub fn music_kit_item(&self) -> Item {
        Item::music_kit(self.music_kit, None)
    }

    /// Add an item and give it an external ID in one go.
    pub fn add_with_id(&self, backend: &mut Backend, item: Item, id: u64) -> ItemHandle {
        let handle = backend.add_item(item);
        backend.assign_item_id(handle, ItemId(id));
        handle
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Delivery helpers
// ===========================================================================

/// Deliver everything due at the backend's current time.
pub fn drain(backend: &mut Backend) -> Vec<Response> {
    let mut out = Vec::new();
    let now = backend.now();
    backend.run(now, |response| out.push(response));
    out
}

/// Advance by `dt` and collect what was delivered.
pub fn advance(backend: &mut Backend, dt: u64) -> Vec<Response> {
    let mut out = Vec::new();
    backend.advance(dt, |response| out.push(response));
    out
}
