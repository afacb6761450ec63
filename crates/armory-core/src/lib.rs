//! Armory Core -- a client-side simulator of a remote inventory backend.
//!
//! The simulator owns a player's items, maps them to the external IDs a real
//! service would assign, tracks the equipped loadout, and applies tool
//! requests (stickers, name tags, cases, passes, ...). Every mutation answers
//! with a [`response::Response`] that is held in a deferred queue and only
//! delivered once the simulated clock reaches its release time.
//!
//! # Delivery Loop
//!
//! ```rust,ignore
//! let mut backend = Backend::new(catalog, SimulatorConfig::default());
//! backend.use_tool(&UseToolRequest::use_tool(Some(sticker), Some(skin)).with_use_time(250));
//! backend.advance(100, handle_response); // nothing yet
//! backend.advance(150, handle_response); // StickerApplied
//! ```
//!
//! # Key Types
//!
//! - [`backend::Backend`] -- Owns all state and exposes every operation.
//! - [`catalog::Catalog`] -- Immutable item definitions, frozen at startup.
//! - [`inventory::Inventory`] -- Ordered arena with stable generational handles.
//! - [`item_ids::ItemIdMap`] -- One-to-one external ID mapping.
//! - [`response_queue::ResponseQueue`] -- Delay queue driven by [`clock::SimClock`].
//! - [`unlock::ContainerUnlocker`] -- Pluggable case-opening policy.
//! - [`fixed::Fixed32`] -- Q16.16 fixed point for wear values.

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod fixed;
pub mod id;
pub mod inventory;
pub mod item;
pub mod item_ids;
pub mod loadout;
pub mod request;
pub mod response;
pub mod response_queue;
pub mod rng;
pub mod tool;
pub mod unlock;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
