//! The backend simulator: owns the inventory and answers every mutation with
//! a response delivered through the [`ResponseQueue`].
//!
//! # Architecture
//!
//! The `Backend` owns:
//! - an [`Inventory`] (ordered arena of items with stable handles)
//! - an [`ItemIdMap`] (external IDs <-> handles)
//! - a [`Loadout`] (equipped items per side and slot)
//! - a [`ResponseQueue`] (responses waiting for their simulated delay)
//! - a [`ContainerUnlocker`] (decides case drops)
//!
//! and shares a read-only [`Catalog`].
//!
//! # Delivery
//!
//! Simple mutations queue their response with zero delay; tool requests queue
//! theirs with the request's `use_time`. Nothing is delivered until the
//! embedding loop calls [`Backend::run`] or [`Backend::advance`].
//!
//! ```rust,ignore
//! let mut backend = Backend::new(catalog, SimulatorConfig::default());
//! let handle = backend.add_item(Item::plain(sticker));
//! backend.assign_item_id(handle, ItemId(1));
//! backend.run(0, |response| println!("{response:?}"));
//! ```

use crate::catalog::{Catalog, ItemKind};
use crate::config::SimulatorConfig;
use crate::fixed::Millis;
use crate::id::{ItemHandle, ItemId, LoadoutSlot, Side};
use crate::inventory::Inventory;
use crate::item::Item;
use crate::item_ids::ItemIdMap;
use crate::loadout::Loadout;
use crate::request::UseToolRequest;
use crate::response::Response;
use crate::response_queue::{PendingResponse, ResponseQueue};
use crate::unlock::{ContainerUnlocker, LootTableUnlocker};
use std::sync::Arc;

/// Client-side simulation of the remote inventory service.
#[derive(Debug)]
pub struct Backend {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) config: SimulatorConfig,
    pub(crate) inventory: Inventory,
    pub(crate) item_ids: ItemIdMap,
    pub(crate) loadout: Loadout,
    pub(crate) responses: ResponseQueue,
    pub(crate) unlocker: Box<dyn ContainerUnlocker>,
}

impl Backend {
    /// Create a backend using the seeded [`LootTableUnlocker`].
    pub fn new(catalog: Arc<Catalog>, config: SimulatorConfig) -> Self {
        let unlocker = LootTableUnlocker::new(config.loot_seed);
        Self::with_unlocker(catalog, config, unlocker)
    }

    /// Create a backend with a custom container unlocker.
    pub fn with_unlocker(
        catalog: Arc<Catalog>,
        config: SimulatorConfig,
        unlocker: impl ContainerUnlocker + 'static,
    ) -> Self {
        Self {
            catalog,
            responses: ResponseQueue::with_max_history(config.response_history),
            config,
            inventory: Inventory::new(),
            item_ids: ItemIdMap::new(),
            loadout: Loadout::new(),
            unlocker: Box::new(unlocker),
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn item_ids(&self) -> &ItemIdMap {
        &self.item_ids
    }

    /// Current simulated time.
    pub fn now(&self) -> Millis {
        self.responses.now()
    }

    /// Responses not yet delivered, in enqueue order.
    pub fn pending_responses(&self) -> impl Iterator<Item = &PendingResponse> {
        self.responses.pending()
    }

    /// Delivered responses retained per `response_history`.
    pub fn response_history(&self) -> &[(Millis, Response)] {
        self.responses.history()
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    /// Append an item. Always succeeds.
    pub fn add_item(&mut self, item: Item) -> ItemHandle {
        let handle = self.inventory.push_back(item);
        self.responses.enqueue(Response::ItemAdded { item: handle }, 0);
        handle
    }

    /// Remove an item, its ID and its loadout slots in one step. Returns the
    /// handle that followed it, so a removal traversal can continue.
    pub fn remove_item(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        if !self.inventory.contains(handle) {
            return None;
        }
        let item_id = self.item_ids.remove(handle);
        let (_, next) = self.inventory.remove(handle)?;
        self.loadout.unequip_item(handle);
        if let Some(item_id) = item_id {
            self.responses.enqueue(Response::ItemRemoved { item_id }, 0);
        }
        next
    }

    /// Remove every item, oldest first.
    pub fn clear_inventory(&mut self) {
        let mut cursor = self.inventory.first();
        while let Some(handle) = cursor {
            cursor = self.remove_item(handle);
        }
    }

    /// Set the counter of a skin or music kit. Returns false (and reports
    /// nothing) when the item's kind has no counter attribute.
    pub fn update_counter(&mut self, handle: ItemHandle, value: i32) -> bool {
        let Some(item) = self.inventory.get_mut(handle) else {
            return false;
        };
        if !self.catalog.has_counter_attribute(item.def) || !item.set_counter(value) {
            return false;
        }
        if let Some(item_id) = self.item_ids.id_of(handle) {
            self.responses
                .enqueue(Response::CounterUpdated { item_id, value }, 0);
        }
        true
    }

    /// Mark an item as most recently touched by moving it to the tail.
    pub fn move_to_front(&mut self, handle: ItemHandle) {
        if !self.inventory.move_to_back(handle) {
            return;
        }
        if let Some(item_id) = self.item_ids.id_of(handle) {
            self.responses
                .enqueue(Response::ItemMovedToFront { item_id }, 0);
        }
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    /// Give an item its external ID. Ignored for handles not in the inventory.
    pub fn assign_item_id(&mut self, handle: ItemHandle, item_id: ItemId) {
        if self.inventory.contains(handle) {
            self.item_ids.assign(handle, item_id);
        }
    }

    /// Replace a provisional ID with a confirmed one. No-op if `old` is unknown.
    pub fn update_item_id(&mut self, old: ItemId, new: ItemId) {
        self.item_ids.renumber(old, new);
    }

    pub fn item_from_id(&self, item_id: ItemId) -> Option<ItemHandle> {
        self.item_ids.handle(item_id)
    }

    pub fn item_id(&self, handle: ItemHandle) -> Option<ItemId> {
        self.item_ids.id_of(handle)
    }

    /// Read-only view of the item with the given ID.
    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.item_from_id(item_id)
            .and_then(|handle| self.inventory.get(handle))
    }

    // -----------------------------------------------------------------------
    // Loadout
    // -----------------------------------------------------------------------

    /// Equip an item. No eligibility check; the handle only has to be live.
    pub fn equip_item(&mut self, side: Side, slot: LoadoutSlot, handle: ItemHandle) {
        if self.inventory.contains(handle) {
            self.loadout.equip(side, slot, handle);
        }
    }

    pub fn unequip_item(&mut self, side: Side, slot: LoadoutSlot) {
        self.loadout.unequip(side, slot);
    }

    // -----------------------------------------------------------------------
    // Tools
    // -----------------------------------------------------------------------

    /// Apply a tool request. A response, if any, is released after
    /// `request.use_time`.
    pub fn use_tool(&mut self, request: &UseToolRequest) {
        if let Some(response) = self.process_use_tool(request) {
            self.responses.enqueue(response, request.use_time);
        }
    }

    // -----------------------------------------------------------------------
    // Delivery
    // -----------------------------------------------------------------------

    /// Deliver every response due at `now`. Returns how many were delivered.
    pub fn run<F>(&mut self, now: Millis, visitor: F) -> usize
    where
        F: FnMut(Response),
    {
        self.responses.poll(now, visitor)
    }

    /// Advance the clock by `dt` and deliver everything that became due.
    pub fn advance<F>(&mut self, dt: Millis, visitor: F) -> usize
    where
        F: FnMut(Response),
    {
        self.responses.advance(dt, visitor)
    }

    /// Catalog kind of a live item.
    pub(crate) fn kind_of(&self, handle: ItemHandle) -> Option<&ItemKind> {
        let def = self.inventory.get(handle)?.def;
        self.catalog.kind(def)
    }
}
