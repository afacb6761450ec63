//! The tool engine: interprets a [`UseToolRequest`] against the kinds of the
//! tool and destination items.
//!
//! Dispatch order for [`ToolAction::Use`]:
//!
//! 1. A destination that is a case is opened, with the tool (if any) as key.
//!    This wins over every tool kind.
//! 2. Without a live tool there is nothing to do.
//! 3. Otherwise the tool's kind decides: sticker, operation pass, viewer
//!    pass, name tag, patch, graffiti or counter swap tool.
//!
//! [`ToolAction::WearSticker`] and [`ToolAction::RemoveNameTag`] only look at
//! the destination.
//!
//! Every case checks all of its preconditions before touching state, so a
//! request is either applied completely or leaves the backend untouched.
//! Tools are consumed in the same step that applies them.

use crate::backend::Backend;
use crate::catalog::ItemKind;
use crate::fixed::Fixed32;
use crate::id::{DefId, ItemHandle, ItemId};
use crate::item::{AppliedPatch, AppliedSticker, Item};
use crate::request::{ToolAction, UseToolRequest};
use crate::response::Response;
use std::sync::Arc;

/// Why a request was declined. Only ever logged; callers see no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rejected(pub &'static str);

/// `Ok(None)` means applied with nothing to report.
type ToolResult = Result<Option<Response>, Rejected>;

impl Backend {
    pub(crate) fn process_use_tool(&mut self, request: &UseToolRequest) -> Option<Response> {
        let destination = request.destination.and_then(|id| self.item_ids.handle(id));
        let tool = request.tool.and_then(|id| self.item_ids.handle(id));

        let result = match request.action {
            ToolAction::None => Err(Rejected("inert request")),
            ToolAction::Use => self.use_item(request, tool, destination),
            ToolAction::WearSticker => destination
                .ok_or(Rejected("missing destination"))
                .and_then(|dest| self.wear_sticker(dest, request.slot)),
            ToolAction::RemoveNameTag => destination
                .ok_or(Rejected("missing destination"))
                .and_then(|dest| self.remove_name_tag(dest)),
        };

        match result {
            Ok(response) => response,
            Err(Rejected(reason)) => {
                tracing::debug!(
                    tool = ?request.tool,
                    destination = ?request.destination,
                    action = ?request.action,
                    reason,
                    "tool request rejected"
                );
                None
            }
        }
    }

    fn use_item(
        &mut self,
        request: &UseToolRequest,
        tool: Option<ItemHandle>,
        destination: Option<ItemHandle>,
    ) -> ToolResult {
        if let Some(dest) = destination {
            if self.kind_of(dest).is_some_and(ItemKind::is_case) {
                return self.open_container(dest, tool);
            }
        }

        let tool = tool.ok_or(Rejected("unknown tool"))?;
        let catalog = Arc::clone(&self.catalog);
        let kind = self
            .inventory
            .get(tool)
            .and_then(|item| catalog.kind(item.def));
        let need_destination = || destination.ok_or(Rejected("missing destination"));

        match kind {
            Some(ItemKind::Sticker) => self.apply_sticker(need_destination()?, tool, request.slot),
            Some(ItemKind::OperationPass { coin }) => {
                self.activate_pass(tool, *coin);
                Ok(None)
            }
            Some(ItemKind::ViewerPass { coin }) => {
                let coin = self.activate_pass(tool, *coin);
                Ok(Some(Response::ViewerPassActivated { coin }))
            }
            Some(ItemKind::NameTag) => {
                self.add_name_tag(need_destination()?, tool, &request.name_tag)
            }
            Some(ItemKind::Patch) => self.apply_patch(need_destination()?, tool, request.slot),
            Some(ItemKind::Graffiti) => self.unseal_graffiti(tool),
            Some(ItemKind::CounterSwapTool) => self.swap_counters(tool, request.swap_items),
            _ => Err(Rejected("item is not a usable tool")),
        }
    }

    fn open_container(&mut self, container: ItemHandle, key: Option<ItemHandle>) -> ToolResult {
        if key == Some(container) {
            return Err(Rejected("container used as its own key"));
        }
        let container_item = self
            .inventory
            .get(container)
            .ok_or(Rejected("unknown container"))?;
        let key_item = match key {
            Some(key) => Some(self.inventory.get(key).ok_or(Rejected("unknown key"))?),
            None => None,
        };

        let dropped = self
            .unlocker
            .unlock(&self.catalog, container_item, key_item)
            .ok_or(Rejected("container did not open"))?;

        if let Some(key) = key {
            self.remove_item(key);
        }
        self.remove_item(container);
        let dropped = self.add_item(dropped);
        Ok(Some(Response::ContainerOpened { dropped }))
    }

    fn apply_sticker(&mut self, dest: ItemHandle, tool: ItemHandle, slot: u8) -> ToolResult {
        if slot >= self.config.sticker_slots {
            return Err(Rejected("sticker slot out of range"));
        }
        let sticker = self.tool_def(tool)?;
        let skin = self
            .skin_target(dest)?
            .as_skin_mut()
            .ok_or(Rejected("destination cannot hold stickers"))?;
        if skin.stickers.contains_key(&slot) {
            return Err(Rejected("sticker slot occupied"));
        }

        skin.stickers.insert(
            slot,
            AppliedSticker {
                def: sticker,
                wear: Fixed32::ZERO,
            },
        );
        self.remove_item(tool);
        Ok(Some(Response::StickerApplied { item: dest, slot }))
    }

    fn wear_sticker(&mut self, dest: ItemHandle, slot: u8) -> ToolResult {
        let step = self.config.wear_step();
        let skin = self
            .skin_target(dest)?
            .as_skin_mut()
            .ok_or(Rejected("destination cannot hold stickers"))?;
        let sticker = skin
            .stickers
            .get_mut(&slot)
            .ok_or(Rejected("no sticker in slot"))?;

        sticker.wear = sticker.wear.saturating_add(step);
        if sticker.wear >= Fixed32::ONE.saturating_add(step) {
            skin.stickers.remove(&slot);
            return Ok(Some(Response::StickerRemoved { item: dest, slot }));
        }
        Ok(Some(Response::StickerScraped { item: dest, slot }))
    }

    fn add_name_tag(&mut self, dest: ItemHandle, tool: ItemHandle, text: &str) -> ToolResult {
        if text.trim().is_empty() {
            return Err(Rejected("empty name tag"));
        }
        let skin = self
            .skin_target(dest)?
            .as_skin_mut()
            .ok_or(Rejected("destination cannot be named"))?;

        skin.name_tag = Some(text.to_string());
        self.remove_item(tool);
        Ok(Some(Response::NameTagAdded { item: dest }))
    }

    fn remove_name_tag(&mut self, dest: ItemHandle) -> ToolResult {
        let skin = self
            .skin_target(dest)?
            .as_skin_mut()
            .ok_or(Rejected("destination cannot be named"))?;
        if skin.name_tag.take().is_none() {
            return Err(Rejected("destination has no name tag"));
        }
        Ok(Some(Response::NameTagRemoved { item: dest }))
    }

    fn apply_patch(&mut self, dest: ItemHandle, tool: ItemHandle, slot: u8) -> ToolResult {
        if slot >= self.config.patch_slots {
            return Err(Rejected("patch slot out of range"));
        }
        let patch = self.tool_def(tool)?;
        if !self.kind_of(dest).is_some_and(ItemKind::is_agent) {
            return Err(Rejected("destination is not an agent"));
        }
        let agent = self
            .inventory
            .get_mut(dest)
            .and_then(Item::as_agent_mut)
            .ok_or(Rejected("destination cannot hold patches"))?;
        if agent.patches.contains_key(&slot) {
            return Err(Rejected("patch slot occupied"));
        }

        agent.patches.insert(slot, AppliedPatch { def: patch });
        self.remove_item(tool);
        Ok(Some(Response::PatchApplied { item: dest, slot }))
    }

    /// Consume a pass and grant its coin. Returns the coin's handle.
    fn activate_pass(&mut self, pass: ItemHandle, coin: DefId) -> ItemHandle {
        self.remove_item(pass);
        self.add_item(Item::plain(coin))
    }

    fn unseal_graffiti(&mut self, tool: ItemHandle) -> ToolResult {
        let charges = self.config.graffiti_charges;
        let graffiti = self
            .inventory
            .get_mut(tool)
            .and_then(Item::as_graffiti_mut)
            .ok_or(Rejected("graffiti has no seal state"))?;
        if !graffiti.sealed {
            return Err(Rejected("graffiti already unsealed"));
        }

        graffiti.sealed = false;
        graffiti.charges = charges;
        Ok(Some(Response::GraffitiUnsealed { item: tool }))
    }

    fn swap_counters(
        &mut self,
        tool: ItemHandle,
        (first, second): (Option<ItemId>, Option<ItemId>),
    ) -> ToolResult {
        let resolve = |id: Option<ItemId>| {
            id.and_then(|id| self.item_ids.handle(id))
                .ok_or(Rejected("unknown swap item"))
        };
        let (first, second) = (resolve(first)?, resolve(second)?);
        if first == second {
            return Err(Rejected("swap items are the same item"));
        }

        let counter_of = |handle: ItemHandle| {
            self.inventory
                .get(handle)
                .filter(|item| self.catalog.has_counter_attribute(item.def))
                .and_then(|item| item.counter().flatten().map(|counter| (item.def, counter)))
                .ok_or(Rejected("swap item has no counter"))
        };
        let (first_def, first_counter) = counter_of(first)?;
        let (second_def, second_counter) = counter_of(second)?;
        if first_def != second_def {
            return Err(Rejected("swap items differ in definition"));
        }

        for (handle, counter) in [(first, second_counter), (second, first_counter)] {
            if let Some(item) = self.inventory.get_mut(handle) {
                let _ = item.set_counter(counter);
            }
        }
        self.remove_item(tool);
        Ok(Some(Response::CountersSwapped { first, second }))
    }

    fn tool_def(&self, tool: ItemHandle) -> Result<DefId, Rejected> {
        self.inventory
            .get(tool)
            .map(|item| item.def)
            .ok_or(Rejected("unknown tool"))
    }

    /// The destination as a mutable skin, if it is one.
    fn skin_target(&mut self, dest: ItemHandle) -> Result<&mut Item, Rejected> {
        if !self.kind_of(dest).is_some_and(ItemKind::is_skin) {
            return Err(Rejected("destination is not a skin"));
        }
        self.inventory
            .get_mut(dest)
            .ok_or(Rejected("unknown destination"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn inert_request_does_nothing() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let sticker = fx.add_with_id(&mut backend, Item::plain(fx.sticker), 1);
        let skin = fx.add_with_id(&mut backend, fx.skin_item(), 2);
        let request = UseToolRequest {
            tool: Some(ItemId(1)),
            destination: Some(ItemId(2)),
            ..UseToolRequest::default()
        };
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(sticker));
        assert!(backend.inventory().get(skin).unwrap().as_skin().unwrap().stickers.is_empty());
    }

    #[test]
    fn non_tool_item_yields_nothing() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        fx.add_with_id(&mut backend, fx.skin_item(), 1);
        fx.add_with_id(&mut backend, fx.skin_item(), 2);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2)));
        assert_eq!(backend.process_use_tool(&request), None);
        assert_eq!(backend.inventory().len(), 2);
    }

    #[test]
    fn container_used_as_own_key_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let case = fx.add_with_id(&mut backend, Item::plain(fx.free_case), 1);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(1)));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(case));
    }

    #[test]
    fn sticker_slot_out_of_range_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let sticker = fx.add_with_id(&mut backend, Item::plain(fx.sticker), 1);
        fx.add_with_id(&mut backend, fx.skin_item(), 2);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2))).with_slot(5);
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(sticker));
    }

    #[test]
    fn sticker_on_gloves_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let sticker = fx.add_with_id(&mut backend, Item::plain(fx.sticker), 1);
        fx.add_with_id(&mut backend, Item::skin(fx.gloves, Default::default()), 2);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2)));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(sticker));
    }

    #[test]
    fn name_tag_with_blank_text_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let tag = fx.add_with_id(&mut backend, Item::plain(fx.name_tag), 1);
        fx.add_with_id(&mut backend, fx.skin_item(), 2);
        let request =
            UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2))).with_name_tag("   ");
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(tag));
    }

    #[test]
    fn patch_on_skin_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let patch = fx.add_with_id(&mut backend, Item::plain(fx.patch), 1);
        fx.add_with_id(&mut backend, fx.skin_item(), 2);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2)));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(patch));
    }

    #[test]
    fn unsealing_twice_is_rejected() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let graffiti = fx.add_with_id(&mut backend, Item::sealed_graffiti(fx.graffiti), 1);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), None);
        assert_eq!(
            backend.process_use_tool(&request),
            Some(Response::GraffitiUnsealed { item: graffiti })
        );
        assert_eq!(backend.process_use_tool(&request), None);
    }

    #[test]
    fn swap_requires_matching_definitions() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let tool = fx.add_with_id(&mut backend, Item::plain(fx.swap_tool), 1);
        fx.add_with_id(&mut backend, fx.counter_skin_item(3), 2);
        fx.add_with_id(&mut backend, Item::music_kit(fx.music_kit, Some(9)), 3);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), None)
            .with_swap_items(ItemId(2), ItemId(3));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(tool));
    }

    #[test]
    fn swap_ignores_counters_on_kinds_without_one() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let tool = fx.add_with_id(&mut backend, Item::plain(fx.swap_tool), 1);
        let gloves_with = |counter| {
            let skin = crate::item::Skin {
                counter: Some(counter),
                ..Default::default()
            };
            Item::skin(fx.gloves, skin)
        };
        let a = fx.add_with_id(&mut backend, gloves_with(3), 2);
        let b = fx.add_with_id(&mut backend, gloves_with(9), 3);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), None)
            .with_swap_items(ItemId(2), ItemId(3));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(tool));
        assert_eq!(backend.inventory().get(a).unwrap().counter(), Some(Some(3)));
        assert_eq!(backend.inventory().get(b).unwrap().counter(), Some(Some(9)));
    }

    #[test]
    fn swap_requires_set_counters() {
        let fx = Fixture::new();
        let mut backend = fx.backend();
        let tool = fx.add_with_id(&mut backend, Item::plain(fx.swap_tool), 1);
        fx.add_with_id(&mut backend, fx.counter_skin_item(3), 2);
        fx.add_with_id(&mut backend, fx.skin_item(), 3);
        let request = UseToolRequest::use_tool(Some(ItemId(1)), None)
            .with_swap_items(ItemId(2), ItemId(3));
        assert_eq!(backend.process_use_tool(&request), None);
        assert!(backend.inventory().contains(tool));
    }
}
