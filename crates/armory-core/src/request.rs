use crate::fixed::Millis;
use crate::id::ItemId;

/// What a [`UseToolRequest`] asks the tool engine to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// Inert request; never produces anything.
    #[default]
    None,
    /// Use the tool, on the destination if the tool needs one.
    Use,
    /// Scrape the sticker in `slot` of the destination.
    WearSticker,
    /// Clear the destination's name tag.
    RemoveNameTag,
}

/// A "use tool" request, as the inventory service would receive it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseToolRequest {
    pub tool: Option<ItemId>,
    pub destination: Option<ItemId>,
    /// Items exchanging counters, for the counter swap tool.
    pub swap_items: (Option<ItemId>, Option<ItemId>),
    pub action: ToolAction,
    /// Simulated server processing time for the resulting response.
    pub use_time: Millis,
    /// Sticker or patch slot.
    pub slot: u8,
    pub name_tag: String,
}

impl UseToolRequest {
    /// A `Use` request for `tool`, optionally aimed at `destination`.
    pub fn use_tool(tool: Option<ItemId>, destination: Option<ItemId>) -> Self {
        Self {
            tool,
            destination,
            action: ToolAction::Use,
            ..Self::default()
        }
    }

    pub fn wear_sticker(destination: ItemId, slot: u8) -> Self {
        Self {
            destination: Some(destination),
            action: ToolAction::WearSticker,
            slot,
            ..Self::default()
        }
    }

    pub fn remove_name_tag(destination: ItemId) -> Self {
        Self {
            destination: Some(destination),
            action: ToolAction::RemoveNameTag,
            ..Self::default()
        }
    }

    pub fn with_use_time(mut self, use_time: Millis) -> Self {
        self.use_time = use_time;
        self
    }

    pub fn with_slot(mut self, slot: u8) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_name_tag(mut self, name_tag: impl Into<String>) -> Self {
        self.name_tag = name_tag.into();
        self
    }

    pub fn with_swap_items(mut self, first: ItemId, second: ItemId) -> Self {
        self.swap_items = (Some(first), Some(second));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_inert() {
        let request = UseToolRequest::default();
        assert_eq!(request.action, ToolAction::None);
        assert_eq!(request.tool, None);
        assert_eq!(request.destination, None);
        assert_eq!(request.use_time, 0);
    }

    #[test]
    fn builders_fill_fields() {
        let request = UseToolRequest::use_tool(Some(ItemId(1)), Some(ItemId(2)))
            .with_use_time(250)
            .with_slot(3)
            .with_name_tag("Trusty");
        assert_eq!(request.action, ToolAction::Use);
        assert_eq!(request.use_time, 250);
        assert_eq!(request.slot, 3);
        assert_eq!(request.name_tag, "Trusty");

        let swap = UseToolRequest::use_tool(Some(ItemId(9)), None).with_swap_items(ItemId(3), ItemId(4));
        assert_eq!(swap.swap_items, (Some(ItemId(3)), Some(ItemId(4))));
    }
}
