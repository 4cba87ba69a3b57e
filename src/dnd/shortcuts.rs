use crate::helpers::is_occupied;
use crate::inventory::InventoryType;
use crate::ui::inventory::{InventoryState, Side};

use super::transfer::DragSource;

/// Modifier held while clicking a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickModifier {
    /// Send the stack to the other inventory.
    Ctrl,
    /// Use the item.
    Alt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    QuickMove(DragSource),
    Use { slot: u32 },
}

/// Maps a modified click on a slot to the action it triggers, if any.
pub fn click_action(
    state: &InventoryState,
    kind: &InventoryType,
    slot: u32,
    modifier: ClickModifier,
) -> Option<ClickAction> {
    let occupied = state
        .inventory(Side::of(kind))
        .slot(slot)
        .is_some_and(|s| is_occupied(s, false));
    if !occupied {
        return None;
    }
    match modifier {
        ClickModifier::Ctrl if !kind.is_vendor() => {
            Some(ClickAction::QuickMove(DragSource::new(kind.clone(), slot)))
        }
        ClickModifier::Alt if *kind == InventoryType::Player => Some(ClickAction::Use { slot }),
        _ => None,
    }
}
