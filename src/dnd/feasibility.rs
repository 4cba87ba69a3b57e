//! Cheap checks a view runs while the pointer moves, before any drop.

use crate::config::SlotsConfig;
use crate::helpers::{can_craft_item, can_purchase_item, occupied};
use crate::inventory::{InventoryType, ItemCatalog};
use crate::ui::inventory::{InventoryState, Side};

use super::restrictions::SlotRules;
use super::transfer::{DragSource, DropTarget};

/// Whether slot `slot` of the inventory of `kind` can be picked up.
///
/// Refused while a request is in flight, for empty slots (shop slots may
/// lack a count), and for shop or crafting slots the viewer cannot afford.
pub fn can_drag(state: &InventoryState, catalog: &ItemCatalog, kind: &InventoryType, slot: u32) -> bool {
    if state.is_busy() {
        return false;
    }
    let inventory = state.inventory(Side::of(kind));
    let Some(slot) = inventory.slot(slot) else {
        return false;
    };
    occupied(slot, *kind != InventoryType::Shop).is_some()
        && can_purchase_item(slot, kind, inventory.groups.as_ref(), state.left.groups.as_ref())
        && can_craft_item(slot, kind, catalog, &state.left)
}

/// Whether `target` accepts the item dragged from `source`.
pub fn can_drop(
    state: &InventoryState,
    catalog: &ItemCatalog,
    slots: &SlotsConfig,
    source: &DragSource,
    target: &DropTarget,
) -> bool {
    if source.slot == target.slot && source.inventory == target.inventory {
        return false;
    }
    if target.inventory.is_vendor() {
        return false;
    }
    let name = state
        .inventory(Side::of(&source.inventory))
        .slot(source.slot)
        .and_then(|slot| slot.name());
    match name {
        Some(name) => SlotRules::new(slots, catalog).accepts(&target.inventory, target.slot, name),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, ItemStack};
    use crate::ui::inventory::{InventoryIntent, InventoryReducer, RequestId};
    use crate::ui::mvi::Reducer;

    fn state() -> InventoryState {
        let mut left = Inventory::new("player-1", InventoryType::Player, 10);
        left.put(4, ItemStack::new(4, "bread", 2, 300.0).into());
        let mut right = Inventory::new("shop-1", InventoryType::Shop, 4);
        let mut stock = ItemStack::new(1, "water", 0, 500.0);
        stock.price = Some(5.0);
        right.put(1, stock.into());
        InventoryState::new(left, right)
    }

    #[test]
    fn busy_store_refuses_drags() {
        let catalog = ItemCatalog::new();
        let s = state();
        assert!(can_drag(&s, &catalog, &InventoryType::Player, 4));
        let s = InventoryReducer::reduce(s, InventoryIntent::Pending { request: RequestId(1) });
        assert!(!can_drag(&s, &catalog, &InventoryType::Player, 4));
    }

    #[test]
    fn out_of_stock_shop_slot_cannot_be_dragged() {
        assert!(!can_drag(&state(), &ItemCatalog::new(), &InventoryType::Shop, 1));
    }

    #[test]
    fn vendors_and_restricted_slots_refuse_drops() {
        let s = state();
        let catalog = ItemCatalog::new();
        let slots = SlotsConfig::default();
        let source = DragSource::new(InventoryType::Player, 4);
        assert!(can_drop(&s, &catalog, &slots, &source, &DropTarget::new(InventoryType::Player, 5)));
        assert!(!can_drop(&s, &catalog, &slots, &source, &DropTarget::new(InventoryType::Player, 1)));
        assert!(!can_drop(&s, &catalog, &slots, &source, &DropTarget::new(InventoryType::Shop, 2)));
        assert!(!can_drop(&s, &catalog, &slots, &source, &DropTarget::new(InventoryType::Player, 4)));
    }
}
