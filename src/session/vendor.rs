//! Planning for shop purchases and crafting.

use crate::config::SlotsConfig;
use crate::dnd::{DragSource, DropAbort, DropTarget, SlotRules, TransferIntent};
use crate::helpers::{can_craft_item, can_purchase_item};
use crate::inventory::{InventoryType, ItemCatalog, Slot};
use crate::ui::inventory::{InventoryState, Side};

/// Builds the request for taking `source` out of the open shop or crafting
/// bench into `target` in the viewer's inventory.
pub(super) fn vendor_transfer(
    state: &InventoryState,
    catalog: &ItemCatalog,
    slots: &SlotsConfig,
    source: &DragSource,
    target: &DropTarget,
) -> Result<TransferIntent, DropAbort> {
    let vendor = &state.right;
    let source_slot = vendor
        .slot(source.slot)
        .ok_or(DropAbort::SourceEmpty { slot: source.slot })?;
    let Slot::Occupied(item) = source_slot else {
        return Err(DropAbort::SourceEmpty { slot: source.slot });
    };

    let eligible = match vendor.kind {
        InventoryType::Shop => can_purchase_item(
            source_slot,
            &vendor.kind,
            vendor.groups.as_ref(),
            state.left.groups.as_ref(),
        ),
        InventoryType::Crafting => can_craft_item(source_slot, &vendor.kind, catalog, &state.left),
        _ => true,
    };
    if !eligible {
        return Err(DropAbort::NotEligible {
            name: item.name.clone(),
        });
    }
    if !catalog.contains(&item.name) {
        return Err(DropAbort::MissingItemData {
            name: item.name.clone(),
        });
    }

    let no_target = || DropAbort::NoTargetSlot {
        name: item.name.clone(),
    };
    if Side::of(&target.inventory) != Side::Left {
        return Err(no_target());
    }
    let target_slot = state.left.slot(target.slot).ok_or_else(no_target)?;
    if !SlotRules::new(slots, catalog).accepts(&state.left.kind, target_slot.number(), &item.name) {
        return Err(DropAbort::RestrictedSlot {
            name: item.name.clone(),
            slot: target_slot.number(),
        });
    }

    // A typed amount is capped by the stock; nothing typed buys one.
    let count = match (state.item_amount, item.count) {
        (0, _) => 1,
        (amount, Some(stock)) if vendor.kind == InventoryType::Shop && amount > stock => stock,
        (amount, _) => amount,
    };
    if count == 0 {
        return Err(DropAbort::InvalidCount);
    }

    Ok(TransferIntent {
        from_slot: item.slot,
        to_slot: target_slot.number(),
        from_type: vendor.kind.clone(),
        to_type: state.left.kind.clone(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Groups, Inventory, ItemData, ItemStack};
    use std::collections::BTreeMap;

    fn shop_state() -> InventoryState {
        let left = Inventory::new("player-1", InventoryType::Player, 10);
        let mut shop = Inventory::new("shop-1", InventoryType::Shop, 4);
        let mut water = ItemStack::new(1, "water", 3, 1500.0);
        water.price = Some(10.0);
        shop.put(1, water.into());
        InventoryState::new(left, shop)
    }

    fn catalog() -> ItemCatalog {
        [ItemData::new("water", 500.0, true), ItemData::new("iron", 100.0, true)]
            .into_iter()
            .collect()
    }

    #[test]
    fn purchase_count_is_capped_by_stock() {
        let mut state = shop_state();
        let source = DragSource::new(InventoryType::Shop, 1);
        let target = DropTarget::new(InventoryType::Player, 4);
        let slots = SlotsConfig::default();

        let transfer = vendor_transfer(&state, &catalog(), &slots, &source, &target).unwrap();
        assert_eq!(transfer.count, 1);

        state.item_amount = 10;
        let transfer = vendor_transfer(&state, &catalog(), &slots, &source, &target).unwrap();
        assert_eq!(transfer.count, 3);
        assert_eq!(transfer.from_type, InventoryType::Shop);
    }

    #[test]
    fn purchase_into_weapon_slot_is_refused() {
        let state = shop_state();
        let err = vendor_transfer(
            &state,
            &catalog(),
            &SlotsConfig::default(),
            &DragSource::new(InventoryType::Shop, 1),
            &DropTarget::new(InventoryType::Player, 1),
        )
        .unwrap_err();
        assert!(matches!(err, DropAbort::RestrictedSlot { slot: 1, .. }));
    }

    #[test]
    fn missing_grade_makes_item_ineligible() {
        let mut state = shop_state();
        state.right.groups = Some(Groups::from([("police".to_string(), 0.0)]));
        if let Some(Slot::Occupied(item)) = state.right.slot_mut(1) {
            item.grade = Some(crate::inventory::Grade::Min(2.0));
        }
        let err = vendor_transfer(
            &state,
            &catalog(),
            &SlotsConfig::default(),
            &DragSource::new(InventoryType::Shop, 1),
            &DropTarget::new(InventoryType::Player, 4),
        )
        .unwrap_err();
        assert!(matches!(err, DropAbort::NotEligible { .. }));
    }

    #[test]
    fn crafting_requires_ingredients() {
        let mut left = Inventory::new("player-1", InventoryType::Player, 10);
        let mut bench = Inventory::new("bench-1", InventoryType::Crafting, 2);
        let mut recipe = ItemStack::new(1, "water", 1, 500.0);
        recipe.ingredients = Some(BTreeMap::from([("iron".to_string(), 2.0)]));
        bench.put(1, recipe.into());

        let source = DragSource::new(InventoryType::Crafting, 1);
        let target = DropTarget::new(InventoryType::Player, 5);
        let slots = SlotsConfig::default();

        let state = InventoryState::new(left.clone(), bench.clone());
        assert!(vendor_transfer(&state, &catalog(), &slots, &source, &target).is_err());

        left.put(4, ItemStack::new(4, "iron", 2, 200.0).into());
        let state = InventoryState::new(left, bench);
        let transfer = vendor_transfer(&state, &catalog(), &slots, &source, &target).unwrap();
        assert_eq!(transfer.count, 1);
        assert_eq!(transfer.from_type, InventoryType::Crafting);
    }
}
