//! Shop and crafting gating.

use serde_json::Value;

use crate::inventory::{Grade, Groups, Inventory, InventoryType, ItemCatalog, Slot};

use super::occupancy::occupied;

/// Whether the viewer may take `slot` out of an inventory of `kind`.
///
/// Only occupied shop slots are gated: out of stock refuses; otherwise a
/// grade requirement must be met by one of the viewer's groups that the
/// shop lists.
pub fn can_purchase_item(
    slot: &Slot,
    kind: &InventoryType,
    shop_groups: Option<&Groups>,
    viewer_groups: Option<&Groups>,
) -> bool {
    if *kind != InventoryType::Shop {
        return true;
    }
    let Some(item) = occupied(slot, false) else {
        return true;
    };

    if item.count == Some(0) {
        return false;
    }

    let (Some(grade), Some(shop_groups)) = (&item.grade, shop_groups) else {
        return true;
    };

    // Shop requires groups but the viewer has none.
    let Some(viewer_groups) = viewer_groups else {
        return false;
    };

    shop_groups
        .keys()
        .filter_map(|group| viewer_groups.get(group))
        .any(|viewer_grade| match grade {
            Grade::Min(required) => viewer_grade >= required,
            Grade::AnyOf(accepted) => accepted.iter().any(|g| g == viewer_grade),
        })
}

/// Whether the viewer holds every ingredient for a crafting slot.
///
/// Whole amounts are satisfied by the account count in the catalog or by
/// the units in the viewer's inventory. Fractional amounts are durability
/// thresholds: some item of that name must have at least `amount * 100`
/// durability left.
pub fn can_craft_item(
    slot: &Slot,
    kind: &InventoryType,
    catalog: &ItemCatalog,
    viewer: &Inventory,
) -> bool {
    if *kind != InventoryType::Crafting {
        return true;
    }
    let Some(item) = occupied(slot, false) else {
        return true;
    };
    let Some(ingredients) = &item.ingredients else {
        return true;
    };

    ingredients
        .iter()
        .all(|(name, &amount)| has_ingredient(name, amount, catalog, viewer))
}

fn has_ingredient(name: &str, amount: f64, catalog: &ItemCatalog, viewer: &Inventory) -> bool {
    let mut held = viewer.items.iter().filter_map(Slot::item).filter(|i| i.name == name);

    if amount >= 1.0 {
        if catalog.get(name).is_some_and(|data| data.count as f64 >= amount) {
            return true;
        }
        let units: u64 = held.map(|i| u64::from(i.count.unwrap_or(0))).sum();
        return units as f64 >= amount;
    }

    held.any(|i| {
        i.metadata_value("durability")
            .and_then(Value::as_f64)
            .is_some_and(|durability| durability >= amount * 100.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ItemData, ItemStack, Metadata};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn shop_slot(count: u32, grade: Option<Grade>) -> Slot {
        Slot::Occupied(ItemStack {
            grade,
            price: Some(250.0),
            ..ItemStack::new(1, "weapon_pistol", count, 1200.0)
        })
    }

    fn groups(entries: &[(&str, f64)]) -> Groups {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn non_shop_always_purchasable() {
        let slot = shop_slot(0, None);
        assert!(can_purchase_item(&slot, &InventoryType::Player, None, None));
    }

    #[test]
    fn out_of_stock_refused() {
        let slot = shop_slot(0, None);
        assert!(!can_purchase_item(&slot, &InventoryType::Shop, None, None));
    }

    #[test]
    fn minimum_grade_compares_numerically() {
        let shop = groups(&[("police", 0.0)]);
        let slot = shop_slot(5, Some(Grade::Min(2.0)));
        let low = groups(&[("police", 1.0)]);
        let high = groups(&[("police", 3.0)]);
        assert!(!can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), Some(&low)));
        assert!(can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), Some(&high)));
    }

    #[test]
    fn grade_list_requires_exact_match() {
        let shop = groups(&[("police", 0.0)]);
        let slot = shop_slot(5, Some(Grade::AnyOf(vec![1.0, 4.0])));
        let exact = groups(&[("police", 4.0)]);
        let above = groups(&[("police", 5.0)]);
        assert!(can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), Some(&exact)));
        assert!(!can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), Some(&above)));
    }

    #[test]
    fn viewer_without_groups_refused_when_grade_required() {
        let shop = groups(&[("police", 0.0)]);
        let slot = shop_slot(5, Some(Grade::Min(0.0)));
        assert!(!can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), None));
    }

    #[test]
    fn viewer_in_unlisted_group_refused() {
        let shop = groups(&[("police", 0.0)]);
        let slot = shop_slot(5, Some(Grade::Min(0.0)));
        let viewer = groups(&[("ambulance", 9.0)]);
        assert!(!can_purchase_item(&slot, &InventoryType::Shop, Some(&shop), Some(&viewer)));
    }

    fn recipe(ingredients: &[(&str, f64)]) -> Slot {
        Slot::Occupied(ItemStack {
            ingredients: Some(
                ingredients
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..ItemStack::new(1, "lockpick", 1, 50.0)
        })
    }

    fn viewer_with(items: Vec<ItemStack>) -> Inventory {
        let mut inventory = Inventory::new("player-1", InventoryType::Player, 10);
        for item in items {
            let number = item.slot;
            inventory.put(number, item.into());
        }
        inventory
    }

    #[test]
    fn craft_gating_only_applies_to_crafting_inventories() {
        let slot = recipe(&[("iron", 50.0)]);
        let viewer = viewer_with(vec![]);
        assert!(can_craft_item(&slot, &InventoryType::Shop, &ItemCatalog::new(), &viewer));
        assert!(!can_craft_item(&slot, &InventoryType::Crafting, &ItemCatalog::new(), &viewer));
    }

    #[test]
    fn account_count_satisfies_whole_amounts() {
        let mut iron = ItemData::new("iron", 100.0, true);
        iron.count = 3;
        let catalog: ItemCatalog = [iron].into_iter().collect();
        let viewer = viewer_with(vec![]);
        assert!(can_craft_item(&recipe(&[("iron", 3.0)]), &InventoryType::Crafting, &catalog, &viewer));
        assert!(!can_craft_item(&recipe(&[("iron", 4.0)]), &InventoryType::Crafting, &catalog, &viewer));
    }

    #[test]
    fn inventory_units_satisfy_whole_amounts() {
        let viewer = viewer_with(vec![
            ItemStack::new(1, "iron", 2, 200.0),
            ItemStack::new(4, "iron", 1, 100.0),
        ]);
        let catalog = ItemCatalog::new();
        assert!(can_craft_item(&recipe(&[("iron", 3.0)]), &InventoryType::Crafting, &catalog, &viewer));
        assert!(!can_craft_item(&recipe(&[("iron", 4.0)]), &InventoryType::Crafting, &catalog, &viewer));
    }

    #[test]
    fn fractional_amount_is_durability_threshold() {
        let worn = |durability: f64| {
            let metadata: Metadata = json!({ "durability": durability }).as_object().cloned().unwrap();
            ItemStack::new(2, "scrapmetal_tool", 1, 300.0).with_metadata(metadata)
        };
        let catalog = ItemCatalog::new();
        let slot = recipe(&[("scrapmetal_tool", 0.25)]);
        assert!(can_craft_item(&slot, &InventoryType::Crafting, &catalog, &viewer_with(vec![worn(30.0)])));
        assert!(!can_craft_item(&slot, &InventoryType::Crafting, &catalog, &viewer_with(vec![worn(20.0)])));
    }
}
