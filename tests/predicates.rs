mod common;

use common::*;
use serde_json::json;
use slotbridge::helpers::{
    can_craft_item, can_purchase_item, can_stack, find_available_slot, is_container, is_occupied,
};
use slotbridge::inventory::{
    Grade, Groups, Inventory, InventoryType, ItemCatalog, ItemData, ItemStack, Slot,
};
use std::collections::BTreeMap;

#[test]
fn occupancy_strict_and_lenient() {
    let full: Slot = water(1, 2).into();
    let weightless = Slot::Occupied(ItemStack {
        slot: 2,
        name: "water".into(),
        count: Some(1),
        ..ItemStack::default()
    });
    let countless = Slot::Occupied(ItemStack {
        slot: 3,
        name: "water".into(),
        weight: Some(500.0),
        ..ItemStack::default()
    });

    assert!(is_occupied(&full, false));
    assert!(is_occupied(&full, true));
    assert!(!is_occupied(&weightless, false));
    assert!(is_occupied(&countless, false));
    assert!(!is_occupied(&countless, true));
    assert!(!is_occupied(&Slot::empty(4), false));
}

#[test]
fn can_stack_is_symmetric() {
    let cold = metadata(json!({ "temperature": "cold" }));
    let slots: Vec<Slot> = vec![
        water(1, 1).into(),
        water(2, 3).into(),
        water(3, 1).with_metadata(cold.clone()).into(),
        water(4, 1).with_metadata(cold).into(),
        water(5, 1).with_metadata(Default::default()).into(),
        bread(6, 1).into(),
        Slot::empty(7),
    ];
    for a in &slots {
        for b in &slots {
            assert_eq!(can_stack(a, b), can_stack(b, a), "{a:?} vs {b:?}");
        }
    }
    assert!(can_stack(&slots[0], &slots[1]));
    assert!(can_stack(&slots[2], &slots[3]));
    // Absent metadata differs from an empty map.
    assert!(!can_stack(&slots[0], &slots[4]));
    assert!(!can_stack(&slots[0], &slots[5]));
}

#[test]
fn container_detection_uses_type() {
    assert!(is_container(&Inventory::new("bag", InventoryType::Container, 5)));
    assert!(!is_container(&stash(5, vec![])));
    assert!(!is_container(&player(5, vec![])));
}

#[test]
fn available_slot_prefers_existing_stack() {
    let inventory = stash(6, vec![bread(1, 1), water(4, 2)]);
    let data = ItemData::new("water", 500.0, true);
    let found = find_available_slot(&water(9, 1), &data, &inventory.items).unwrap();
    assert_eq!(found.number(), 4);

    let data = ItemData::new("water", 500.0, false);
    let found = find_available_slot(&water(9, 1), &data, &inventory.items).unwrap();
    assert_eq!(found.number(), 2);
}

#[test]
fn purchase_rules() {
    let mut stock = water(1, 5);
    let shop_groups = Groups::from([("police".to_string(), 0.0)]);
    let ok = |slot: &Slot, viewer: Option<&Groups>| {
        can_purchase_item(slot, &InventoryType::Shop, Some(&shop_groups), viewer)
    };

    // No grade requirement.
    assert!(ok(&stock.clone().into(), None));

    stock.grade = Some(Grade::Min(2.0));
    let graded: Slot = stock.clone().into();
    assert!(!ok(&graded, None));
    assert!(!ok(&graded, Some(&Groups::from([("police".to_string(), 1.0)]))));
    assert!(ok(&graded, Some(&Groups::from([("police".to_string(), 3.0)]))));
    assert!(!ok(&graded, Some(&Groups::from([("ems".to_string(), 9.0)]))));

    stock.grade = Some(Grade::AnyOf(vec![1.0, 4.0]));
    let listed: Slot = stock.clone().into();
    assert!(ok(&listed, Some(&Groups::from([("police".to_string(), 4.0)]))));
    assert!(!ok(&listed, Some(&Groups::from([("police".to_string(), 3.0)]))));

    stock.count = Some(0);
    assert!(!ok(&stock.into(), Some(&Groups::from([("police".to_string(), 4.0)]))));

    // Non-shop inventories are never gated.
    assert!(can_purchase_item(&water(1, 0).into(), &stash_type(), None, None));
}

#[test]
fn crafting_checks_counts_and_durability() {
    let mut recipe = ItemStack::new(1, "lockpick", 1, 50.0);
    recipe.ingredients = Some(BTreeMap::from([
        ("bread".to_string(), 2.0),
        ("weapon_knife".to_string(), 0.3),
    ]));
    let recipe: Slot = recipe.into();
    let catalog: ItemCatalog = catalog();

    let knife = ItemStack::new(3, "weapon_knife", 1, 300.0)
        .with_metadata(metadata(json!({ "durability": 40 })));
    let viewer = player(10, vec![bread(1, 1), bread(2, 1), knife]);
    assert!(can_craft_item(&recipe, &InventoryType::Crafting, &catalog, &viewer));

    let worn = ItemStack::new(3, "weapon_knife", 1, 300.0)
        .with_metadata(metadata(json!({ "durability": 20 })));
    let viewer = player(10, vec![bread(1, 2), worn]);
    assert!(!can_craft_item(&recipe, &InventoryType::Crafting, &catalog, &viewer));

    let viewer = player(10, vec![bread(1, 1)]);
    assert!(!can_craft_item(&recipe, &InventoryType::Crafting, &catalog, &viewer));
}
