//! Shared fixtures for integration tests.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use slotbridge::bridge::{Authority, BridgeLayer, Verdict};
use slotbridge::config::{Config, ConfigStore};
use slotbridge::inventory::{
    Inventory, InventoryType, ItemCatalog, ItemCategory, ItemData, ItemStack, Metadata,
    SharedCatalog, Slot,
};
use slotbridge::replay::ScriptedAuthority;
use slotbridge::session::InventorySession;
use slotbridge::ui::inventory::InventoryState;
use slotbridge::ui::InventoryStore;
use tokio::task::JoinHandle;

pub const PLAYER_ID: &str = "player-1";
pub const STASH_ID: &str = "stash-1";

pub fn stash_type() -> InventoryType {
    InventoryType::Other("stash".into())
}

pub fn catalog() -> ItemCatalog {
    let mut pistol = ItemData::new("WEAPON_PISTOL", 1200.0, false);
    pistol.weapon = true;
    [
        ItemData::new("water", 500.0, true),
        ItemData::new("bread", 200.0, true),
        ItemData::new("weapon_knife", 300.0, false),
        pistol,
        ItemData::new("hiking_backpack", 1000.0, false),
        ItemData::new("satchel", 400.0, false).with_category(ItemCategory::Backpack),
        ItemData::new("phone", 190.0, false).with_category(ItemCategory::Phone),
    ]
    .into_iter()
    .collect()
}

pub fn shared_catalog() -> SharedCatalog {
    Arc::new(RwLock::new(catalog()))
}

pub fn metadata(value: Value) -> Metadata {
    value.as_object().cloned().expect("metadata object")
}

/// Player inventory of `slots` slots holding `items`.
pub fn player(slots: u32, items: Vec<ItemStack>) -> Inventory {
    fill(Inventory::new(PLAYER_ID, InventoryType::Player, slots), items)
}

pub fn stash(slots: u32, items: Vec<ItemStack>) -> Inventory {
    fill(Inventory::new(STASH_ID, stash_type(), slots), items)
}

pub fn fill(mut inventory: Inventory, items: Vec<ItemStack>) -> Inventory {
    for item in items {
        let number = item.slot;
        assert!(inventory.put(number, item.into()), "slot {number} outside grid");
    }
    inventory
}

pub fn water(slot: u32, count: u32) -> ItemStack {
    ItemStack::new(slot, "water", count, 500.0 * f64::from(count))
}

pub fn bread(slot: u32, count: u32) -> ItemStack {
    ItemStack::new(slot, "bread", count, 200.0 * f64::from(count))
}

pub fn item_at(inventory: &Inventory, slot: u32) -> Option<ItemStack> {
    inventory.slot(slot).and_then(Slot::item).cloned()
}

/// A session wired to `authority` running on its own task.
pub struct Harness {
    pub session: InventorySession,
    pub server: JoinHandle<()>,
}

pub fn harness<A: Authority + 'static>(state: InventoryState, authority: A) -> Harness {
    harness_with(state, authority, Config::default())
}

pub fn harness_with<A: Authority + 'static>(
    state: InventoryState,
    authority: A,
    config: Config,
) -> Harness {
    let (client, _events, endpoint) = BridgeLayer::new(&config.bridge);
    let server = tokio::spawn(endpoint.serve(authority));
    let session = InventorySession::new(
        InventoryStore::new(state),
        shared_catalog(),
        ConfigStore::new(config, PathBuf::from("config.toml")),
        client,
    );
    Harness { session, server }
}

pub fn accepting() -> ScriptedAuthority {
    ScriptedAuthority::new(Vec::<Verdict>::new())
}

pub fn rejecting(reason: &str) -> ScriptedAuthority {
    ScriptedAuthority::new([Verdict::reject(reason)])
}
