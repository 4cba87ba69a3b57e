//! Equipment slots that accept a single item category.

use crate::config::SlotsConfig;
use crate::inventory::{Inventory, InventoryType, ItemCatalog, ItemCategory};

/// Slot rules bound to a catalog for one resolution.
pub struct SlotRules<'a> {
    config: &'a SlotsConfig,
    catalog: &'a ItemCatalog,
}

impl<'a> SlotRules<'a> {
    pub fn new(config: &'a SlotsConfig, catalog: &'a ItemCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn category(&self, name: &str) -> Option<ItemCategory> {
        self.catalog
            .category_of(name, self.config.legacy_name_heuristics)
    }

    pub fn is_backpack(&self, name: &str) -> bool {
        self.category(name) == Some(ItemCategory::Backpack)
    }

    pub fn is_restricted(&self, kind: &InventoryType, slot: u32) -> bool {
        *kind == InventoryType::Player && self.config.required_category(slot).is_some()
    }

    /// Whether slot `slot` of an inventory of `kind` takes an item named `name`.
    pub fn accepts(&self, kind: &InventoryType, slot: u32, name: &str) -> bool {
        if *kind != InventoryType::Player {
            return true;
        }
        match self.config.required_category(slot) {
            Some(required) => self.category(name) == Some(required),
            None => true,
        }
    }

    /// [`SlotRules::accepts`] for a slot of `inventory`.
    pub fn accepts_in(&self, inventory: &Inventory, slot: u32, name: &str) -> bool {
        self.accepts(&inventory.kind, slot, name)
    }

    /// The backpack carve-out: a backpack moving into or out of the linking
    /// slot may be dragged while its container is open.
    pub fn is_linking_backpack(&self, name: &str, slot: u32) -> bool {
        slot == self.config.linking_slot && self.is_backpack(name)
    }
}
