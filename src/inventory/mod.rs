//! Slot and inventory data model.

mod catalog;
mod durability;
mod grid;
mod slot;

pub use catalog::{
    ItemButton, ItemCatalog, ItemCategory, ItemData, SharedCatalog, LEGACY_BACKPACK_NAMES,
};
pub use durability::{item_durability, refresh_durability, unix_now};
pub use grid::{Groups, Inventory, InventoryType};
pub use slot::{Grade, ItemStack, Metadata, Slot};
