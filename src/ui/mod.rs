pub mod inventory;
pub mod mvi;
pub mod store;

pub use store::InventoryStore;
