//! Pure predicates over slots and inventories.

mod eligibility;
mod occupancy;
mod placement;

pub use eligibility::{can_craft_item, can_purchase_item};
pub use occupancy::{can_stack, is_container, is_occupied, occupied};
pub use placement::{
    find_available_slot, find_available_slot_where, get_target_inventory, total_weight,
};
