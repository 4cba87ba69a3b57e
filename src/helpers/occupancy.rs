use crate::inventory::{Inventory, InventoryType, ItemStack, Slot};

/// True when the slot holds an item with a known weight. `strict` also
/// requires a count, for sources whose data may be only partly populated.
pub fn is_occupied(slot: &Slot, strict: bool) -> bool {
    occupied(slot, strict).is_some()
}

/// The slot's item when [`is_occupied`] holds.
pub fn occupied(slot: &Slot, strict: bool) -> Option<&ItemStack> {
    match slot {
        Slot::Occupied(item) if item.weight.is_some() && (!strict || item.count.is_some()) => {
            Some(item)
        }
        _ => None,
    }
}

/// Same item name and deep-equal metadata. An absent metadata map is not
/// equal to an empty one.
pub fn can_stack(a: &Slot, b: &Slot) -> bool {
    a.name() == b.name() && a.metadata() == b.metadata()
}

pub fn is_container(inventory: &Inventory) -> bool {
    inventory.kind == InventoryType::Container
}
