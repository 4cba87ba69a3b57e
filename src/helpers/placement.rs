use crate::inventory::{InventoryType, ItemData, ItemStack, Slot};
use crate::ui::inventory::Side;

use super::occupancy::occupied;

/// Resolves the inventories a drag reads from and writes to.
///
/// Without a target type the drop goes to the side opposite the source
/// (quick-move and drag-to-use shortcuts).
pub fn get_target_inventory(
    source: &InventoryType,
    target: Option<&InventoryType>,
) -> (Side, Side) {
    let source_side = Side::of(source);
    let target_side = match target {
        Some(kind) => Side::of(kind),
        None => source_side.opposite(),
    };
    (source_side, target_side)
}

/// First slot that can take `item`: an equal stack when the item stacks,
/// else the first empty slot.
pub fn find_available_slot<'a>(
    item: &ItemStack,
    data: &ItemData,
    items: &'a [Slot],
) -> Option<&'a Slot> {
    find_available_slot_where(item, data, items, |_| true)
}

/// [`find_available_slot`] restricted to slots accepted by `allowed`.
pub fn find_available_slot_where<'a, F>(
    item: &ItemStack,
    data: &ItemData,
    items: &'a [Slot],
    allowed: F,
) -> Option<&'a Slot>
where
    F: Fn(&Slot) -> bool,
{
    let first_empty = || items.iter().find(|slot| slot.is_empty() && allowed(*slot));

    if !data.stack {
        return first_empty();
    }

    items
        .iter()
        .find(|slot| {
            slot.item().is_some_and(|other| {
                other.name == item.name && other.metadata == item.metadata
            }) && allowed(*slot)
        })
        .or_else(first_empty)
}

/// Sum of the weights of every occupied slot.
pub fn total_weight(items: &[Slot]) -> f64 {
    items
        .iter()
        .filter_map(|slot| occupied(slot, false))
        .filter_map(|item| item.weight)
        .sum()
}
