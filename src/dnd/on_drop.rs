//! Decides what a drop does.
//!
//! [`resolve_drop`] reads the store and the catalog and either returns the
//! mutation to perform or the reason the drop is refused. It never changes
//! state; the session applies the plan and talks to the authority.

use crate::config::Config;
use crate::helpers::{
    can_stack, find_available_slot_where, get_target_inventory, is_container, occupied,
    total_weight,
};
use crate::inventory::{Inventory, InventoryType, ItemCatalog, ItemStack, Slot};
use crate::ui::inventory::{InventoryState, MutationKind};

use super::restrictions::SlotRules;
use super::transfer::{DragSource, DropAbort, DropTarget, TransferIntent, TransferPlan};

/// Resolves a drop of `source` onto `target` (or, without a target, onto the
/// first suitable slot of the other inventory).
pub fn resolve_drop(
    state: &InventoryState,
    catalog: &ItemCatalog,
    config: &Config,
    source: &DragSource,
    target: Option<&DropTarget>,
) -> Result<TransferPlan, DropAbort> {
    let result = plan(state, catalog, config, source, target);
    match &result {
        Ok(plan) => tracing::debug!(
            kind = ?plan.kind,
            from = plan.transfer.from_slot,
            to = plan.transfer.to_slot,
            count = plan.transfer.count,
            "Drop resolved"
        ),
        Err(abort) => tracing::warn!(
            from = source.slot,
            to = target.map(|t| t.slot),
            "Drop refused: {abort}"
        ),
    }
    result
}

fn plan(
    state: &InventoryState,
    catalog: &ItemCatalog,
    config: &Config,
    source: &DragSource,
    target: Option<&DropTarget>,
) -> Result<TransferPlan, DropAbort> {
    let (source_side, target_side) =
        get_target_inventory(&source.inventory, target.map(|t| &t.inventory));
    let source_inventory = state.inventory(source_side);
    let target_inventory = state.inventory(target_side);
    let rules = SlotRules::new(&config.slots, catalog);

    let source_slot = source_inventory
        .slot(source.slot)
        .ok_or(DropAbort::SourceEmpty { slot: source.slot })?;
    let Slot::Occupied(item) = source_slot else {
        return Err(DropAbort::SourceEmpty { slot: source.slot });
    };
    let data = catalog
        .get(&item.name)
        .ok_or_else(|| DropAbort::MissingItemData {
            name: item.name.clone(),
        })?;

    if let Some(container) = item.container() {
        if is_container(target_inventory) {
            return Err(DropAbort::ContainerInContainer {
                name: item.name.clone(),
            });
        }
        let linking = rules.is_linking_backpack(&item.name, item.slot)
            || target.is_some_and(|t| rules.is_linking_backpack(&item.name, t.slot));
        if !linking && state.open_container() == Some(container) {
            return Err(DropAbort::ContainerOpen {
                name: item.name.clone(),
            });
        }
    }

    let target_slot = match target {
        Some(target) => target_inventory.slot(target.slot),
        None => find_available_slot_where(item, data, &target_inventory.items, |slot| {
            rules.accepts_in(target_inventory, slot.number(), &item.name)
        }),
    }
    .ok_or_else(|| DropAbort::NoTargetSlot {
        name: item.name.clone(),
    })?;

    if source_side == target_side && item.slot == target_slot.number() {
        return Err(DropAbort::SameSlot);
    }

    if let Some(target_item) = target_slot.item() {
        if let Some(container) = target_item.container() {
            if state.open_container() == Some(container)
                && !rules.is_linking_backpack(&target_item.name, target_item.slot)
            {
                return Err(DropAbort::TargetContainerOpen {
                    source_name: item.name.clone(),
                    target: target_item.name.clone(),
                });
            }
        }
    }

    if !rules.accepts_in(target_inventory, target_slot.number(), &item.name) {
        return Err(DropAbort::RestrictedSlot {
            name: item.name.clone(),
            slot: target_slot.number(),
        });
    }

    let target_item = occupied(target_slot, true);
    if let Some(outgoing) = target_item {
        if !rules.accepts_in(source_inventory, item.slot, &outgoing.name) {
            return Err(DropAbort::RestrictedSlot {
                name: outgoing.name.clone(),
                slot: item.slot,
            });
        }
    }

    let count = transfer_count(state, &source_inventory.kind, item);
    if count == 0 {
        return Err(DropAbort::InvalidCount);
    }

    let kind = match target_item {
        Some(_) if data.stack && can_stack(source_slot, target_slot) => MutationKind::Stack,
        Some(_) => MutationKind::Swap,
        None => MutationKind::Move,
    };

    // A swap carries the target item back to the source inventory.
    if let (MutationKind::Swap, Some(outgoing)) = (kind, target_item) {
        if let Some(container) = outgoing.container() {
            if is_container(source_inventory) || container == source_inventory.id {
                return Err(DropAbort::ContainerInContainer {
                    name: outgoing.name.clone(),
                });
            }
        }
    }

    if config.transfer.enforce_weight_limit && source_side != target_side {
        check_weight(kind, source_inventory, target_inventory, item, target_item, count)?;
    }

    Ok(TransferPlan {
        kind,
        transfer: TransferIntent {
            from_slot: item.slot,
            to_slot: target_slot.number(),
            from_type: source_inventory.kind.clone(),
            to_type: target_inventory.kind.clone(),
            count,
        },
    })
}

/// Units a drop carries: half with shift held (never from a shop), else
/// the typed amount capped at what the slot holds, 0 meaning all of it.
pub fn transfer_count(state: &InventoryState, source_kind: &InventoryType, item: &ItemStack) -> u32 {
    let available = item.count.unwrap_or(1);
    if state.shift_pressed && available > 1 && *source_kind != InventoryType::Shop {
        available / 2
    } else if state.item_amount == 0 || state.item_amount > available {
        available
    } else {
        state.item_amount
    }
}

fn check_weight(
    kind: MutationKind,
    source: &Inventory,
    target: &Inventory,
    item: &ItemStack,
    target_item: Option<&ItemStack>,
    count: u32,
) -> Result<(), DropAbort> {
    match (kind, target_item) {
        (MutationKind::Swap, Some(outgoing)) => {
            let incoming = item.weight.unwrap_or(0.0);
            let outgoing = outgoing.weight.unwrap_or(0.0);
            within_limit(target, total_weight(&target.items) - outgoing + incoming)?;
            within_limit(source, total_weight(&source.items) - incoming + outgoing)
        }
        _ => {
            let incoming = item.unit_weight() * f64::from(count);
            within_limit(target, total_weight(&target.items) + incoming)
        }
    }
}

fn within_limit(inventory: &Inventory, weight: f64) -> Result<(), DropAbort> {
    match inventory.max_weight {
        Some(max_weight) if weight > max_weight => Err(DropAbort::OverWeight {
            id: inventory.id.clone(),
            weight,
            max_weight,
        }),
        _ => Ok(()),
    }
}
