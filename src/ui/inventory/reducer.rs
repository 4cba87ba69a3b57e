//! Reducer for the inventory store.
//!
//! The only place inventories change. Side effects (bridge requests,
//! catalog updates) stay with the caller around the dispatch.

use crate::bridge::{RefreshPayload, SetupPayload};
use crate::dnd::TransferIntent;
use crate::helpers::get_target_inventory;
use crate::inventory::{item_durability, refresh_durability, Inventory, ItemStack, Slot};
use crate::ui::mvi::Reducer;

use super::intent::InventoryIntent;
use super::state::{DisplayMetadata, InventoryState, RequestId, Side, Snapshot};

pub struct InventoryReducer;

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Intent = InventoryIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            InventoryIntent::Setup { payload, now } => setup(&mut state, payload, now),
            InventoryIntent::Refresh { payload, now } => refresh(&mut state, payload, now),
            InventoryIntent::Move { transfer, now } => move_slots(&mut state, &transfer, now),
            InventoryIntent::Stack { transfer } => stack_slots(&mut state, &transfer),
            InventoryIntent::Swap { transfer, now } => swap_slots(&mut state, &transfer, now),
            InventoryIntent::Reset => {
                tracing::info!("Inventories reset");
                state = InventoryState {
                    display_metadata: std::mem::take(&mut state.display_metadata),
                    ..InventoryState::default()
                };
            }
            InventoryIntent::SetItemAmount(amount) => state.item_amount = amount,
            InventoryIntent::SetShiftPressed(pressed) => state.shift_pressed = pressed,
            InventoryIntent::SetContainerWeight(weight) => set_container_weight(&mut state, weight),
            InventoryIntent::AddDisplayMetadata(entries) => {
                add_display_metadata(&mut state.display_metadata, entries)
            }
            InventoryIntent::Pending { request } => {
                let snapshot = Snapshot {
                    left: state.left.clone(),
                    right: state.right.clone(),
                };
                state.history.insert(request, snapshot);
            }
            InventoryIntent::Fulfilled { request } => {
                state.history.remove(&request);
            }
            InventoryIntent::Rejected { request } => rollback(&mut state, request),
        }
        state
    }
}

fn setup(state: &mut InventoryState, payload: SetupPayload, now: u64) {
    if let Some(mut left) = payload.left_inventory {
        prepare(&mut left, now);
        tracing::info!(id = %left.id, slots = left.slots, "Left inventory set up");
        state.left = left;
    }
    if let Some(mut right) = payload.right_inventory {
        prepare(&mut right, now);
        tracing::info!(id = %right.id, kind = %right.kind, "Right inventory set up");
        state.right = right;
    }
    state.shift_pressed = false;
    // Snapshots of the previous view must not resurface.
    state.history.clear();
}

fn prepare(inventory: &mut Inventory, now: u64) {
    inventory.normalize();
    for slot in &mut inventory.items {
        refresh_durability(slot, now);
    }
}

fn side_by_id(state: &InventoryState, id: &str) -> Option<Side> {
    if id.is_empty() {
        None
    } else if state.left.id == id {
        Some(Side::Left)
    } else if state.right.id == id {
        Some(Side::Right)
    } else {
        None
    }
}

fn refresh(state: &mut InventoryState, payload: RefreshPayload, now: u64) {
    for resize in payload.slots_data.into_iter().flatten() {
        match side_by_id(state, &resize.inventory_id) {
            Some(side) => state.inventory_mut(side).resize(resize.slots),
            None => tracing::debug!(id = %resize.inventory_id, "Slot count for unknown inventory"),
        }
    }

    for entry in payload.items.into_iter().flatten() {
        let side = match entry.inventory.as_deref() {
            None => Some(Side::Left),
            Some(id) => side_by_id(state, id),
        };
        let Some(side) = side else {
            tracing::warn!(
                inventory = entry.inventory.as_deref().unwrap_or_default(),
                slot = entry.item.number(),
                "Refresh for an inventory that is not open, skipped"
            );
            continue;
        };
        let mut item = entry.item;
        refresh_durability(&mut item, now);
        let number = item.number();
        if !state.inventory_mut(side).put(number, item) {
            tracing::warn!(slot = number, ?side, "Refresh outside the grid, skipped");
        }
    }

    for weight in payload.weight_data.into_iter().flatten() {
        if let Some(side) = side_by_id(state, &weight.inventory_id) {
            state.inventory_mut(side).max_weight = Some(weight.max_weight);
        }
    }
}

fn source_item(state: &InventoryState, side: Side, slot: u32) -> Option<ItemStack> {
    state.inventory(side).slot(slot).and_then(Slot::item).cloned()
}

fn move_slots(state: &mut InventoryState, transfer: &TransferIntent, now: u64) {
    let (source_side, target_side) =
        get_target_inventory(&transfer.from_type, Some(&transfer.to_type));
    let Some(from) = source_item(state, source_side, transfer.from_slot) else {
        tracing::warn!(slot = transfer.from_slot, "Move from an empty slot ignored");
        return;
    };

    let moved = ItemStack {
        slot: transfer.to_slot,
        count: Some(transfer.count),
        weight: Some(from.unit_weight() * f64::from(transfer.count)),
        durability: item_durability(from.metadata.as_ref(), now),
        ..from.clone()
    };
    if !state
        .inventory_mut(target_side)
        .put(transfer.to_slot, moved.into())
    {
        tracing::warn!(slot = transfer.to_slot, "Move target outside the grid");
        return;
    }

    if transfer.from_type.is_vendor() {
        return;
    }
    take_from_source(state.inventory_mut(source_side), &from, transfer.count);
}

fn stack_slots(state: &mut InventoryState, transfer: &TransferIntent) {
    let (source_side, target_side) =
        get_target_inventory(&transfer.from_type, Some(&transfer.to_type));
    let (Some(from), Some(to)) = (
        source_item(state, source_side, transfer.from_slot),
        source_item(state, target_side, transfer.to_slot),
    ) else {
        tracing::warn!(
            from = transfer.from_slot,
            to = transfer.to_slot,
            "Stack needs two occupied slots"
        );
        return;
    };

    let Some(total) = to.count.unwrap_or(0).checked_add(transfer.count) else {
        tracing::warn!(
            to = transfer.to_slot,
            count = transfer.count,
            "Stack would overflow the target count, ignored"
        );
        return;
    };
    let merged = ItemStack {
        count: Some(total),
        weight: Some(from.unit_weight() * f64::from(total)),
        ..to
    };
    state
        .inventory_mut(target_side)
        .put(transfer.to_slot, merged.into());

    if transfer.from_type.is_vendor() {
        return;
    }
    take_from_source(state.inventory_mut(source_side), &from, transfer.count);
}

// Leaves the remainder with its weight recomputed, or an empty slot.
fn take_from_source(inventory: &mut Inventory, from: &ItemStack, count: u32) {
    let remaining = from.count.unwrap_or(0).saturating_sub(count);
    let slot = if remaining > 0 {
        Slot::Occupied(ItemStack {
            count: Some(remaining),
            weight: Some(from.unit_weight() * f64::from(remaining)),
            ..from.clone()
        })
    } else {
        Slot::empty(from.slot)
    };
    inventory.put(from.slot, slot);
}

fn swap_slots(state: &mut InventoryState, transfer: &TransferIntent, now: u64) {
    let (source_side, target_side) =
        get_target_inventory(&transfer.from_type, Some(&transfer.to_type));
    let source = state.inventory(source_side).slot(transfer.from_slot).cloned();
    let target = state.inventory(target_side).slot(transfer.to_slot).cloned();
    let (Some(source), Some(target)) = (source, target) else {
        tracing::warn!(
            from = transfer.from_slot,
            to = transfer.to_slot,
            "Swap outside the grid ignored"
        );
        return;
    };

    let mut into_source = target.renumbered(transfer.from_slot);
    let mut into_target = source.renumbered(transfer.to_slot);
    refresh_durability(&mut into_source, now);
    refresh_durability(&mut into_target, now);

    state
        .inventory_mut(source_side)
        .put(transfer.from_slot, into_source);
    state
        .inventory_mut(target_side)
        .put(transfer.to_slot, into_target);
}

fn set_container_weight(state: &mut InventoryState, weight: f64) {
    let Some(open) = state.open_container().map(str::to_owned) else {
        return;
    };
    let link = state.left.items.iter_mut().find_map(|slot| match slot {
        Slot::Occupied(item) if item.container() == Some(open.as_str()) => Some(item),
        _ => None,
    });
    if let Some(item) = link {
        item.weight = Some(weight);
    }
}

fn add_display_metadata(current: &mut Vec<DisplayMetadata>, entries: Vec<DisplayMetadata>) {
    for entry in entries {
        if !current.iter().any(|known| known.value == entry.value) {
            current.push(entry);
        }
    }
}

fn rollback(state: &mut InventoryState, request: RequestId) {
    let Some(snapshot) = state.history.remove(&request) else {
        tracing::debug!(request = request.0, "Rejection for an unknown request");
        return;
    };
    state.left = snapshot.left;
    state.right = snapshot.right;

    // Later snapshots were taken on top of the rejected mutation.
    let stale = state.history.split_off(&request);
    if !stale.is_empty() {
        tracing::debug!(
            request = request.0,
            dropped = stale.len(),
            "Discarded snapshots newer than the rejected request"
        );
    }
    tracing::info!(request = request.0, "Rolled back rejected transfer");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryType;

    fn state() -> InventoryState {
        let mut left = Inventory::new("player-1", InventoryType::Player, 10);
        left.put(5, ItemStack::new(5, "water", 3, 1500.0).into());
        let right = Inventory::new("stash-1", InventoryType::Other("stash".into()), 10);
        InventoryState::new(left, right)
    }

    fn transfer(from: u32, to: u32, count: u32) -> TransferIntent {
        TransferIntent {
            from_slot: from,
            to_slot: to,
            from_type: InventoryType::Player,
            to_type: InventoryType::Player,
            count,
        }
    }

    #[test]
    fn pending_marks_busy_and_fulfilled_clears() {
        let state = InventoryReducer::reduce(
            state(),
            InventoryIntent::Pending {
                request: RequestId(1),
            },
        );
        assert!(state.is_busy());
        let state = InventoryReducer::reduce(
            state,
            InventoryIntent::Fulfilled {
                request: RequestId(1),
            },
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn rejected_restores_snapshot() {
        let before = state();
        let pending = InventoryReducer::reduce(
            before.clone(),
            InventoryIntent::Pending {
                request: RequestId(7),
            },
        );
        let moved = InventoryReducer::reduce(
            pending,
            InventoryIntent::Move {
                transfer: transfer(5, 8, 3),
                now: 0,
            },
        );
        assert!(moved.left.slot(5).unwrap().is_empty());

        let restored = InventoryReducer::reduce(
            moved,
            InventoryIntent::Rejected {
                request: RequestId(7),
            },
        );
        assert_eq!(restored.left, before.left);
        assert_eq!(restored.right, before.right);
        assert!(!restored.is_busy());
    }

    #[test]
    fn rejection_drops_newer_snapshots() {
        let mut s = state();
        s = InventoryReducer::reduce(s, InventoryIntent::Pending { request: RequestId(1) });
        s = InventoryReducer::reduce(s, InventoryIntent::Pending { request: RequestId(2) });
        s = InventoryReducer::reduce(s, InventoryIntent::Rejected { request: RequestId(1) });
        assert_eq!(s.pending_requests(), 0);
    }

    #[test]
    fn unknown_settlement_is_noop() {
        let before = state();
        let after = InventoryReducer::reduce(
            before.clone(),
            InventoryIntent::Rejected {
                request: RequestId(99),
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn move_to_grid_edge_out_of_range_is_ignored() {
        let before = state();
        let after = InventoryReducer::reduce(
            before.clone(),
            InventoryIntent::Move {
                transfer: transfer(5, 11, 1),
                now: 0,
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn display_metadata_deduplicates_by_value() {
        let entry = |value: &str| DisplayMetadata {
            metadata: "Serial".into(),
            value: value.into(),
        };
        let s = InventoryReducer::reduce(
            state(),
            InventoryIntent::AddDisplayMetadata(vec![entry("serial"), entry("serial")]),
        );
        let s = InventoryReducer::reduce(s, InventoryIntent::AddDisplayMetadata(vec![entry("serial"), entry("ammo")]));
        assert_eq!(s.display_metadata.len(), 2);
    }

    #[test]
    fn overflowing_stack_is_ignored() {
        let mut before = state();
        before
            .left
            .put(8, ItemStack::new(8, "water", u32::MAX - 1, 500.0).into());
        let after = InventoryReducer::reduce(
            before.clone(),
            InventoryIntent::Stack {
                transfer: transfer(5, 8, 2),
            },
        );
        assert_eq!(after, before);
    }
}
