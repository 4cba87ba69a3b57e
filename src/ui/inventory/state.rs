//! State held by the inventory store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, InventoryType};
use crate::ui::mvi::UiState;

/// Which of the two open inventories an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The viewer's own inventory.
    Left,
    /// Whatever the viewer has open next to it.
    Right,
}

impl Side {
    /// Player inventories live on the left, everything else on the right.
    pub fn of(kind: &InventoryType) -> Self {
        if *kind == InventoryType::Player {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Id of an in-flight remote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Extra metadata key shown in tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetadata {
    pub metadata: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Snapshot {
    pub(super) left: Inventory,
    pub(super) right: Inventory,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryState {
    pub left: Inventory,
    pub right: Inventory,
    /// Amount typed by the viewer; 0 means "everything".
    pub item_amount: u32,
    pub shift_pressed: bool,
    pub display_metadata: Vec<DisplayMetadata>,
    /// Pre-mutation copies keyed by pending request, oldest first.
    pub(super) history: BTreeMap<RequestId, Snapshot>,
}

impl UiState for InventoryState {}

impl InventoryState {
    pub fn new(left: Inventory, right: Inventory) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }

    pub fn inventory(&self, side: Side) -> &Inventory {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn inventory_mut(&mut self, side: Side) -> &mut Inventory {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// True while any remote request is unsettled. Slots should refuse
    /// new drags meanwhile.
    pub fn is_busy(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn pending_requests(&self) -> usize {
        self.history.len()
    }

    /// Id of the right-hand inventory when it is a container someone can
    /// link to, i.e. the one currently open.
    pub fn open_container(&self) -> Option<&str> {
        if self.right.id.is_empty() {
            None
        } else {
            Some(&self.right.id)
        }
    }
}
