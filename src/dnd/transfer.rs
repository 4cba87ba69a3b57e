use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::InventoryType;
use crate::ui::inventory::MutationKind;

/// A proposed transfer as sent to the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntent {
    pub from_slot: u32,
    pub to_slot: u32,
    pub from_type: InventoryType,
    pub to_type: InventoryType,
    pub count: u32,
}

/// The slot a drag started from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSource {
    pub inventory: InventoryType,
    pub slot: u32,
}

/// Where the drag ended. Absent for quick-move shortcuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    pub inventory: InventoryType,
    pub slot: u32,
}

impl DragSource {
    pub fn new(inventory: InventoryType, slot: u32) -> Self {
        Self { inventory, slot }
    }
}

impl DropTarget {
    pub fn new(inventory: InventoryType, slot: u32) -> Self {
        Self { inventory, slot }
    }
}

/// A drop the resolver accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPlan {
    pub kind: MutationKind,
    pub transfer: TransferIntent,
}

/// Why a drop was refused before anything changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropAbort {
    #[error("source slot {slot} is empty")]
    SourceEmpty { slot: u32 },

    #[error("no item data for '{name}'")]
    MissingItemData { name: String },

    #[error("cannot store container '{name}' inside another container")]
    ContainerInContainer { name: String },

    #[error("cannot move container '{name}' while it is open")]
    ContainerOpen { name: String },

    #[error("no slot available for '{name}'")]
    NoTargetSlot { name: String },

    #[error("source and target are the same slot")]
    SameSlot,

    #[error("cannot swap '{source_name}' with open container '{target}'")]
    TargetContainerOpen { source_name: String, target: String },

    #[error("'{name}' does not fit restricted slot {slot}")]
    RestrictedSlot { name: String, slot: u32 },

    #[error("the viewer may not buy or craft '{name}'")]
    NotEligible { name: String },

    #[error("nothing to transfer")]
    InvalidCount,

    #[error("'{id}' cannot carry {weight} (max {max_weight})")]
    OverWeight {
        id: String,
        weight: f64,
        max_weight: f64,
    },
}
