use serde::{Deserialize, Serialize};

use crate::bridge::{RefreshPayload, SetupPayload};
use crate::dnd::TransferIntent;
use crate::ui::mvi::Intent;

use super::state::{DisplayMetadata, RequestId};

/// Everything that can change the inventory store.
#[derive(Debug, Clone)]
pub enum InventoryIntent {
    /// Replace one or both inventories wholesale.
    Setup { payload: SetupPayload, now: u64 },
    /// Authoritative slot corrections pushed by the server.
    Refresh { payload: RefreshPayload, now: u64 },
    /// Relocate `count` units onto an empty slot.
    Move { transfer: TransferIntent, now: u64 },
    /// Merge `count` units into an equal stack.
    Stack { transfer: TransferIntent },
    /// Trade whole slot payloads.
    Swap { transfer: TransferIntent, now: u64 },
    /// Back to empty placeholders. Tooltip metadata keys survive.
    Reset,
    SetItemAmount(u32),
    SetShiftPressed(bool),
    /// Weight of the left-side item linking the open container.
    SetContainerWeight(f64),
    AddDisplayMetadata(Vec<DisplayMetadata>),

    /// A remote request started: snapshot both inventories.
    Pending { request: RequestId },
    /// The remote authority accepted: keep the optimistic state.
    Fulfilled { request: RequestId },
    /// The remote authority refused: restore the snapshot.
    Rejected { request: RequestId },
}

impl Intent for InventoryIntent {}

/// Which mutation a resolved drop performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Move,
    Stack,
    Swap,
}

impl MutationKind {
    pub fn intent(self, transfer: TransferIntent, now: u64) -> InventoryIntent {
        match self {
            MutationKind::Move => InventoryIntent::Move { transfer, now },
            MutationKind::Stack => InventoryIntent::Stack { transfer },
            MutationKind::Swap => InventoryIntent::Swap { transfer, now },
        }
    }
}
