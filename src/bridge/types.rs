use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::dnd::TransferIntent;
use crate::inventory::{Inventory, InventoryType, ItemCatalog, ItemData, Slot};
use crate::ui::inventory::DisplayMetadata;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("rejected by the server: {reason}")]
    Rejected { reason: String },
    #[error("bridge channel disconnected")]
    Disconnected,
    #[error("bridge request timed out")]
    Timeout,
}

/// The authority's answer to a proposed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject(String),
}

impl Verdict {
    pub fn reject(reason: impl Into<String>) -> Self {
        Verdict::Reject(reason.into())
    }

    pub fn into_result(self) -> Result<(), BridgeError> {
        match self {
            Verdict::Accept => Ok(()),
            Verdict::Reject(reason) => Err(BridgeError::Rejected { reason }),
        }
    }
}

/// Fire-and-forget messages; the authority answers, if at all, with pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum BridgeNotice {
    /// Drop straight onto a container grid. `count` 0 moves everything.
    #[serde(rename_all = "camelCase")]
    SwapSlots {
        from_inventory: InventoryType,
        from_slot: u32,
        to_inventory: InventoryType,
        to_slot: u32,
        count: u32,
    },
    UseItem { slot: u32 },
    GiveItem { slot: u32, count: u32 },
}

pub enum BridgeCommand {
    ValidateMove {
        transfer: TransferIntent,
        respond_to: oneshot::Sender<Verdict>,
    },
    BuyItem {
        transfer: TransferIntent,
        respond_to: oneshot::Sender<Verdict>,
    },
    CraftItem {
        transfer: TransferIntent,
        respond_to: oneshot::Sender<Verdict>,
    },
    GetItemData {
        name: String,
        respond_to: oneshot::Sender<Option<ItemData>>,
    },
    Notice(BridgeNotice),
}

/// Either a single value or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            OneOrMany::One(value) => vec![value].into_iter(),
            OneOrMany::Many(values) => values.into_iter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_inventory: Option<Inventory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_inventory: Option<Inventory>,
}

/// One authoritative slot. Without `inventory` it targets the left side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
    pub item: Slot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightData {
    pub inventory_id: String,
    pub max_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsData {
    pub inventory_id: String,
    pub slots: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<OneOrMany<RefreshEntry>>,
    /// Account-count deltas keyed by item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<HashMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_data: Option<OneOrMany<WeightData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots_data: Option<OneOrMany<SlotsData>>,
}

/// First push of a session: the item catalog and the viewer's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    #[serde(default)]
    pub items: ItemCatalog,
    pub left_inventory: Inventory,
}

/// Authority → client pushes, in the `{action, data}` wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum BridgeEvent {
    Init(InitPayload),
    #[serde(rename = "setupInventory")]
    Setup(SetupPayload),
    #[serde(rename = "refreshSlots")]
    Refresh(RefreshPayload),
    #[serde(rename = "displayMetadata")]
    DisplayMetadata(Vec<DisplayMetadata>),
    #[serde(rename = "closeInventory")]
    Close,
}
