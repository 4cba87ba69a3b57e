use serde::{Deserialize, Serialize};

use crate::inventory::ItemCategory;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub slots: SlotsConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub bridge: BridgeSettings,
}

/// Equipment slots of the player inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotsConfig {
    /// Slots that accept a single item category.
    #[serde(default = "default_restricted")]
    pub restricted: Vec<RestrictedSlot>,
    /// Slot a backpack may occupy while its own container is open.
    #[serde(default = "default_linking_slot")]
    pub linking_slot: u32,
    /// Infer categories from item names when the catalog has none.
    #[serde(default = "default_true")]
    pub legacy_name_heuristics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestrictedSlot {
    pub slot: u32,
    pub category: ItemCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Refuse cross-inventory drops that would exceed `maxWeight`.
    #[serde(default = "default_true")]
    pub enforce_weight_limit: bool,
}

/// Channel settings for the bridge to the remote authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Capacity of each bridge channel (default: 16).
    #[serde(default = "default_buffer")]
    pub buffer: usize,
    /// Give up on a request after this many milliseconds. Unset waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

fn default_restricted() -> Vec<RestrictedSlot> {
    vec![
        RestrictedSlot {
            slot: 1,
            category: ItemCategory::Weapon,
        },
        RestrictedSlot {
            slot: 2,
            category: ItemCategory::Weapon,
        },
        RestrictedSlot {
            slot: 6,
            category: ItemCategory::Backpack,
        },
        RestrictedSlot {
            slot: 7,
            category: ItemCategory::Parachute,
        },
        RestrictedSlot {
            slot: 8,
            category: ItemCategory::Armor,
        },
        RestrictedSlot {
            slot: 9,
            category: ItemCategory::Phone,
        },
    ]
}

fn default_linking_slot() -> u32 {
    6
}

fn default_true() -> bool {
    true
}

fn default_buffer() -> usize {
    16
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            restricted: default_restricted(),
            linking_slot: default_linking_slot(),
            legacy_name_heuristics: true,
        }
    }
}

impl SlotsConfig {
    /// Category required by `slot`, if it is restricted.
    pub fn required_category(&self, slot: u32) -> Option<ItemCategory> {
        self.restricted
            .iter()
            .find(|rule| rule.slot == slot)
            .map(|rule| rule.category)
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            enforce_weight_limit: true,
        }
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
            request_timeout_ms: None,
        }
    }
}

impl BridgeSettings {
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_ms.map(std::time::Duration::from_millis)
    }
}
