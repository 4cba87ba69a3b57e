//! Slot representation.
//!
//! On the wire a slot is a flat object whose optional `name` decides
//! whether it holds anything. Internally that becomes a tagged enum so the
//! empty/occupied distinction is a pattern match, not field sniffing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form item metadata (durability, container link, serial, ammo, ...).
pub type Metadata = serde_json::Map<String, Value>;

/// Shop grade requirement: a minimum grade, or a list of accepted grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Min(f64),
    AnyOf(Vec<f64>),
}

/// One item stack occupying a slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStack {
    pub slot: u32,
    pub name: String,
    pub count: Option<u32>,
    /// Total weight of the stack, not per unit.
    pub weight: Option<f64>,
    pub metadata: Option<Metadata>,
    pub durability: Option<f64>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub grade: Option<Grade>,
    pub ingredients: Option<BTreeMap<String, f64>>,
}

impl ItemStack {
    pub fn new(slot: u32, name: impl Into<String>, count: u32, weight: f64) -> Self {
        Self {
            slot,
            name: name.into(),
            count: Some(count),
            weight: Some(weight),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Id of the inventory this item opens, if it is a container link.
    pub fn container(&self) -> Option<&str> {
        self.metadata_value("container").and_then(Value::as_str)
    }

    /// Weight of a single unit, derived from the stack's total.
    pub fn unit_weight(&self) -> f64 {
        let weight = self.weight.unwrap_or(0.0);
        match self.count {
            Some(count) if count > 0 => weight / f64::from(count),
            _ => weight,
        }
    }
}

/// A fixed position in an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireSlot", into = "WireSlot")]
pub enum Slot {
    Empty { slot: u32 },
    Occupied(ItemStack),
}

impl Slot {
    pub fn empty(slot: u32) -> Self {
        Slot::Empty { slot }
    }

    pub fn number(&self) -> u32 {
        match self {
            Slot::Empty { slot } => *slot,
            Slot::Occupied(item) => item.slot,
        }
    }

    pub fn item(&self) -> Option<&ItemStack> {
        match self {
            Slot::Empty { .. } => None,
            Slot::Occupied(item) => Some(item),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.item().map(|item| item.name.as_str())
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.item().and_then(|item| item.metadata.as_ref())
    }

    pub fn container(&self) -> Option<&str> {
        self.item().and_then(ItemStack::container)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty { .. })
    }

    /// Same contents at a different position.
    pub fn renumbered(self, slot: u32) -> Self {
        match self {
            Slot::Empty { .. } => Slot::Empty { slot },
            Slot::Occupied(item) => Slot::Occupied(ItemStack { slot, ..item }),
        }
    }
}

impl From<ItemStack> for Slot {
    fn from(item: ItemStack) -> Self {
        Slot::Occupied(item)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSlot {
    slot: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    durability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ingredients: Option<BTreeMap<String, f64>>,
}

impl From<WireSlot> for Slot {
    fn from(wire: WireSlot) -> Self {
        let Some(name) = wire.name else {
            return Slot::Empty { slot: wire.slot };
        };
        Slot::Occupied(ItemStack {
            slot: wire.slot,
            name,
            count: wire.count,
            weight: wire.weight,
            metadata: wire.metadata,
            durability: wire.durability,
            price: wire.price,
            currency: wire.currency,
            grade: wire.grade,
            ingredients: wire.ingredients,
        })
    }
}

impl From<Slot> for WireSlot {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Empty { slot } => WireSlot {
                slot,
                ..WireSlot::default()
            },
            Slot::Occupied(item) => WireSlot {
                slot: item.slot,
                name: Some(item.name),
                count: item.count,
                weight: item.weight,
                metadata: item.metadata,
                durability: item.durability,
                price: item.price,
                currency: item.currency,
                grade: item.grade,
                ingredients: item.ingredients,
            },
        }
    }
}
