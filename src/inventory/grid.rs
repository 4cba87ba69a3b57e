use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::slot::Slot;

/// Permission group name to grade.
pub type Groups = HashMap<String, f64>;

/// Inventory type tag. Open-ended: unknown tags (stash, trunk, drop, ...)
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InventoryType {
    Player,
    Shop,
    Crafting,
    Container,
    Other(String),
}

impl InventoryType {
    pub fn as_str(&self) -> &str {
        match self {
            InventoryType::Player => "player",
            InventoryType::Shop => "shop",
            InventoryType::Crafting => "crafting",
            InventoryType::Container => "container",
            InventoryType::Other(tag) => tag,
        }
    }

    /// Shop and crafting grids hand out items without losing them locally.
    pub fn is_vendor(&self) -> bool {
        matches!(self, InventoryType::Shop | InventoryType::Crafting)
    }
}

impl Default for InventoryType {
    fn default() -> Self {
        InventoryType::Other(String::new())
    }
}

impl From<String> for InventoryType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "player" => InventoryType::Player,
            "shop" => InventoryType::Shop,
            "crafting" => InventoryType::Crafting,
            "container" => InventoryType::Container,
            _ => InventoryType::Other(tag),
        }
    }
}

impl From<&str> for InventoryType {
    fn from(tag: &str) -> Self {
        InventoryType::from(tag.to_string())
    }
}

impl From<InventoryType> for String {
    fn from(kind: InventoryType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for InventoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed-capacity grid of slots.
///
/// Once normalized, `items[i].number() == i + 1` for every position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InventoryType,
    pub slots: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Groups>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<Slot>,
}

impl Inventory {
    /// Empty inventory with `slots` placeholder slots.
    pub fn new(id: impl Into<String>, kind: InventoryType, slots: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            slots,
            max_weight: None,
            groups: None,
            label: None,
            items: (1..=slots).map(Slot::empty).collect(),
        }
    }

    pub fn slot(&self, number: u32) -> Option<&Slot> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.items.get(index)
    }

    pub fn slot_mut(&mut self, number: u32) -> Option<&mut Slot> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.items.get_mut(index)
    }

    /// Overwrites the slot at `number`, renumbering the payload to match.
    /// Returns false when the position is outside the grid.
    pub fn put(&mut self, number: u32, slot: Slot) -> bool {
        match self.slot_mut(number) {
            Some(existing) => {
                *existing = slot.renumbered(number);
                true
            }
            None => false,
        }
    }

    /// Rebuilds `items` as a dense grid of `slots` positions. Items whose
    /// slot number falls outside the grid are dropped; holes become empty.
    pub fn normalize(&mut self) {
        let mut by_number: BTreeMap<u32, Slot> = BTreeMap::new();
        for slot in self.items.drain(..) {
            by_number.insert(slot.number(), slot);
        }
        self.items = (1..=self.slots)
            .map(|number| by_number.remove(&number).unwrap_or(Slot::empty(number)))
            .collect();
    }

    /// Changes capacity, padding with empty slots or truncating.
    pub fn resize(&mut self, slots: u32) {
        self.slots = slots;
        self.normalize();
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireItems {
    List(Vec<Option<Slot>>),
    Map(BTreeMap<String, Option<Slot>>),
}

/// Accepts arrays with holes (`null`) and objects keyed by slot number.
fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<Slot>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match WireItems::deserialize(deserializer)? {
        WireItems::List(list) => list.into_iter().flatten().collect(),
        WireItems::Map(map) => map.into_values().flatten().collect(),
    };
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemStack;
    use serde_json::json;

    #[test]
    fn type_tags_round_trip_through_strings() {
        assert_eq!(InventoryType::from("player"), InventoryType::Player);
        assert_eq!(
            InventoryType::from("stash"),
            InventoryType::Other("stash".into())
        );
        assert_eq!(String::from(InventoryType::Crafting), "crafting");
    }

    #[test]
    fn sparse_items_normalize_to_dense_grid() {
        let mut inventory: Inventory = serde_json::from_value(json!({
            "id": "trunk-1",
            "type": "trunk",
            "slots": 4,
            "maxWeight": 10000,
            "items": [null, { "slot": 3, "name": "bread", "count": 1, "weight": 150 }]
        }))
        .unwrap();
        inventory.normalize();

        assert_eq!(inventory.items.len(), 4);
        for (index, slot) in inventory.items.iter().enumerate() {
            assert_eq!(slot.number() as usize, index + 1);
        }
        assert_eq!(inventory.slot(3).and_then(Slot::name), Some("bread"));
        assert!(inventory.slot(1).unwrap().is_empty());
    }

    #[test]
    fn keyed_items_are_accepted() {
        let inventory: Inventory = serde_json::from_value(json!({
            "id": "p", "type": "player", "slots": 2,
            "items": { "2": { "slot": 2, "name": "water", "count": 1, "weight": 500 } }
        }))
        .unwrap();
        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.items[0].number(), 2);
    }

    #[test]
    fn slot_zero_and_out_of_range_are_none() {
        let inventory = Inventory::new("p", InventoryType::Player, 3);
        assert!(inventory.slot(0).is_none());
        assert!(inventory.slot(4).is_none());
        assert!(inventory.slot(3).is_some());
    }

    #[test]
    fn put_renumbers_payload() {
        let mut inventory = Inventory::new("p", InventoryType::Player, 3);
        assert!(inventory.put(2, ItemStack::new(9, "bread", 1, 150.0).into()));
        assert_eq!(inventory.slot(2).unwrap().number(), 2);
        assert!(!inventory.put(5, Slot::empty(5)));
    }

    #[test]
    fn resize_truncates_and_pads() {
        let mut inventory = Inventory::new("p", InventoryType::Player, 3);
        inventory.put(3, ItemStack::new(3, "bread", 1, 150.0).into());
        inventory.resize(2);
        assert_eq!(inventory.items.len(), 2);
        inventory.resize(5);
        assert_eq!(inventory.items.len(), 5);
        assert!(inventory.slot(3).unwrap().is_empty());
    }
}
