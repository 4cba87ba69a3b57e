//! Static per-item definitions.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Equipment category used by restricted slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Backpack,
    Parachute,
    Armor,
    Phone,
    #[serde(other)]
    General,
}

/// Backpack item names recognised without an explicit category.
pub const LEGACY_BACKPACK_NAMES: &[&str] = &[
    "small_backpack",
    "medium_backpack",
    "large_backpack",
    "tactical_backpack",
    "hiking_backpack",
];

/// Custom context-menu action declared by an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemButton {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Weight of one unit.
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_stack")]
    pub stack: bool,
    /// Units the viewer's account currently holds. Kept current by refresh
    /// pushes carrying `itemCount` deltas.
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub weapon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ItemButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_stack() -> bool {
    true
}

impl ItemData {
    pub fn new(name: impl Into<String>, weight: f64, stack: bool) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            weight,
            stack,
            count: 0,
            weapon: false,
            category: None,
            buttons: Vec::new(),
            description: None,
        }
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Item definitions keyed by item name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: HashMap<String, ItemData>,
}

/// Catalog shared between the session and its settlement tasks.
pub type SharedCatalog = Arc<RwLock<ItemCatalog>>;

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact lookup, falling back to the upper-cased name (weapon
    /// definitions are often registered as `WEAPON_*`).
    pub fn get(&self, name: &str) -> Option<&ItemData> {
        self.items
            .get(name)
            .or_else(|| self.items.get(&name.to_uppercase()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn insert(&mut self, data: ItemData) {
        self.items.insert(data.name.clone(), data);
    }

    /// Adds every entry of `other`, replacing same-named ones.
    pub fn merge(&mut self, other: ItemCatalog) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies account-count deltas. Unknown names are ignored.
    pub fn apply_counts(&mut self, deltas: &HashMap<String, i64>) {
        for (name, delta) in deltas {
            if let Some(data) = self.items.get_mut(name) {
                data.count += delta;
            }
        }
    }

    /// Category of `name`, from the explicit field, then the weapon flag,
    /// then (when `legacy_names` is set) name heuristics.
    pub fn category_of(&self, name: &str, legacy_names: bool) -> Option<ItemCategory> {
        if let Some(data) = self.get(name) {
            if let Some(category) = data.category {
                return Some(category);
            }
            if data.weapon {
                return Some(ItemCategory::Weapon);
            }
        }
        if legacy_names {
            legacy_category(name)
        } else {
            None
        }
    }
}

impl FromIterator<ItemData> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = ItemData>>(iter: T) -> Self {
        let mut catalog = ItemCatalog::new();
        for data in iter {
            catalog.insert(data);
        }
        catalog
    }
}

// Older item packs carry no category; infer one from the name.
fn legacy_category(name: &str) -> Option<ItemCategory> {
    let name = name.to_lowercase();
    if name.starts_with("weapon_") {
        Some(ItemCategory::Weapon)
    } else if LEGACY_BACKPACK_NAMES.contains(&name.as_str()) {
        Some(ItemCategory::Backpack)
    } else if name.contains("parachute") {
        Some(ItemCategory::Parachute)
    } else if name.contains("armour") || name.contains("armor") {
        Some(ItemCategory::Armor)
    } else if name.contains("phone") {
        Some(ItemCategory::Phone)
    } else {
        None
    }
}
