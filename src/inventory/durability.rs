use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use super::slot::{Metadata, Slot};

/// Seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Display durability (0-100) for an item's metadata at time `now`.
///
/// Degrading items store an expiry timestamp in `durability` (anything
/// above 100) and their lifetime in minutes in `degrade`.
pub fn item_durability(metadata: Option<&Metadata>, now: u64) -> Option<f64> {
    let metadata = metadata?;
    let mut durability = metadata.get("durability").and_then(Value::as_f64)?;

    if durability > 100.0 {
        if let Some(degrade) = metadata
            .get("degrade")
            .and_then(Value::as_f64)
            .filter(|degrade| *degrade > 0.0)
        {
            durability = ((durability - now as f64) / (60.0 * degrade)) * 100.0;
        }
    }

    Some(durability.max(0.0))
}

/// Recomputes the `durability` field of an occupied slot in place.
pub fn refresh_durability(slot: &mut Slot, now: u64) {
    if let Slot::Occupied(item) = slot {
        item.durability = item_durability(item.metadata.as_ref(), now);
    }
}
