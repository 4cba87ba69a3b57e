//! Inventory store: state, intents and the reducer.

mod intent;
mod reducer;
mod state;

pub use intent::{InventoryIntent, MutationKind};
pub use reducer::InventoryReducer;
pub use state::{DisplayMetadata, InventoryState, RequestId, Side};
