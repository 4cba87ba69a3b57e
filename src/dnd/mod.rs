//! Drag-and-drop resolution.

pub mod feasibility;
pub mod on_drop;
pub mod restrictions;
pub mod shortcuts;
mod transfer;

pub use feasibility::{can_drag, can_drop};
pub use on_drop::{resolve_drop, transfer_count};
pub use restrictions::SlotRules;
pub use shortcuts::{click_action, ClickAction, ClickModifier};
pub use transfer::{DragSource, DropAbort, DropTarget, TransferIntent, TransferPlan};
