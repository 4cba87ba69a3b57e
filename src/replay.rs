//! Replays a recorded scenario against a scripted authority.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "items": { "water": { "name": "water", "weight": 500 } },
//!   "setup": { "leftInventory": { "id": "player-1", "type": "player", "slots": 10, "items": [] } },
//!   "verdicts": ["accept", { "reject": "too heavy" }],
//!   "steps": [
//!     { "op": "drop", "source": { "inventory": "player", "slot": 1 } },
//!     { "op": "shift", "pressed": true },
//!     { "op": "push", "event": { "action": "closeInventory" } }
//!   ]
//! }
//! ```
//!
//! Verdicts answer validate, buy and craft requests in order; once they run
//! out every request is accepted.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::{
    Authority, BridgeError, BridgeEvent, BridgeLayer, BridgeNotice, SetupPayload, Verdict,
};
use crate::config::ConfigStore;
use crate::dnd::{DragSource, DropTarget, TransferIntent};
use crate::inventory::{Inventory, ItemCatalog, ItemData};
use crate::session::{DropOutcome, InventorySession};
use crate::ui::InventoryStore;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read scenario '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Catalog the client starts with.
    #[serde(default)]
    pub items: ItemCatalog,
    /// Definitions the authority hands out for items the client lacks.
    #[serde(default)]
    pub authority_items: ItemCatalog,
    #[serde(default)]
    pub setup: SetupPayload,
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReplayError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ReplayError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Drop {
        source: DragSource,
        #[serde(default)]
        target: Option<DropTarget>,
    },
    ItemAmount {
        amount: u32,
    },
    Shift {
        pressed: bool,
    },
    Use {
        slot: u32,
    },
    Give {
        slot: u32,
    },
    Push {
        event: BridgeEvent,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    Aborted {
        reason: String,
    },
    Fulfilled {
        transfer: TransferIntent,
    },
    Rejected {
        transfer: TransferIntent,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepOutcome>,
    pub notices: Vec<BridgeNotice>,
    pub left: Inventory,
    pub right: Inventory,
}

/// Authority answering from a fixed script.
pub struct ScriptedAuthority {
    verdicts: VecDeque<Verdict>,
    items: ItemCatalog,
    notices: Arc<Mutex<Vec<BridgeNotice>>>,
}

impl ScriptedAuthority {
    pub fn new(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        Self {
            verdicts: verdicts.into_iter().collect(),
            items: ItemCatalog::new(),
            notices: Arc::default(),
        }
    }

    pub fn with_items(mut self, items: ItemCatalog) -> Self {
        self.items = items;
        self
    }

    /// Notices received so far, shared with the running authority.
    pub fn notices(&self) -> Arc<Mutex<Vec<BridgeNotice>>> {
        Arc::clone(&self.notices)
    }

    fn next_verdict(&mut self) -> Verdict {
        self.verdicts.pop_front().unwrap_or(Verdict::Accept)
    }
}

impl Authority for ScriptedAuthority {
    fn validate_move(&mut self, _transfer: &TransferIntent) -> Verdict {
        self.next_verdict()
    }

    fn buy_item(&mut self, _transfer: &TransferIntent) -> Verdict {
        self.next_verdict()
    }

    fn craft_item(&mut self, _transfer: &TransferIntent) -> Verdict {
        self.next_verdict()
    }

    fn item_data(&mut self, name: &str) -> Option<ItemData> {
        self.items.get(name).cloned()
    }

    fn notice(&mut self, notice: BridgeNotice) {
        self.notices.lock().push(notice);
    }
}

/// Runs every step, waiting for each request to settle before the next.
pub async fn run_scenario(scenario: Scenario, config: ConfigStore) -> ReplayReport {
    let (client, _events, endpoint) = BridgeLayer::new(&config.get().bridge);
    let authority =
        ScriptedAuthority::new(scenario.verdicts).with_items(scenario.authority_items);
    let notices = authority.notices();
    let server = tokio::spawn(endpoint.serve(authority));

    let catalog = Arc::new(RwLock::new(scenario.items));
    let session = InventorySession::new(InventoryStore::default(), catalog, config, client);
    session
        .handle_event(BridgeEvent::Setup(scenario.setup))
        .await;

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.into_iter().enumerate() {
        let outcome = apply_step(&session, step).await;
        tracing::debug!(step = index, ?outcome, "Replayed step");
        steps.push(outcome);
    }

    let state = session.state();
    drop(session);
    if let Err(err) = server.await {
        tracing::warn!(%err, "Scripted authority stopped abnormally");
    }

    let notices = notices.lock().clone();
    ReplayReport {
        steps,
        notices,
        left: state.left,
        right: state.right,
    }
}

async fn apply_step(session: &InventorySession, step: Step) -> StepOutcome {
    match step {
        Step::Drop { source, target } => {
            let outcome = session.handle_drop(&source, target.as_ref());
            settle(outcome).await
        }
        Step::ItemAmount { amount } => {
            session.set_item_amount(amount);
            StepOutcome::Applied
        }
        Step::Shift { pressed } => {
            session.set_shift_pressed(pressed);
            StepOutcome::Applied
        }
        Step::Use { slot } => notice_outcome(session.use_item(slot).await),
        Step::Give { slot } => notice_outcome(session.give_item(slot).await),
        Step::Push { event } => {
            session.handle_event(event).await;
            StepOutcome::Applied
        }
    }
}

async fn settle(outcome: DropOutcome) -> StepOutcome {
    let (transfer, settlement) = match outcome {
        DropOutcome::Aborted(abort) => {
            return StepOutcome::Aborted {
                reason: abort.to_string(),
            }
        }
        DropOutcome::Dispatched { plan, settlement } => (plan.transfer, settlement),
        DropOutcome::Requested {
            transfer,
            settlement,
        } => (transfer, settlement),
    };
    let request = settlement.request();
    match settlement.wait().await {
        Ok(()) => StepOutcome::Fulfilled { transfer },
        Err(err) => {
            tracing::debug!(request = request.0, %err, "Replayed request rejected");
            StepOutcome::Rejected {
                transfer,
                reason: err.to_string(),
            }
        }
    }
}

fn notice_outcome(result: Result<(), BridgeError>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Applied,
        Err(err) => StepOutcome::Aborted {
            reason: err.to_string(),
        },
    }
}
