use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::bridge::BridgeError;
use crate::dnd::{DropAbort, TransferIntent, TransferPlan};
use crate::ui::inventory::{InventoryIntent, RequestId};
use crate::ui::InventoryStore;

/// Handle on the task that settles one request.
#[derive(Debug)]
pub struct Settlement {
    request: RequestId,
    handle: JoinHandle<Result<(), BridgeError>>,
}

impl Settlement {
    pub fn request(&self) -> RequestId {
        self.request
    }

    /// Waits until the store has been settled and returns the reply.
    pub async fn wait(self) -> Result<(), BridgeError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(request = self.request.0, %err, "Settlement task failed");
                Err(BridgeError::Disconnected)
            }
        }
    }
}

/// What a drop, buy or craft attempt led to.
#[derive(Debug)]
pub enum DropOutcome {
    /// Refused locally; nothing changed.
    Aborted(DropAbort),
    /// Applied optimistically, awaiting validation.
    Dispatched {
        plan: TransferPlan,
        settlement: Settlement,
    },
    /// Sent to the authority without a local mutation (buy, craft).
    Requested {
        transfer: TransferIntent,
        settlement: Settlement,
    },
}

impl DropOutcome {
    pub fn abort(&self) -> Option<&DropAbort> {
        match self {
            DropOutcome::Aborted(abort) => Some(abort),
            _ => None,
        }
    }

    pub fn into_settlement(self) -> Option<Settlement> {
        match self {
            DropOutcome::Aborted(_) => None,
            DropOutcome::Dispatched { settlement, .. }
            | DropOutcome::Requested { settlement, .. } => Some(settlement),
        }
    }
}

/// Awaits `reply` on a task and commits or rolls back `request`.
/// Transport failures count as a rejection.
pub(super) fn spawn_settlement<F>(
    runtime: &Handle,
    store: InventoryStore,
    request: RequestId,
    reply: F,
) -> Settlement
where
    F: Future<Output = Result<(), BridgeError>> + Send + 'static,
{
    let handle = runtime.spawn(async move {
        let result = reply.await;
        match &result {
            Ok(()) => {
                tracing::debug!(request = request.0, "Request fulfilled");
                store.dispatch(InventoryIntent::Fulfilled { request });
            }
            Err(err) => {
                tracing::warn!(request = request.0, "Request failed, rolling back: {err}");
                store.dispatch(InventoryIntent::Rejected { request });
            }
        }
        result
    });
    Settlement { request, handle }
}
