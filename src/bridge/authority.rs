use tokio::sync::mpsc;

use crate::dnd::TransferIntent;
use crate::inventory::ItemData;

use super::types::{BridgeCommand, BridgeError, BridgeEvent, BridgeNotice, Verdict};

/// The remote side that owns the real inventories.
///
/// Only `validate_move` is mandatory; the rest default to refusing or
/// ignoring the request.
pub trait Authority: Send {
    fn validate_move(&mut self, transfer: &TransferIntent) -> Verdict;

    fn buy_item(&mut self, _transfer: &TransferIntent) -> Verdict {
        Verdict::reject("shop unavailable")
    }

    fn craft_item(&mut self, _transfer: &TransferIntent) -> Verdict {
        Verdict::reject("crafting unavailable")
    }

    fn item_data(&mut self, _name: &str) -> Option<ItemData> {
        None
    }

    fn notice(&mut self, notice: BridgeNotice) {
        tracing::debug!(?notice, "Notice ignored");
    }
}

/// Sends pushes to the client.
#[derive(Clone)]
pub struct EventPusher {
    sender: mpsc::Sender<BridgeEvent>,
}

impl EventPusher {
    pub async fn push(&self, event: BridgeEvent) -> Result<(), BridgeError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| BridgeError::Disconnected)
    }
}

/// Authority half of the bridge.
pub struct AuthorityEndpoint {
    pub(crate) receiver: mpsc::Receiver<BridgeCommand>,
    events: mpsc::Sender<BridgeEvent>,
}

impl AuthorityEndpoint {
    pub fn new(receiver: mpsc::Receiver<BridgeCommand>, events: mpsc::Sender<BridgeEvent>) -> Self {
        Self { receiver, events }
    }

    pub fn pusher(&self) -> EventPusher {
        EventPusher {
            sender: self.events.clone(),
        }
    }

    /// Answers commands with `authority` until every client is dropped.
    pub async fn serve<A: Authority>(mut self, mut authority: A) {
        while let Some(command) = self.receiver.recv().await {
            match command {
                BridgeCommand::ValidateMove {
                    transfer,
                    respond_to,
                } => {
                    let verdict = authority.validate_move(&transfer);
                    if respond_to.send(verdict).is_err() {
                        tracing::trace!("Bridge: ValidateMove response dropped (receiver gone)");
                    }
                }
                BridgeCommand::BuyItem {
                    transfer,
                    respond_to,
                } => {
                    let verdict = authority.buy_item(&transfer);
                    if respond_to.send(verdict).is_err() {
                        tracing::trace!("Bridge: BuyItem response dropped (receiver gone)");
                    }
                }
                BridgeCommand::CraftItem {
                    transfer,
                    respond_to,
                } => {
                    let verdict = authority.craft_item(&transfer);
                    if respond_to.send(verdict).is_err() {
                        tracing::trace!("Bridge: CraftItem response dropped (receiver gone)");
                    }
                }
                BridgeCommand::GetItemData { name, respond_to } => {
                    let data = authority.item_data(&name);
                    if respond_to.send(data).is_err() {
                        tracing::trace!("Bridge: GetItemData response dropped (receiver gone)");
                    }
                }
                BridgeCommand::Notice(notice) => authority.notice(notice),
            }
        }
        tracing::debug!("Bridge: all clients gone, authority stopped");
    }
}
