use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::dnd::TransferIntent;
use crate::inventory::ItemData;

use super::types::{BridgeCommand, BridgeError, BridgeEvent, BridgeNotice, Verdict};

/// Client half of the bridge, cloned into every settlement task.
#[derive(Clone)]
pub struct BridgeClient {
    sender: mpsc::Sender<BridgeCommand>,
    timeout: Option<Duration>,
}

impl BridgeClient {
    pub fn new(sender: mpsc::Sender<BridgeCommand>, timeout: Option<Duration>) -> Self {
        Self { sender, timeout }
    }

    pub async fn validate_move(&self, transfer: TransferIntent) -> Result<(), BridgeError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(BridgeCommand::ValidateMove {
            transfer,
            respond_to,
        })
        .await?;

        self.verdict(receiver).await
    }

    pub async fn buy_item(&self, transfer: TransferIntent) -> Result<(), BridgeError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(BridgeCommand::BuyItem {
            transfer,
            respond_to,
        })
        .await?;

        self.verdict(receiver).await
    }

    pub async fn craft_item(&self, transfer: TransferIntent) -> Result<(), BridgeError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(BridgeCommand::CraftItem {
            transfer,
            respond_to,
        })
        .await?;

        self.verdict(receiver).await
    }

    pub async fn item_data(&self, name: String) -> Result<Option<ItemData>, BridgeError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(BridgeCommand::GetItemData { name, respond_to })
            .await?;

        recv_with_timeout(receiver, self.timeout).await
    }

    pub async fn notify(&self, notice: BridgeNotice) -> Result<(), BridgeError> {
        self.send(BridgeCommand::Notice(notice)).await
    }

    async fn send(&self, command: BridgeCommand) -> Result<(), BridgeError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| BridgeError::Disconnected)
    }

    async fn verdict(&self, receiver: oneshot::Receiver<Verdict>) -> Result<(), BridgeError> {
        recv_with_timeout(receiver, self.timeout)
            .await?
            .into_result()
    }
}

/// Receiving end of the authority's pushes.
pub struct BridgeEvents {
    receiver: mpsc::Receiver<BridgeEvent>,
}

impl BridgeEvents {
    pub fn new(receiver: mpsc::Receiver<BridgeEvent>) -> Self {
        Self { receiver }
    }

    /// Next push, or `None` once the authority side is gone.
    pub async fn next(&mut self) -> Option<BridgeEvent> {
        self.receiver.recv().await
    }
}

async fn recv_with_timeout<T>(
    receiver: oneshot::Receiver<T>,
    timeout: Option<Duration>,
) -> Result<T, BridgeError> {
    let Some(timeout) = timeout else {
        return receiver.await.map_err(|_| BridgeError::Disconnected);
    };
    match tokio::time::timeout(timeout, receiver).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(BridgeError::Disconnected),
        Err(_) => Err(BridgeError::Timeout),
    }
}
