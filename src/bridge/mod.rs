//! Message bridge to the remote authority.
//!
//! Requests travel as commands over a tokio mpsc channel and are answered on
//! oneshot channels; pushes come back on a second mpsc channel.

mod authority;
mod client;
mod types;


use tokio::sync::mpsc;

use crate::config::BridgeSettings;

pub use authority::{Authority, AuthorityEndpoint, EventPusher};
pub use client::{BridgeClient, BridgeEvents};
pub use types::{
    BridgeCommand, BridgeError, BridgeEvent, BridgeNotice, InitPayload, OneOrMany, RefreshEntry,
    RefreshPayload, SetupPayload, SlotsData, Verdict, WeightData,
};

pub struct BridgeLayer;

impl BridgeLayer {
    pub fn new(settings: &BridgeSettings) -> (BridgeClient, BridgeEvents, AuthorityEndpoint) {
        let (commands, command_receiver) = mpsc::channel(settings.buffer);
        let (events, event_receiver) = mpsc::channel(settings.buffer);
        (
            BridgeClient::new(commands, settings.request_timeout()),
            BridgeEvents::new(event_receiver),
            AuthorityEndpoint::new(command_receiver, events),
        )
    }
}
