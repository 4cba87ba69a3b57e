//! The object every UI entry point goes through.
//!
//! An [`InventorySession`] owns the store, the shared item catalog and the
//! bridge client. Drops are resolved against the store, applied
//! optimistically, and settled by a spawned task once the authority
//! answers. Pushes from the authority are fed back in through
//! [`InventorySession::handle_event`].

mod settlement;
mod vendor;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::bridge::{BridgeClient, BridgeError, BridgeEvent, BridgeEvents, BridgeNotice, SetupPayload};
use crate::config::ConfigStore;
use crate::dnd::{
    self, click_action, resolve_drop, ClickAction, ClickModifier, DragSource, DropTarget,
    TransferIntent,
};
use crate::inventory::{unix_now, InventoryType, ItemData, SharedCatalog, Slot};
use crate::ui::inventory::{InventoryIntent, InventoryState, RequestId};
use crate::ui::InventoryStore;

pub use settlement::{DropOutcome, Settlement};

use settlement::spawn_settlement;
use vendor::vendor_transfer;

#[derive(Clone)]
pub struct InventorySession {
    store: InventoryStore,
    catalog: SharedCatalog,
    config: ConfigStore,
    bridge: BridgeClient,
    runtime: Handle,
    next_request: Arc<AtomicU64>,
}

impl InventorySession {
    /// Builds a session whose settlements run on the current tokio runtime.
    /// Must be called from within a runtime; the session itself may then be
    /// driven from any thread.
    pub fn new(
        store: InventoryStore,
        catalog: SharedCatalog,
        config: ConfigStore,
        bridge: BridgeClient,
    ) -> Self {
        Self {
            store,
            catalog,
            config,
            bridge,
            runtime: Handle::current(),
            next_request: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn state(&self) -> InventoryState {
        self.store.state()
    }

    fn next_request(&self) -> RequestId {
        RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Entry point for a finished drag. Shop and crafting sources become
    /// purchase and craft requests; everything else is a transfer.
    pub fn handle_drop(&self, source: &DragSource, target: Option<&DropTarget>) -> DropOutcome {
        match (&source.inventory, target) {
            (InventoryType::Shop, Some(target)) => self.on_buy(source, target),
            (InventoryType::Crafting, Some(target)) => self.on_craft(source, target),
            _ => self.on_drop(source, target),
        }
    }

    /// Resolves and applies a transfer optimistically, then validates it
    /// with the authority on a spawned task.
    pub fn on_drop(&self, source: &DragSource, target: Option<&DropTarget>) -> DropOutcome {
        let config = self.config.get();
        let plan = self.store.read(|state| {
            let catalog = self.catalog.read();
            resolve_drop(state, &catalog, &config, source, target)
        });
        let plan = match plan {
            Ok(plan) => plan,
            Err(abort) => return DropOutcome::Aborted(abort),
        };

        let request = self.next_request();
        self.store.dispatch(InventoryIntent::Pending { request });
        self.store
            .dispatch(plan.kind.intent(plan.transfer.clone(), unix_now()));

        let bridge = self.bridge.clone();
        let transfer = plan.transfer.clone();
        let settlement = spawn_settlement(&self.runtime, self.store.clone(), request, async move {
            bridge.validate_move(transfer).await
        });

        DropOutcome::Dispatched { plan, settlement }
    }

    pub fn on_buy(&self, source: &DragSource, target: &DropTarget) -> DropOutcome {
        self.vendor_request(source, target, |bridge, transfer| async move {
            bridge.buy_item(transfer).await
        })
    }

    pub fn on_craft(&self, source: &DragSource, target: &DropTarget) -> DropOutcome {
        self.vendor_request(source, target, |bridge, transfer| async move {
            bridge.craft_item(transfer).await
        })
    }

    // The authority answers a purchase or craft with refresh pushes, so
    // nothing is applied locally.
    fn vendor_request<F, Fut>(&self, source: &DragSource, target: &DropTarget, send: F) -> DropOutcome
    where
        F: FnOnce(BridgeClient, TransferIntent) -> Fut,
        Fut: Future<Output = Result<(), BridgeError>> + Send + 'static,
    {
        let slots = self.config.get().slots;
        let transfer = self.store.read(|state| {
            let catalog = self.catalog.read();
            vendor_transfer(state, &catalog, &slots, source, target)
        });
        let transfer = match transfer {
            Ok(transfer) => transfer,
            Err(abort) => {
                tracing::warn!(slot = source.slot, "Request refused: {abort}");
                return DropOutcome::Aborted(abort);
            }
        };

        let request = self.next_request();
        self.store.dispatch(InventoryIntent::Pending { request });
        let settlement = spawn_settlement(
            &self.runtime,
            self.store.clone(),
            request,
            send(self.bridge.clone(), transfer.clone()),
        );
        DropOutcome::Requested {
            transfer,
            settlement,
        }
    }

    /// Drop onto a container grid that the authority manages directly.
    /// Moves the whole stack; nothing changes locally.
    pub async fn drop_to_container(
        &self,
        source: &DragSource,
        target: &DropTarget,
    ) -> Result<(), BridgeError> {
        if source.inventory == target.inventory {
            return Ok(());
        }
        self.bridge
            .notify(BridgeNotice::SwapSlots {
                from_inventory: source.inventory.clone(),
                from_slot: source.slot,
                to_inventory: target.inventory.clone(),
                to_slot: target.slot,
                count: 0,
            })
            .await
    }

    /// Modified click on a slot. Returns the outcome when the click moved
    /// something.
    pub async fn click(
        &self,
        kind: &InventoryType,
        slot: u32,
        modifier: ClickModifier,
    ) -> Option<DropOutcome> {
        let action = self.store.read(|state| click_action(state, kind, slot, modifier))?;
        match action {
            ClickAction::QuickMove(source) => Some(self.on_drop(&source, None)),
            ClickAction::Use { slot } => {
                if let Err(err) = self.use_item(slot).await {
                    tracing::warn!(slot, "Use failed: {err}");
                }
                None
            }
        }
    }

    pub async fn use_item(&self, slot: u32) -> Result<(), BridgeError> {
        self.bridge.notify(BridgeNotice::UseItem { slot }).await
    }

    /// Hands the typed amount of `slot` to the nearest player.
    pub async fn give_item(&self, slot: u32) -> Result<(), BridgeError> {
        let count = self.store.read(|state| state.item_amount);
        self.bridge
            .notify(BridgeNotice::GiveItem { slot, count })
            .await
    }

    pub fn set_item_amount(&self, amount: u32) {
        self.store.dispatch(InventoryIntent::SetItemAmount(amount));
    }

    pub fn set_shift_pressed(&self, pressed: bool) {
        self.store.dispatch(InventoryIntent::SetShiftPressed(pressed));
    }

    pub fn set_container_weight(&self, weight: f64) {
        self.store.dispatch(InventoryIntent::SetContainerWeight(weight));
    }

    pub fn can_drag(&self, kind: &InventoryType, slot: u32) -> bool {
        self.store.read(|state| {
            let catalog = self.catalog.read();
            dnd::can_drag(state, &catalog, kind, slot)
        })
    }

    pub fn can_drop(&self, source: &DragSource, target: &DropTarget) -> bool {
        let slots = self.config.get().slots;
        self.store.read(|state| {
            let catalog = self.catalog.read();
            dnd::can_drop(state, &catalog, &slots, source, target)
        })
    }

    /// Applies one push from the authority.
    pub async fn handle_event(&self, event: BridgeEvent) {
        let now = unix_now();
        match event {
            BridgeEvent::Init(payload) => {
                if payload.items.is_empty() {
                    tracing::warn!("Init carried no item definitions");
                }
                tracing::info!(items = payload.items.len(), "Session initialised");
                self.catalog.write().merge(payload.items);
                let payload = SetupPayload {
                    left_inventory: Some(payload.left_inventory),
                    right_inventory: None,
                };
                self.store.dispatch(InventoryIntent::Setup { payload, now });
                self.fetch_unknown_items().await;
            }
            BridgeEvent::Setup(payload) => {
                self.store.dispatch(InventoryIntent::Setup { payload, now });
                self.fetch_unknown_items().await;
            }
            BridgeEvent::Refresh(payload) => {
                if let Some(counts) = &payload.item_count {
                    self.catalog.write().apply_counts(counts);
                }
                self.store.dispatch(InventoryIntent::Refresh { payload, now });
            }
            BridgeEvent::DisplayMetadata(entries) => {
                self.store
                    .dispatch(InventoryIntent::AddDisplayMetadata(entries));
            }
            BridgeEvent::Close => {
                self.store.dispatch(InventoryIntent::Reset);
            }
        }
    }

    /// Feeds pushes into the session until the authority goes away.
    pub async fn run(&self, mut events: BridgeEvents) {
        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
        tracing::debug!("Bridge events closed");
    }

    // Items the catalog has never heard of get their definition from the
    // authority, one request per name.
    async fn fetch_unknown_items(&self) {
        let unknown: BTreeSet<String> = self.store.read(|state| {
            let catalog = self.catalog.read();
            state
                .left
                .items
                .iter()
                .chain(&state.right.items)
                .filter_map(Slot::name)
                .filter(|name| !catalog.contains(name))
                .map(str::to_owned)
                .collect()
        });

        for name in unknown {
            match self.bridge.item_data(name.clone()).await {
                Ok(Some(data)) => {
                    tracing::debug!(%name, "Fetched item data");
                    self.catalog.write().insert(ItemData { name, ..data });
                }
                Ok(None) => tracing::warn!(%name, "Authority has no data for item"),
                Err(err) => tracing::warn!(%name, "Item data request failed: {err}"),
            }
        }
    }
}
