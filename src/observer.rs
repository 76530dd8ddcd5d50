// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridge event reconciliation engine
//!
//! Owns the poll scheduler and all mutable observer state. Every tick
//! re-derives its window and refreshes events, balance, the current limit
//! and the chain tip as independent concurrent reads; the validator mirror
//! runs on its own loop with the same cadence so a slow refresh never blocks
//! the next event poll. Pending-set matching happens strictly after the
//! same tick's classify step. All failures are tick-local: the loops never
//! terminate because of a downstream error.

use crate::classifier::classify;
use crate::config::ObserverConfig;
use crate::error::{ObserverError, ObserverResult};
use crate::explorer::explorer_tx_url;
use crate::filters::{narrow_by_correlation_key, narrow_by_transaction_hash};
use crate::gateway::ChainGateway;
use crate::metrics::ObserverMetrics;
use crate::pending_confirmations::ConfirmationTracker;
use crate::sinks::{AlertSink, CounterpartFilter, TransactionList};
use crate::types::{BridgeEvent, BridgeView, ContractHandle, EventKind};
use crate::validator_mirror::ValidatorMirror;
use crate::window::EventWindow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct BridgeObserver {
    config: ObserverConfig,
    gateway: Arc<dyn ChainGateway>,
    alerts: Arc<dyn AlertSink>,
    transactions: Arc<dyn TransactionList>,
    counterpart: Option<Arc<dyn CounterpartFilter>>,
    metrics: Option<Arc<ObserverMetrics>>,
    /// Bound during initialize(); no operation can observe an unbound handle
    bridge: ContractHandle,
    view: RwLock<BridgeView>,
    pending: Mutex<ConfirmationTracker>,
    mirror: Mutex<ValidatorMirror>,
    /// Block filter override; 0 means "use the default trailing window"
    filtered_block: AtomicU64,
    /// One-shot full-rescan flag armed by watch(), consumed by the next poll
    rescan_armed: AtomicBool,
    /// While set, periodic polls do not replace the displayed snapshot
    frozen: AtomicBool,
    cancel: CancellationToken,
}

impl std::fmt::Debug for BridgeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeObserver")
            .field("config", &self.config)
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}

impl BridgeObserver {
    pub fn builder(config: ObserverConfig) -> ObserverBuilder {
        ObserverBuilder {
            config,
            gateway: None,
            alerts: None,
            transactions: None,
            counterpart: None,
            metrics: None,
        }
    }

    /// Spawn the poll and validator-refresh loops. Stopped via `shutdown()`.
    pub fn start(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        let observer = self.clone();
        handles.push(tokio::spawn(async move {
            info!("[{}] poll loop started", observer.config.chain_name);
            let mut interval = time::interval(observer.config.poll_interval);
            loop {
                tokio::select! {
                    _ = observer.cancel.cancelled() => {
                        info!("[{}] poll loop stopped", observer.config.chain_name);
                        break;
                    }
                    _ = interval.tick() => {
                        // Spawned so a slow tick overlaps the next timer fire
                        // instead of delaying it
                        let obs = observer.clone();
                        tokio::spawn(async move { obs.tick().await });
                    }
                }
            }
        }));

        let observer = self.clone();
        handles.push(tokio::spawn(async move {
            let mut interval = time::interval(observer.config.poll_interval);
            loop {
                tokio::select! {
                    _ = observer.cancel.cancelled() => {
                        info!("[{}] validator loop stopped", observer.config.chain_name);
                        break;
                    }
                    _ = interval.tick() => {
                        let obs = observer.clone();
                        tokio::spawn(async move { obs.refresh_validators().await });
                    }
                }
            }
        }));

        handles
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// One scheduler tick: all read categories run concurrently and join at
    /// the tick boundary.
    pub async fn tick(&self) {
        tokio::join!(
            self.poll_once(),
            self.refresh_balance(),
            self.refresh_current_limit(),
            self.refresh_block_number(),
        );
    }

    /// Current display snapshot
    pub async fn view(&self) -> BridgeView {
        self.view.read().await.clone()
    }

    /// Number of correlation keys still awaiting confirmation
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.watching_count()
    }

    /// Begin awaiting a cross-chain confirmation for `correlation_key`.
    ///
    /// Clears any block filter and arms a one-shot `[0, latest]` rescan so a
    /// confirming event that landed before this call is not missed, then
    /// polls immediately.
    pub async fn watch(&self, correlation_key: &str) {
        self.pending.lock().await.watch(correlation_key);
        self.filtered_block.store(0, Ordering::Release);
        self.rescan_armed.store(true, Ordering::Release);
        self.update_pending_gauge().await;
        let _ = self.poll_events(None).await;
    }

    /// Narrow the poll window to a single block (0 restores the default
    /// trailing window) and re-poll immediately.
    pub async fn filter_by_block(&self, block_number: u64) {
        self.filtered_block.store(block_number, Ordering::Release);
        let _ = self.poll_events(None).await;
    }

    /// Re-poll `[1, latest]` and narrow the snapshot to events carrying the
    /// given cross-chain correlation key.
    pub async fn filter_by_correlation_key(&self, correlation_key: &str) {
        let Ok(events) = self.poll_events(Some(EventWindow::from_block_one())).await else {
            return;
        };
        let narrowed = narrow_by_correlation_key(events, correlation_key);
        self.view.write().await.events = narrowed;
    }

    /// Re-poll `[1, latest]` and narrow the snapshot to events emitted by
    /// the given transaction. Matched Withdraws delegate their correlation
    /// key to the counterpart chain's tracker for a unified detail view.
    pub async fn filter_by_transaction_hash(&self, transaction_hash: &str) {
        let Ok(events) = self.poll_events(Some(EventWindow::from_block_one())).await else {
            return;
        };
        let matches = narrow_by_transaction_hash(events, transaction_hash);
        if let Some(counterpart) = &self.counterpart {
            for event in &matches {
                if event.kind == EventKind::Withdraw {
                    if let Some(key) = event.correlation_key() {
                        debug!(
                            "[{}] delegating hash filter for {} to counterpart",
                            self.config.chain_name, key
                        );
                        counterpart.filter_by_transaction_hash(key).await;
                    }
                }
            }
        }
        self.view.write().await.events = matches;
    }

    /// Toggle the snapshot freeze. While on, periodic polls keep running but
    /// do not replace the displayed event set. Returns the new state.
    pub fn toggle_filter(&self) -> bool {
        !self.frozen.fetch_xor(true, Ordering::AcqRel)
    }

    async fn poll_once(&self) {
        let _ = self.poll_events(None).await;
    }

    /// Poll, classify, hand off the snapshot, settle confirmations.
    ///
    /// `window_override` bypasses the derived window (used by the explicit
    /// filters). On gateway failure the connection error goes to the alert
    /// sink once and prior state stays untouched.
    async fn poll_events(
        &self,
        window_override: Option<EventWindow>,
    ) -> ObserverResult<Vec<BridgeEvent>> {
        if let Some(m) = &self.metrics {
            m.polls_total.inc();
        }

        let window = match window_override {
            Some(window) => window,
            None => {
                if self.rescan_armed.swap(false, Ordering::AcqRel) {
                    EventWindow::full_rescan()
                } else {
                    let latest = self.view.read().await.latest_block_number;
                    EventWindow::derive(
                        self.filtered_block.load(Ordering::Acquire),
                        latest,
                        self.config.trailing_window,
                    )
                }
            }
        };

        debug!(
            "[{}] polling bridge events over {}",
            self.config.chain_name, window
        );
        let raw = match self.gateway.get_past_events(&self.bridge, window).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "[{}] event poll over {} failed: {}",
                    self.config.chain_name, window, e
                );
                if let Some(m) = &self.metrics {
                    m.poll_failures.with_label_values(&[e.error_type()]).inc();
                }
                self.alerts.push_error(&format!(
                    "Cannot establish connection to the {} network. \
                     Please check the configured endpoint.",
                    self.config.network_name
                ));
                return Err(e);
            }
        };

        let events = classify(raw);
        if let Some(m) = &self.metrics {
            for event in &events {
                m.events_observed
                    .with_label_values(&[event.kind.as_str()])
                    .inc();
            }
        }

        if !self.frozen.load(Ordering::Acquire) {
            self.view.write().await.events = events.clone();
        }

        // Strictly after this tick's classify, never against a stale batch
        self.settle_confirmations(&events).await;
        Ok(events)
    }

    async fn settle_confirmations(&self, events: &[BridgeEvent]) {
        let confirmations = self.pending.lock().await.settle(events);
        if confirmations.is_empty() {
            return;
        }

        for confirmation in &confirmations {
            info!(
                "[{}] transfer {} confirmed in tx {} at block {}",
                self.config.chain_name,
                confirmation.correlation_key,
                confirmation.transaction_hash,
                confirmation.block_number
            );
            self.alerts.set_loading_step_index(3);

            let url = explorer_tx_url(self.config.network_id, &confirmation.transaction_hash);
            let message = format!(
                "Tokens received on {} on tx {}",
                self.config.network_name, url
            );
            let alerts = self.alerts.clone();
            let delay = self.config.confirmation_delay;
            tokio::spawn(async move {
                time::sleep(delay).await;
                alerts.push_success(&message);
            });

            if let Some(m) = &self.metrics {
                m.confirmations_settled.inc();
            }
            self.pending
                .lock()
                .await
                .mark_cleared(&confirmation.correlation_key);
        }

        // Fire once per tick, not per match
        self.transactions.remove_pending_transaction();
        self.update_pending_gauge().await;
    }

    async fn refresh_balance(&self) {
        match self.gateway.balance_of(self.bridge.address()).await {
            Ok(balance) => self.view.write().await.balance = balance,
            Err(e) => self.note_read_failure("balance", &e),
        }
    }

    async fn refresh_current_limit(&self) {
        match self.gateway.call(&self.bridge, "getCurrentLimit", &[]).await {
            Ok(limit) => self.view.write().await.max_current_deposit = limit,
            Err(e) => self.note_read_failure("current limit", &e),
        }
    }

    /// Per-transaction limits change only with contract upgrades; read once
    /// at initialization.
    async fn refresh_per_tx_limits(&self) {
        match self.gateway.call(&self.bridge, "minPerTx", &[]).await {
            Ok(min) => self.view.write().await.min_per_tx = min,
            Err(e) => self.note_read_failure("min per tx", &e),
        }
        match self.gateway.call(&self.bridge, "maxPerTx", &[]).await {
            Ok(max) => self.view.write().await.max_per_tx = max,
            Err(e) => self.note_read_failure("max per tx", &e),
        }
    }

    async fn refresh_block_number(&self) {
        match self.gateway.current_block_number().await {
            Ok(latest) => {
                self.view.write().await.latest_block_number = latest;
                if let Some(m) = &self.metrics {
                    m.last_observed_block.set(latest as i64);
                }
            }
            Err(e) => self.note_read_failure("block number", &e),
        }
    }

    pub async fn refresh_validators(&self) {
        let mut mirror = self.mirror.lock().await;
        match mirror.refresh(self.gateway.as_ref(), &self.bridge).await {
            Ok(()) => {
                let mut view = self.view.write().await;
                view.validators = mirror.validators().clone();
                view.required_signatures = mirror.required_signatures();
                if let Some(m) = &self.metrics {
                    m.validator_set_size.set(view.validators.len() as i64);
                }
            }
            Err(e) => self.note_read_failure("validators", &e),
        }
    }

    /// Recompute statistics from the full event history. Read once at
    /// initialization; see `statistics` for the aggregation status.
    async fn refresh_statistics(&self) {
        match self
            .gateway
            .get_past_events(&self.bridge, EventWindow::full_rescan())
            .await
        {
            Ok(raw) => {
                let history = classify(raw);
                let mut view = self.view.write().await;
                let mut statistics = view.statistics;
                statistics.recompute(&history);
                view.statistics = statistics;
            }
            Err(e) => self.note_read_failure("statistics", &e),
        }
    }

    fn note_read_failure(&self, what: &str, error: &ObserverError) {
        warn!(
            "[{}] {} read failed, keeping previous value: {}",
            self.config.chain_name, what, error
        );
        if let Some(m) = &self.metrics {
            m.poll_failures
                .with_label_values(&[error.error_type()])
                .inc();
        }
    }

    async fn update_pending_gauge(&self) {
        if let Some(m) = &self.metrics {
            m.pending_confirmations
                .set(self.pending.lock().await.watching_count() as i64);
        }
    }
}

impl Drop for BridgeObserver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub struct ObserverBuilder {
    config: ObserverConfig,
    gateway: Option<Arc<dyn ChainGateway>>,
    alerts: Option<Arc<dyn AlertSink>>,
    transactions: Option<Arc<dyn TransactionList>>,
    counterpart: Option<Arc<dyn CounterpartFilter>>,
    metrics: Option<Arc<ObserverMetrics>>,
}

impl ObserverBuilder {
    pub fn with_gateway(mut self, gateway: Arc<dyn ChainGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_alerts(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = Some(alerts);
        self
    }

    pub fn with_transactions(mut self, transactions: Arc<dyn TransactionList>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn with_counterpart(mut self, counterpart: Arc<dyn CounterpartFilter>) -> Self {
        self.counterpart = Some(counterpart);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ObserverMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Bind the bridge contract handle and perform the initial read sweep.
    ///
    /// The chain tip read must succeed (a misconfigured endpoint should fail
    /// loudly here, not melt into the poll loop); the rest of the sweep is
    /// best-effort and self-heals on the next tick.
    pub async fn initialize(self) -> ObserverResult<Arc<BridgeObserver>> {
        self.config
            .validate()
            .map_err(|e| ObserverError::InvalidConfig(e.to_string()))?;
        let gateway = self
            .gateway
            .ok_or_else(|| ObserverError::InvalidConfig("chain gateway is required".to_string()))?;
        let alerts = self
            .alerts
            .ok_or_else(|| ObserverError::InvalidConfig("alert sink is required".to_string()))?;
        let transactions = self.transactions.ok_or_else(|| {
            ObserverError::InvalidConfig("transaction list is required".to_string())
        })?;

        let bridge = ContractHandle::new(self.config.bridge_address.clone());
        let latest = gateway.current_block_number().await?;
        info!(
            "[{}] observing bridge {} from block {}",
            self.config.chain_name, bridge, latest
        );

        let observer = Arc::new(BridgeObserver {
            config: self.config,
            gateway,
            alerts,
            transactions,
            counterpart: self.counterpart,
            metrics: self.metrics,
            bridge,
            view: RwLock::new(BridgeView {
                latest_block_number: latest,
                loading: true,
                ..Default::default()
            }),
            pending: Mutex::new(ConfirmationTracker::new()),
            mirror: Mutex::new(ValidatorMirror::new()),
            filtered_block: AtomicU64::new(0),
            rescan_armed: AtomicBool::new(false),
            frozen: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        });

        observer.refresh_per_tx_limits().await;
        let _ = observer.poll_events(None).await;
        observer.refresh_balance().await;
        observer.refresh_current_limit().await;
        observer.refresh_validators().await;
        observer.refresh_statistics().await;
        observer.view.write().await.loading = false;

        Ok(observer)
    }
}
