// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A scripted mock of the chain gateway, used in test environments.

use crate::error::{ObserverError, ObserverResult};
use crate::gateway::ChainGateway;
use crate::sinks::{AlertSink, CounterpartFilter, TransactionList};
use crate::types::{ContractHandle, RawEvent};
use crate::window::EventWindow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MockChainGateway {
    latest_block: AtomicU64,
    fail_block_number: AtomicBool,
    fail_events: AtomicBool,
    balances: Mutex<HashMap<String, String>>,
    // (contract address, method) -> scripted response
    call_responses: Mutex<HashMap<(String, String), String>>,
    call_counts: Mutex<HashMap<(String, String), usize>>,
    events: Mutex<HashMap<String, Vec<RawEvent>>>,
    // Every get_past_events query, for window assertions
    event_queries: Mutex<Vec<(String, EventWindow)>>,
}

impl MockChainGateway {
    pub fn new(latest_block: u64) -> Self {
        Self {
            latest_block: AtomicU64::new(latest_block),
            ..Default::default()
        }
    }

    pub fn set_latest_block(&self, block: u64) {
        self.latest_block.store(block, Ordering::Release);
    }

    pub fn set_balance(&self, address: &str, balance: &str) {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), balance.to_string());
    }

    pub fn set_call_response(&self, address: &str, method: &str, value: &str) {
        self.call_responses
            .lock()
            .unwrap()
            .insert((address.to_string(), method.to_string()), value.to_string());
    }

    pub fn add_events(&self, address: &str, mut events: Vec<RawEvent>) {
        self.events
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .append(&mut events);
    }

    pub fn clear_events(&self, address: &str) {
        self.events.lock().unwrap().remove(address);
    }

    pub fn fail_events(&self, fail: bool) {
        self.fail_events.store(fail, Ordering::Release);
    }

    pub fn fail_block_number(&self, fail: bool) {
        self.fail_block_number.store(fail, Ordering::Release);
    }

    pub fn call_count(&self, address: &str, method: &str) -> usize {
        self.call_counts
            .lock()
            .unwrap()
            .get(&(address.to_string(), method.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn event_queries(&self) -> Vec<(String, EventWindow)> {
        self.event_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainGateway for MockChainGateway {
    async fn current_block_number(&self) -> ObserverResult<u64> {
        if self.fail_block_number.load(Ordering::Acquire) {
            return Err(ObserverError::ReadFailure("block number".to_string()));
        }
        Ok(self.latest_block.load(Ordering::Acquire))
    }

    async fn balance_of(&self, address: &str) -> ObserverResult<String> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_else(|| "0".to_string()))
    }

    async fn get_past_events(
        &self,
        contract: &ContractHandle,
        window: EventWindow,
    ) -> ObserverResult<Vec<RawEvent>> {
        if self.fail_events.load(Ordering::Acquire) {
            return Err(ObserverError::ConnectionFailure(
                "scripted gateway failure".to_string(),
            ));
        }
        self.event_queries
            .lock()
            .unwrap()
            .push((contract.address().to_string(), window));

        let latest = self.latest_block.load(Ordering::Acquire);
        let to = window.resolve_to(latest);
        Ok(self
            .events
            .lock()
            .unwrap()
            .get(contract.address())
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.block_number >= window.from && e.block_number <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        _args: &[String],
    ) -> ObserverResult<String> {
        let key = (contract.address().to_string(), method.to_string());
        *self.call_counts.lock().unwrap().entry(key.clone()).or_insert(0) += 1;
        self.call_responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                ObserverError::ReadFailure(format!("no scripted response for {}", method))
            })
    }
}

/// Alert sink that records every push for assertions.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
    steps: Mutex<Vec<usize>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.steps.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn push_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn push_success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn set_loading_step_index(&self, step: usize) {
        self.steps.lock().unwrap().push(step);
    }
}

/// Transaction list that counts removals.
#[derive(Debug, Default)]
pub struct RecordingTransactionList {
    removals: AtomicUsize,
}

impl RecordingTransactionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removals(&self) -> usize {
        self.removals.load(Ordering::Acquire)
    }
}

impl TransactionList for RecordingTransactionList {
    fn remove_pending_transaction(&self) {
        self.removals.fetch_add(1, Ordering::AcqRel);
    }
}

/// Counterpart tracker that records delegated hash filters.
#[derive(Debug, Default)]
pub struct RecordingCounterpart {
    requests: Mutex<Vec<String>>,
}

impl RecordingCounterpart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CounterpartFilter for RecordingCounterpart {
    async fn filter_by_transaction_hash(&self, transaction_hash: &str) {
        self.requests
            .lock()
            .unwrap()
            .push(transaction_hash.to_string());
    }
}
