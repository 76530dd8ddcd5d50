// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Confirmation tracker
//!
//! Owns the pending set exclusively: only `watch` adds keys, only `settle`
//! matches them, only `mark_cleared` finishes them. A key that has left
//! `Watching` is never matched again, even if the same event reappears in an
//! overlapping poll window.

use super::types::{Confirmation, ConfirmationState};
use crate::types::{BridgeEvent, EventKind};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct ConfirmationTracker {
    keys: HashMap<String, ConfirmationState>,
}

impl ConfirmationTracker {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Start awaiting a correlation key. An explicit re-watch of a cleared
    /// key makes it live again; this is the only path back to `Watching`.
    pub fn watch(&mut self, correlation_key: impl Into<String>) {
        let key = correlation_key.into();
        info!("Watching for cross-chain confirmation of {}", key);
        self.keys.insert(key, ConfirmationState::Watching);
    }

    /// Match a classified event batch against the watched keys.
    ///
    /// Every Withdraw whose correlation key is in `Watching` transitions to
    /// `Matched` and is returned; all other events are ignored. Safe to call
    /// with overlapping batches: a key matches at most once.
    pub fn settle(&mut self, events: &[BridgeEvent]) -> Vec<Confirmation> {
        if !self.has_watching() {
            return Vec::new();
        }

        let mut confirmations = Vec::new();
        for event in events {
            if event.kind != EventKind::Withdraw {
                continue;
            }
            let Some(key) = event.correlation_key() else {
                continue;
            };
            if let Some(state) = self.keys.get_mut(key) {
                if *state == ConfirmationState::Watching {
                    *state = ConfirmationState::Matched;
                    debug!(
                        "Confirmation matched for {} in tx {} at block {}",
                        key, event.transaction_hash, event.block_number
                    );
                    confirmations.push(Confirmation {
                        correlation_key: key.to_string(),
                        transaction_hash: event.transaction_hash.clone(),
                        block_number: event.block_number,
                    });
                }
            }
        }
        confirmations
    }

    /// Finish a matched key after its signals have been dispatched.
    pub fn mark_cleared(&mut self, correlation_key: &str) {
        if let Some(state) = self.keys.get_mut(correlation_key) {
            if *state == ConfirmationState::Matched {
                *state = ConfirmationState::Cleared;
                info!("Pending confirmation cleared for {}", correlation_key);
            }
        }
    }

    pub fn state_of(&self, correlation_key: &str) -> Option<ConfirmationState> {
        self.keys.get(correlation_key).copied()
    }

    /// Number of keys still awaiting confirmation
    pub fn watching_count(&self) -> usize {
        self.keys
            .values()
            .filter(|s| **s == ConfirmationState::Watching)
            .count()
    }

    pub fn has_watching(&self) -> bool {
        self.keys
            .values()
            .any(|s| *s == ConfirmationState::Watching)
    }
}
