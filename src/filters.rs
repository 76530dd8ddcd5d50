// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Snapshot narrowing helpers for the filter controller
//!
//! Pure functions; the engine composes them with a `[1, latest]` re-poll.

use crate::types::BridgeEvent;

/// Keep events whose cross-chain correlation key matches `key`.
pub fn narrow_by_correlation_key(events: Vec<BridgeEvent>, key: &str) -> Vec<BridgeEvent> {
    events
        .into_iter()
        .filter(|event| event.correlation_key() == Some(key))
        .collect()
}

/// Keep events whose own transaction hash matches `hash`.
pub fn narrow_by_transaction_hash(events: Vec<BridgeEvent>, hash: &str) -> Vec<BridgeEvent> {
    events
        .into_iter()
        .filter(|event| event.transaction_hash == hash)
        .collect()
}
