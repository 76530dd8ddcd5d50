// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Event classification
//!
//! Filters raw gateway events down to the recognized bridge kinds. Anything
//! else is expected on-chain noise and is dropped silently, not an error.
//! No inter-event deduplication happens here: repeated delivery across
//! overlapping poll windows is tolerated because the displayed snapshot is
//! replaced wholesale, never appended to.

use crate::types::{BridgeEvent, EventKind, RawEvent};

/// Classify a raw event batch, keeping only deposits and withdraws.
pub fn classify(raw_events: Vec<RawEvent>) -> Vec<BridgeEvent> {
    raw_events
        .into_iter()
        .filter_map(|raw| match EventKind::from_name(&raw.event) {
            EventKind::Other => None,
            kind => Some(BridgeEvent {
                kind,
                transaction_hash: raw.transaction_hash,
                block_number: raw.block_number,
                return_values: raw.return_values,
            }),
        })
        .collect()
}
