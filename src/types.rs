// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core data types for the bridge observer

use crate::statistics::Statistics;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Recognized bridge event kinds. Anything the bridge contract emits that is
/// not a deposit or withdraw classifies as `Other` and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Deposit,
    Withdraw,
    Other,
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Deposit" => EventKind::Deposit,
            "Withdraw" => EventKind::Withdraw,
            _ => EventKind::Other,
        }
    }

    /// Short name for logging and metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Deposit => "deposit",
            EventKind::Withdraw => "withdraw",
            EventKind::Other => "other",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to a deployed contract, bound at initialization so no
/// operation can observe an unconnected handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractHandle {
    address: String,
}

impl ContractHandle {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// An event as returned by the chain gateway, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event name as emitted by the contract (e.g. "Deposit")
    pub event: String,
    /// Hash of the transaction that emitted this event on its own chain
    pub transaction_hash: String,
    /// Block the event was included in
    pub block_number: u64,
    /// Decoded event arguments. `return_values["transactionHash"]`, when
    /// present, is the cross-chain correlation key.
    pub return_values: HashMap<String, String>,
}

/// A classified bridge event. Immutable once observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeEvent {
    pub kind: EventKind,
    pub transaction_hash: String,
    pub block_number: u64,
    pub return_values: HashMap<String, String>,
}

impl BridgeEvent {
    /// The cross-chain correlation key, if the event carries one. Distinct
    /// from `transaction_hash`, which is the emitting transaction's own hash.
    pub fn correlation_key(&self) -> Option<&str> {
        self.return_values.get("transactionHash").map(|s| s.as_str())
    }
}

/// Snapshot of everything the observer exposes for display.
///
/// Replaced wholesale on each successful poll (unless the freeze filter is
/// active), never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeView {
    pub events: Vec<BridgeEvent>,
    /// Bridge contract balance, decimal string as reported by the gateway
    pub balance: String,
    pub min_per_tx: String,
    pub max_per_tx: String,
    /// Current aggregate deposit limit
    pub max_current_deposit: String,
    pub latest_block_number: u64,
    pub validators: HashSet<String>,
    pub required_signatures: u64,
    pub statistics: Statistics,
    pub loading: bool,
}
