// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a watched correlation key.
///
/// `Watching`: awaiting a Withdraw event carrying this key.
/// `Matched`: the confirming event was seen and signals were handed off.
/// `Cleared`: signal dispatch completed; the key can only become live again
/// through a new explicit `watch` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationState {
    Watching,
    Matched,
    Cleared,
}

impl fmt::Display for ConfirmationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationState::Watching => f.write_str("Watching"),
            ConfirmationState::Matched => f.write_str("Matched"),
            ConfirmationState::Cleared => f.write_str("Cleared"),
        }
    }
}

/// A settled confirmation, emitted at most once per watched key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The correlation key that was being awaited
    pub correlation_key: String,
    /// Hash of the confirming transaction on the observed chain, used to
    /// build the explorer link
    pub transaction_hash: String,
    /// Block the confirming event landed in
    pub block_number: u64,
}
