// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridge traffic statistics
//!
//! Running totals keyed by event kind, recomputed from the complete event
//! history rather than patched incrementally. The aggregation itself is not
//! implemented: the upstream system fetched and classified the full history
//! but never defined how the per-event value field feeds these totals, and
//! that behavior is preserved rather than invented here. The accumulator
//! stays at its zero value until the contract is settled.
//!
//! TODO: aggregate per-kind counts and value sums once the value-field
//! format carried in return_values is specified.

use crate::types::BridgeEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub deposits: u64,
    pub deposits_value: u64,
    pub withdraws: u64,
    pub withdraws_value: u64,
    pub total_bridged: u64,
    pub users: u64,
}

impl Statistics {
    /// Recompute totals from the full classified history.
    ///
    /// Intentionally a no-op on the totals; see the module docs.
    pub fn recompute(&mut self, history: &[BridgeEvent]) {
        for _event in history {
            // Aggregation contract not yet defined; totals stay untouched.
        }
    }
}
