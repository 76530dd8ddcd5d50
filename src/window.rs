// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Block window derivation for event queries
//!
//! The poller re-derives its window on every tick: a one-shot full rescan
//! (armed by `watch`), a filtered-block override, or the default trailing
//! window of the last 50 blocks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of an event query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTag {
    Number(u64),
    Latest,
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Number(n) => write!(f, "{}", n),
            BlockTag::Latest => f.write_str("latest"),
        }
    }
}

/// Inclusive block range for a single `get_past_events` query.
///
/// Invariant: `from <= to` whenever `to` is concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub from: u64,
    pub to: BlockTag,
}

impl EventWindow {
    /// Trailing window covering the last `n` blocks up to the chain tip
    pub fn trailing(latest: u64, n: u64) -> Self {
        Self {
            from: latest.saturating_sub(n),
            to: BlockTag::Latest,
        }
    }

    /// Single-block window used by the block filter
    pub fn single(block: u64) -> Self {
        Self {
            from: block,
            to: BlockTag::Number(block),
        }
    }

    /// Full history rescan, used once after `watch` so a confirmation that
    /// already landed before the watch call is not missed
    pub fn full_rescan() -> Self {
        Self {
            from: 0,
            to: BlockTag::Latest,
        }
    }

    /// `[1, latest]`, used by the hash/correlation-key filters
    pub fn from_block_one() -> Self {
        Self {
            from: 1,
            to: BlockTag::Latest,
        }
    }

    /// Derive the periodic poll window. A zero `filtered_block` means "no
    /// override" and falls back to the trailing window.
    pub fn derive(filtered_block: u64, latest: u64, trailing: u64) -> Self {
        if filtered_block != 0 {
            Self::single(filtered_block)
        } else {
            Self::trailing(latest, trailing)
        }
    }

    /// Check the range invariant against a known chain tip
    pub fn is_well_formed(&self, latest: u64) -> bool {
        match self.to {
            BlockTag::Number(to) => self.from <= to,
            BlockTag::Latest => self.from <= latest,
        }
    }

    /// Resolve the upper bound against a known chain tip
    pub fn resolve_to(&self, latest: u64) -> u64 {
        match self.to {
            BlockTag::Number(n) => n,
            BlockTag::Latest => latest,
        }
    }
}

impl fmt::Display for EventWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}
