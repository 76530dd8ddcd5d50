// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pending-confirmation tracking
//!
//! Bridges the gap between "user submitted a transfer" and "counterpart
//! chain confirms it". Each watched correlation key moves through an
//! explicit state machine, Watching -> Matched -> Cleared, with transitions
//! driven only by the tracker so the exactly-once guarantee is testable in
//! isolation.

mod tracker;
mod types;

pub use tracker::*;
pub use types::*;
