// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Outbound capabilities consumed by the observer
//!
//! Alerting and transaction-list delivery live outside this crate; only
//! their invocation contracts are defined here. All sink calls are
//! fire-and-forget: the observer never waits on delivery.

use async_trait::async_trait;

/// User-visible alerting sink.
pub trait AlertSink: Send + Sync {
    fn push_error(&self, message: &str);
    fn push_success(&self, message: &str);
    /// Advance the step indicator of an in-progress transfer
    fn set_loading_step_index(&self, step: usize);
}

/// External list of locally-submitted transactions still awaiting
/// confirmation. Invoked at most once per tick when confirmations settle.
pub trait TransactionList: Send + Sync {
    fn remove_pending_transaction(&self);
}

/// The counterpart chain's tracker. Used only when a Withdraw event is found
/// locally while filtering by transaction hash, to build a unified
/// cross-chain transaction detail view.
#[async_trait]
pub trait CounterpartFilter: Send + Sync {
    async fn filter_by_transaction_hash(&self, transaction_hash: &str);
}
