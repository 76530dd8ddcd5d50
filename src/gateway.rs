// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chain gateway capability
//!
//! The observer never talks to a ledger directly; all reads go through this
//! trait. Production implementations wrap an RPC provider, tests use the
//! scripted mock.

use crate::error::ObserverResult;
use crate::types::{ContractHandle, RawEvent};
use crate::window::EventWindow;
use async_trait::async_trait;

#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Current chain tip
    async fn current_block_number(&self) -> ObserverResult<u64>;

    /// Balance of an address, decimal string in the chain's base unit
    async fn balance_of(&self, address: &str) -> ObserverResult<String>;

    /// All events emitted by `contract` within `window`, in block order
    async fn get_past_events(
        &self,
        contract: &ContractHandle,
        window: EventWindow,
    ) -> ObserverResult<Vec<RawEvent>>;

    /// Read-only contract call returning a single scalar value
    async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[String],
    ) -> ObserverResult<String>;
}
