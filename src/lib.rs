// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observes a bridge contract on one chain of a home/foreign pair and keeps
//! a live view of its events, limits, balance and validator set, while
//! reconciling locally-submitted transfers against on-chain confirmations.

pub mod classifier;
pub mod config;
pub mod error;
pub mod explorer;
pub mod filters;
pub mod gateway;
pub mod metrics;
pub mod observer;
pub mod pending_confirmations;
pub mod sinks;
pub mod statistics;
pub mod types;
pub mod validator_mirror;
pub mod window;

#[cfg(test)]
pub mod mock_gateway;
