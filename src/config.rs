// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observer configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObserverConfig {
    /// Chain label used in logs and error messages (e.g. "home", "foreign")
    pub chain_name: String,

    /// Address of the bridge contract on the observed chain
    pub bridge_address: String,

    /// Network id, used to pick the block explorer
    pub network_id: u64,

    /// Human-readable network name used in success notifications
    pub network_name: String,

    /// Poll cadence for events, balance, limits and block number
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Default trailing window size in blocks
    #[serde(default = "default_trailing_window")]
    pub trailing_window: u64,

    /// Delay before the success notification is pushed after a confirmation
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay: Duration,
}

impl ObserverConfig {
    pub fn new(
        chain_name: &str,
        bridge_address: &str,
        network_id: u64,
        network_name: &str,
    ) -> Self {
        Self {
            chain_name: chain_name.to_string(),
            bridge_address: bridge_address.to_string(),
            network_id,
            network_name: network_name.to_string(),
            poll_interval: default_poll_interval(),
            trailing_window: default_trailing_window(),
            confirmation_delay: default_confirmation_delay(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bridge_address.is_empty() {
            return Err(anyhow!("bridge-address must not be empty"));
        }
        if self.chain_name.is_empty() {
            return Err(anyhow!("chain-name must not be empty"));
        }
        if self.poll_interval.is_zero() {
            return Err(anyhow!("poll-interval must be positive"));
        }
        Ok(())
    }
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_trailing_window() -> u64 {
    50
}

fn default_confirmation_delay() -> Duration {
    Duration::from_secs(2)
}
