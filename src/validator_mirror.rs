// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Validator set mirror
//!
//! Reconstructs the live validator membership from the registry contract's
//! full ValidatorAdded/ValidatorRemoved event history on every refresh.
//! Recomputing from scratch (instead of patching incrementally) means the
//! mirror self-heals from any missed interval.

use crate::error::{ObserverError, ObserverResult};
use crate::gateway::ChainGateway;
use crate::types::ContractHandle;
use crate::window::EventWindow;
use std::collections::HashSet;
use tracing::{debug, info};

pub const VALIDATOR_ADDED_EVENT: &str = "ValidatorAdded";
pub const VALIDATOR_REMOVED_EVENT: &str = "ValidatorRemoved";

#[derive(Debug, Default)]
pub struct ValidatorMirror {
    /// Registry contract handle, read once from the bridge contract and
    /// cached for the session
    registry: Option<ContractHandle>,
    validators: HashSet<String>,
    required_signatures: u64,
}

impl ValidatorMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validators(&self) -> &HashSet<String> {
        &self.validators
    }

    pub fn required_signatures(&self) -> u64 {
        self.required_signatures
    }

    /// Refresh membership and the signature threshold from chain history.
    ///
    /// On failure the previous mirror value stays in place; the caller logs
    /// and moves on.
    pub async fn refresh(
        &mut self,
        gateway: &dyn ChainGateway,
        bridge: &ContractHandle,
    ) -> ObserverResult<()> {
        let registry = match &self.registry {
            Some(handle) => handle.clone(),
            None => {
                let address = gateway.call(bridge, "validatorContract", &[]).await?;
                let handle = ContractHandle::new(address);
                info!("Validator registry resolved at {}", handle);
                self.registry = Some(handle.clone());
                handle
            }
        };

        let history = gateway
            .get_past_events(&registry, EventWindow::full_rescan())
            .await?;

        let mut added: Vec<String> = Vec::new();
        let mut removed: HashSet<String> = HashSet::new();
        for event in &history {
            let Some(validator) = event.return_values.get("validator") else {
                continue;
            };
            match event.event.as_str() {
                VALIDATOR_ADDED_EVENT => added.push(validator.clone()),
                VALIDATOR_REMOVED_EVENT => {
                    removed.insert(validator.clone());
                }
                _ => {}
            }
        }

        // The removed set is built once from the entire history, so an
        // address that was added, removed, then re-added stays excluded.
        // This mirrors the observed upstream semantics and is kept as-is.
        let live: HashSet<String> = added
            .into_iter()
            .filter(|validator| !removed.contains(validator))
            .collect();

        let required: u64 = gateway
            .call(&registry, "requiredSignatures", &[])
            .await?
            .parse()
            .map_err(|e| {
                ObserverError::ReadFailure(format!("requiredSignatures not an integer: {}", e))
            })?;

        debug!(
            "Validator mirror refreshed: {} validators, {} required signatures",
            live.len(),
            required
        );
        self.validators = live;
        self.required_signatures = required;
        Ok(())
    }
}
