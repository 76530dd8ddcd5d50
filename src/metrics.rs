// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use prometheus::{
    register_int_counter_vec_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, IntCounter, IntCounterVec, IntGauge, Registry,
};

#[derive(Clone, Debug)]
pub struct ObserverMetrics {
    pub(crate) polls_total: IntCounter,
    pub(crate) poll_failures: IntCounterVec,
    pub(crate) events_observed: IntCounterVec,
    pub(crate) confirmations_settled: IntCounter,
    pub(crate) pending_confirmations: IntGauge,
    pub(crate) last_observed_block: IntGauge,
    pub(crate) validator_set_size: IntGauge,
}

impl ObserverMetrics {
    pub fn new(registry: &Registry) -> Self {
        Self {
            polls_total: register_int_counter_with_registry!(
                "observer_polls_total",
                "Total number of event poll attempts",
                registry,
            )
            .unwrap(),
            poll_failures: register_int_counter_vec_with_registry!(
                "observer_poll_failures",
                "Poll and scalar-read failures by error type",
                &["error_type"],
                registry,
            )
            .unwrap(),
            events_observed: register_int_counter_vec_with_registry!(
                "observer_events_observed",
                "Classified events seen, by kind",
                &["kind"],
                registry,
            )
            .unwrap(),
            confirmations_settled: register_int_counter_with_registry!(
                "observer_confirmations_settled",
                "Cross-chain confirmations matched against the pending set",
                registry,
            )
            .unwrap(),
            pending_confirmations: register_int_gauge_with_registry!(
                "observer_pending_confirmations",
                "Correlation keys currently awaiting confirmation",
                registry,
            )
            .unwrap(),
            last_observed_block: register_int_gauge_with_registry!(
                "observer_last_observed_block",
                "Latest block number read from the gateway",
                registry,
            )
            .unwrap(),
            validator_set_size: register_int_gauge_with_registry!(
                "observer_validator_set_size",
                "Size of the mirrored validator set",
                registry,
            )
            .unwrap(),
        }
    }

    pub fn new_for_testing() -> Self {
        let registry = Registry::new();
        Self::new(&registry)
    }
}
