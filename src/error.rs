// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Errors surfaced by the observer.
///
/// Every failure is tick-local: a `ConnectionFailure` is reported once to the
/// alert sink, a `ReadFailure` is logged and the cached value retained. The
/// polling loop itself never terminates because of either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    // Ledger unreachable or misconfigured endpoint
    ConnectionFailure(String),
    // A single scalar read (limit, balance, validator count) failed
    ReadFailure(String),
    // Construction-time configuration problem
    InvalidConfig(String),
}

impl ObserverError {
    /// Returns a short string identifying the error type for metrics labels
    pub fn error_type(&self) -> &'static str {
        match self {
            ObserverError::ConnectionFailure(_) => "connection_failure",
            ObserverError::ReadFailure(_) => "read_failure",
            ObserverError::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObserverError::ConnectionFailure(msg) => write!(f, "connection failure: {}", msg),
            ObserverError::ReadFailure(msg) => write!(f, "read failure: {}", msg),
            ObserverError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ObserverError {}

pub type ObserverResult<T> = Result<T, ObserverError>;
