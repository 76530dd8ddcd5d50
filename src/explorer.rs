// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Block explorer URL formatting

/// Base URL of the block explorer for a network id. Unknown networks fall
/// back to the POA core explorer.
pub fn explorer_base_url(network_id: u64) -> &'static str {
    match network_id {
        1 => "https://etherscan.io/",
        3 => "https://ropsten.etherscan.io/",
        42 => "https://kovan.etherscan.io/",
        77 => "https://blockscout.com/poa/sokol/",
        _ => "https://blockscout.com/poa/core/",
    }
}

/// Transaction detail URL: base + "tx/" + hash
pub fn explorer_tx_url(network_id: u64, transaction_hash: &str) -> String {
    format!("{}tx/{}", explorer_base_url(network_id), transaction_hash)
}
