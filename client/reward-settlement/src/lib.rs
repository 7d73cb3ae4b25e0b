// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wallet lifecycle and on-chain settlement of footprint rewards.
//!
//! The crate turns a [`RewardQuote`](carbon_footprint::RewardQuote) into a signed contract call
//! `reward(address, uint256)` and drives it through the network until it is mined:
//!
//! - [`SessionState`] owns the one wallet of a session. [`WalletManager`] creates it, either
//!   read-only from an imported [`Address`] or with a freshly generated [`LocalAccount`], and
//!   queries its balance.
//! - [`SettlementEngine`] runs a [`ClaimAttempt`] through
//!   `Idle -> Building -> Signing -> Submitted -> Confirmed | Failed`, one [`ClaimAttempt::step`]
//!   at a time or in one call.
//! - [`NetworkClient`] is the boundary towards the JSON-RPC endpoint; [`RpcNetworkClient`]
//!   implements it over HTTP.
//!
//! No call in this crate is retried and no deadline is imposed, apart from the optional one of
//! [`SettlementEngine::settle_with_deadline`]. Callers must not run two claim attempts for the
//! same wallet concurrently: both would be built with the same nonce.

mod account;
mod address;
mod bytes;
mod client;
mod config;
mod error;
mod settlement;
mod transaction;
mod units;
mod wallet;

#[cfg(test)]
mod mock;

pub use account::*;
pub use address::*;
pub use bytes::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use settlement::*;
pub use transaction::*;
pub use units::*;
pub use wallet::*;

pub use ethereum_types::{H160, H256, U256};

use sha3::{Digest, Keccak256};

/// Log target used by this crate.
pub const LOG_TARGET: &str = "reward-settlement";

/// Keccak-256 digest of `data`.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
	let mut hash = [0u8; 32];
	hash.copy_from_slice(&Keccak256::digest(data));
	hash
}
