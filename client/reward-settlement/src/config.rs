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

//! Network parameters of the settlement path.

use crate::Address;
use ethereum_types::{H160, H256};
use hex_literal::hex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of the chain rewards are settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
	/// Human-readable network name.
	pub name: String,
	pub rpc_url: String,
	pub chain_id: u64,
	/// The contract exposing `reward(address,uint256)`.
	pub reward_contract: Address,
	/// Gas limit of every reward transaction.
	pub gas_limit: u64,
	pub currency_symbol: String,
	/// Block explorer base URL, without trailing slash.
	pub explorer_url: String,
	/// Delay between two `eth_getTransactionReceipt` polls.
	#[serde(with = "millis")]
	pub receipt_poll_interval: Duration,
	/// Timeout of a single JSON-RPC request.
	#[serde(with = "millis")]
	pub request_timeout: Duration,
}

impl NetworkConfig {
	/// The MegaETH testnet.
	pub fn megaeth_testnet() -> Self {
		Self {
			name: "MegaETH Testnet".into(),
			rpc_url: "https://carrot.megaeth.com/rpc".into(),
			chain_id: 6342,
			reward_contract: H160(hex!("333553184a2f904aA6Ed1f5ffa84F0A9255a8216")).into(),
			gas_limit: 100_000,
			currency_symbol: "MegaETH".into(),
			explorer_url: "https://megaexplorer.xyz".into(),
			receipt_poll_interval: Duration::from_millis(100),
			request_timeout: Duration::from_secs(30),
		}
	}

	/// Link to `tx_hash` on the block explorer.
	pub fn explorer_tx_url(&self, tx_hash: &H256) -> String {
		format!("{}/tx/{:?}", self.explorer_url.trim_end_matches('/'), tx_hash)
	}
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self::megaeth_testnet()
	}
}

mod millis {
	use serde::{Deserialize, Deserializer, Serializer};
	use std::time::Duration;

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(value.as_millis().try_into().unwrap_or(u64::MAX))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
