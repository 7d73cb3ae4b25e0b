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

//! The JSON-RPC boundary of the settlement path.

use crate::{Bytes, NetworkConfig, LOG_TARGET};
use async_trait::async_trait;
use ethereum_types::{H160, H256, U256};
use jsonrpsee::{
	core::RpcResult,
	http_client::{HttpClient, HttpClientBuilder},
	proc_macros::rpc,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default delay between two receipt polls.
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Block parameter of state queries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
	#[default]
	Latest,
	Pending,
}

/// The subset of a transaction receipt the settlement path reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptInfo {
	pub transaction_hash: H256,
	pub block_hash: H256,
	pub block_number: U256,
	pub gas_used: U256,
	/// `1` for success, `0` for failure. Absent on pre-Byzantium receipts.
	#[serde(default)]
	pub status: Option<U256>,
}

impl ReceiptInfo {
	pub fn is_success(&self) -> bool {
		self.status == Some(U256::one())
	}
}

/// Ethereum JSON-RPC methods used by the settlement path.
#[rpc(client)]
pub trait EthRpc {
	#[method(name = "web3_clientVersion")]
	async fn client_version(&self) -> RpcResult<String>;

	#[method(name = "eth_chainId")]
	async fn chain_id(&self) -> RpcResult<U256>;

	/// Returns the balance of the given address, in wei.
	#[method(name = "eth_getBalance")]
	async fn get_balance(&self, address: H160, block: BlockTag) -> RpcResult<U256>;

	#[method(name = "eth_getTransactionCount")]
	async fn get_transaction_count(&self, address: H160, block: BlockTag) -> RpcResult<U256>;

	#[method(name = "eth_gasPrice")]
	async fn gas_price(&self) -> RpcResult<U256>;

	/// Submits a signed transaction, returns its hash.
	#[method(name = "eth_sendRawTransaction")]
	async fn send_raw_transaction(&self, transaction: Bytes) -> RpcResult<H256>;

	/// Returns the receipt of a mined transaction, `null` while it is pending.
	#[method(name = "eth_getTransactionReceipt")]
	async fn get_transaction_receipt(&self, transaction_hash: H256)
		-> RpcResult<Option<ReceiptInfo>>;
}

/// The error type of a [`NetworkClient`].
#[derive(Error, Debug)]
pub enum ClientError {
	/// A [`jsonrpsee::core::ClientError`] wrapper error.
	#[error(transparent)]
	Jsonrpsee(#[from] jsonrpsee::core::ClientError),
}

/// Access to the chain the rewards are settled on.
#[async_trait]
pub trait NetworkClient: Send + Sync {
	/// Whether the endpoint answers requests.
	async fn is_connected(&self) -> bool;

	async fn chain_id(&self) -> Result<U256, ClientError>;

	/// Balance of `address` in the smallest unit.
	async fn get_balance(&self, address: H160) -> Result<U256, ClientError>;

	/// Number of transactions sent from `address`, the next nonce to use.
	async fn get_transaction_count(&self, address: H160) -> Result<U256, ClientError>;

	async fn gas_price(&self) -> Result<U256, ClientError>;

	/// Broadcast a signed transaction. Returns as soon as the node accepted it.
	async fn send_raw_transaction(&self, transaction: Bytes) -> Result<H256, ClientError>;

	async fn get_transaction_receipt(&self, tx_hash: H256)
		-> Result<Option<ReceiptInfo>, ClientError>;

	/// Delay between two receipt polls of [`Self::wait_for_transaction_receipt`].
	fn receipt_poll_interval(&self) -> Duration {
		DEFAULT_RECEIPT_POLL_INTERVAL
	}

	/// Poll until `tx_hash` is mined.
	///
	/// There is no timeout: a transaction that is never included keeps this pending forever.
	async fn wait_for_transaction_receipt(&self, tx_hash: H256) -> Result<ReceiptInfo, ClientError> {
		loop {
			if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
				return Ok(receipt)
			}
			log::trace!(target: LOG_TARGET, "Transaction {tx_hash:?} not mined yet");
			tokio::time::sleep(self.receipt_poll_interval()).await;
		}
	}
}

/// A [`NetworkClient`] talking JSON-RPC over HTTP.
#[derive(Clone)]
pub struct RpcNetworkClient {
	inner: HttpClient,
	url: String,
	poll_interval: Duration,
}

impl RpcNetworkClient {
	/// Build a client for the endpoint of `config`. No request is made yet.
	pub fn new(config: &NetworkConfig) -> Result<Self, ClientError> {
		let inner = HttpClientBuilder::default()
			.request_timeout(config.request_timeout)
			.build(&config.rpc_url)?;
		Ok(Self {
			inner,
			url: config.rpc_url.clone(),
			poll_interval: config.receipt_poll_interval,
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[async_trait]
impl NetworkClient for RpcNetworkClient {
	async fn is_connected(&self) -> bool {
		match EthRpcClient::client_version(&self.inner).await {
			Ok(version) => {
				log::debug!(target: LOG_TARGET, "Connected to {} ({version})", self.url);
				true
			},
			Err(err) => {
				log::debug!(target: LOG_TARGET, "{} is unreachable: {err:?}", self.url);
				false
			},
		}
	}

	async fn chain_id(&self) -> Result<U256, ClientError> {
		Ok(EthRpcClient::chain_id(&self.inner).await?)
	}

	async fn get_balance(&self, address: H160) -> Result<U256, ClientError> {
		Ok(EthRpcClient::get_balance(&self.inner, address, BlockTag::Latest).await?)
	}

	async fn get_transaction_count(&self, address: H160) -> Result<U256, ClientError> {
		Ok(EthRpcClient::get_transaction_count(&self.inner, address, BlockTag::Latest).await?)
	}

	async fn gas_price(&self) -> Result<U256, ClientError> {
		Ok(EthRpcClient::gas_price(&self.inner).await?)
	}

	async fn send_raw_transaction(&self, transaction: Bytes) -> Result<H256, ClientError> {
		Ok(EthRpcClient::send_raw_transaction(&self.inner, transaction).await?)
	}

	async fn get_transaction_receipt(
		&self,
		tx_hash: H256,
	) -> Result<Option<ReceiptInfo>, ClientError> {
		Ok(EthRpcClient::get_transaction_receipt(&self.inner, tx_hash).await?)
	}

	fn receipt_poll_interval(&self) -> Duration {
		self.poll_interval
	}
}
