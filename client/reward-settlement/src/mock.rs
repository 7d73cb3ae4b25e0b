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

//! In-memory [`NetworkClient`] for unit tests.

use crate::{keccak_256, Bytes, ClientError, NetworkClient, ReceiptInfo};
use async_trait::async_trait;
use ethereum_types::{H160, H256, U256};
use std::{
	sync::{
		atomic::{AtomicUsize, Ordering},
		Mutex,
	},
	time::Duration,
};

/// A scripted chain that records every call made to it.
pub struct MockClient {
	pub chain_id: U256,
	pub balance: U256,
	pub nonce: U256,
	pub gas_price: U256,
	/// Unreachable: not connected, every request fails.
	pub offline: bool,
	/// Name of the one method that fails.
	pub fail_on: Option<&'static str>,
	/// Number of receipt polls answered with `null` before the receipt is returned.
	pub pending_polls: usize,
	pub receipt_status: U256,
	/// Hash reported on broadcast instead of the payload's own.
	pub reported_hash: Option<H256>,
	pub calls: Mutex<Vec<&'static str>>,
	pub sent: Mutex<Vec<Bytes>>,
	pub polls: AtomicUsize,
}

impl Default for MockClient {
	fn default() -> Self {
		Self {
			chain_id: 6342.into(),
			balance: U256::zero(),
			nonce: 7.into(),
			gas_price: 1_000_000_000u64.into(),
			offline: false,
			fail_on: None,
			pending_polls: 0,
			receipt_status: U256::one(),
			reported_hash: None,
			calls: Default::default(),
			sent: Default::default(),
			polls: AtomicUsize::new(0),
		}
	}
}

impl MockClient {
	pub fn calls(&self) -> Vec<&'static str> {
		self.calls.lock().unwrap().clone()
	}

	pub fn sent(&self) -> Vec<Bytes> {
		self.sent.lock().unwrap().clone()
	}

	fn call(&self, method: &'static str) -> Result<(), ClientError> {
		self.calls.lock().unwrap().push(method);
		if self.offline || self.fail_on == Some(method) {
			return Err(jsonrpsee::core::ClientError::Custom(format!("{method} failed")).into())
		}
		Ok(())
	}
}

#[async_trait]
impl NetworkClient for MockClient {
	async fn is_connected(&self) -> bool {
		self.call("is_connected").is_ok()
	}

	async fn chain_id(&self) -> Result<U256, ClientError> {
		self.call("chain_id")?;
		Ok(self.chain_id)
	}

	async fn get_balance(&self, _address: H160) -> Result<U256, ClientError> {
		self.call("get_balance")?;
		Ok(self.balance)
	}

	async fn get_transaction_count(&self, _address: H160) -> Result<U256, ClientError> {
		self.call("get_transaction_count")?;
		Ok(self.nonce)
	}

	async fn gas_price(&self) -> Result<U256, ClientError> {
		self.call("gas_price")?;
		Ok(self.gas_price)
	}

	async fn send_raw_transaction(&self, transaction: Bytes) -> Result<H256, ClientError> {
		self.call("send_raw_transaction")?;
		let hash = self.reported_hash.unwrap_or_else(|| H256(keccak_256(&transaction.0)));
		self.sent.lock().unwrap().push(transaction);
		Ok(hash)
	}

	async fn get_transaction_receipt(
		&self,
		tx_hash: H256,
	) -> Result<Option<ReceiptInfo>, ClientError> {
		self.call("get_transaction_receipt")?;
		if self.polls.fetch_add(1, Ordering::SeqCst) < self.pending_polls {
			return Ok(None)
		}
		Ok(Some(ReceiptInfo {
			transaction_hash: tx_hash,
			block_hash: H256::repeat_byte(0xbb),
			block_number: 42.into(),
			gas_used: 45_000.into(),
			status: Some(self.receipt_status),
		}))
	}

	fn receipt_poll_interval(&self) -> Duration {
		Duration::from_millis(1)
	}
}
