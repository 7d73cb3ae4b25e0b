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

//! Settlement of a reward quote on chain.
//!
//! A [`ClaimAttempt`] moves through
//!
//! ```text
//! Idle -> Building -> Signing -> Submitted -> Confirmed
//!   \________\__________\__________\_______-> Failed
//! ```
//!
//! where each state carries what the previous transition produced: the assembled transaction,
//! the signed transaction, the hash returned by the node, the receipt. Every error moves the
//! attempt to `Failed`; nothing is retried.

use crate::{
	encode_reward_call, to_smallest_unit, Error, LocalAccount, NetworkClient, NetworkConfig,
	ReceiptInfo, SessionState, SignedTransaction, UnsignedTransaction, LOG_TARGET,
};
use carbon_footprint::RewardQuote;
use ethereum_types::{H256, U256};
use serde::{Deserialize, Serialize};
use std::{mem, sync::Arc, time::Duration};

/// Outcome recorded in a mined transaction's receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
	Success,
	Failed,
}

/// Where a transaction was mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockConfirmation {
	pub block_number: U256,
	pub block_hash: H256,
	pub gas_used: U256,
}

/// Final record of a submitted reward transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
	pub tx_hash: H256,
	pub status: ReceiptStatus,
	pub block_confirmation: BlockConfirmation,
}

impl From<ReceiptInfo> for SettlementReceipt {
	fn from(receipt: ReceiptInfo) -> Self {
		let status = if receipt.is_success() { ReceiptStatus::Success } else { ReceiptStatus::Failed };
		Self {
			tx_hash: receipt.transaction_hash,
			status,
			block_confirmation: BlockConfirmation {
				block_number: receipt.block_number,
				block_hash: receipt.block_hash,
				gas_used: receipt.gas_used,
			},
		}
	}
}

/// State of a [`ClaimAttempt`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementState {
	Idle,
	/// The reward transaction is assembled.
	Building(UnsignedTransaction),
	/// The transaction is signed, not yet broadcast.
	Signing(SignedTransaction),
	/// The node accepted the transaction under this hash.
	Submitted(H256),
	Confirmed(SettlementReceipt),
	Failed(Error),
}

impl SettlementState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Confirmed(_) | Self::Failed(_))
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Idle => "Idle",
			Self::Building(_) => "Building",
			Self::Signing(_) => "Signing",
			Self::Submitted(_) => "Submitted",
			Self::Confirmed(_) => "Confirmed",
			Self::Failed(_) => "Failed",
		}
	}
}

/// One attempt to settle a [`RewardQuote`].
///
/// Drive it with [`Self::step`] or [`Self::run`]. An attempt that failed cannot be resumed; start
/// a new one, it will pick up the current nonce and gas price.
pub struct ClaimAttempt<'a, C> {
	client: &'a C,
	config: &'a NetworkConfig,
	signer: Option<&'a LocalAccount>,
	quote: RewardQuote,
	state: SettlementState,
}

impl<'a, C: NetworkClient> ClaimAttempt<'a, C> {
	pub fn new(
		client: &'a C,
		config: &'a NetworkConfig,
		signer: Option<&'a LocalAccount>,
		quote: RewardQuote,
	) -> Self {
		Self { client, config, signer, quote, state: SettlementState::Idle }
	}

	pub fn state(&self) -> &SettlementState {
		&self.state
	}

	pub fn quote(&self) -> &RewardQuote {
		&self.quote
	}

	/// Perform the next transition. Terminal states are left as they are.
	pub async fn step(&mut self) -> &SettlementState {
		let next = match mem::replace(&mut self.state, SettlementState::Idle) {
			SettlementState::Idle => self.build().await.map(SettlementState::Building),
			SettlementState::Building(tx) => self.sign(tx).map(SettlementState::Signing),
			SettlementState::Signing(signed) =>
				self.submit(signed).await.map(SettlementState::Submitted),
			SettlementState::Submitted(hash) =>
				self.confirm(hash).await.map(SettlementState::Confirmed),
			terminal => Ok(terminal),
		};

		self.state = next.unwrap_or_else(|err| {
			log::warn!(target: LOG_TARGET, "Claim failed: {err}");
			SettlementState::Failed(err)
		});
		&self.state
	}

	/// Drive the attempt to a terminal state.
	pub async fn run(mut self) -> Result<SettlementReceipt, Error> {
		loop {
			match self.step().await {
				SettlementState::Confirmed(receipt) => return Ok(receipt.clone()),
				SettlementState::Failed(err) => return Err(err.clone()),
				_ => {},
			}
		}
	}

	fn signer(&self) -> Result<&'a LocalAccount, Error> {
		self.signer.ok_or(Error::NoSigningKey)
	}

	async fn build(&self) -> Result<UnsignedTransaction, Error> {
		// Preconditions are checked before touching the network.
		let signer = self.signer()?;
		let nothing_to_claim =
			|| Error::NothingToClaim { footprint: self.quote.footprint, amount: self.quote.amount };
		if !self.quote.is_claimable() {
			return Err(nothing_to_claim())
		}
		let amount = to_smallest_unit(self.quote.amount)
			.filter(|amount| !amount.is_zero())
			.ok_or_else(nothing_to_claim)?;

		let address = signer.address();
		let nonce = self
			.client
			.get_transaction_count(*address.as_h160())
			.await
			.map_err(|err| Error::NetworkUnavailable(format!("failed to fetch nonce: {err}")))?;
		let gas_price = self
			.client
			.gas_price()
			.await
			.map_err(|err| Error::NetworkUnavailable(format!("failed to fetch gas price: {err}")))?;

		log::debug!(
			target: LOG_TARGET,
			"Building reward of {} for {address} (nonce: {nonce}, gas price: {gas_price})",
			self.quote.amount,
		);
		Ok(UnsignedTransaction {
			nonce,
			gas_price,
			gas: self.config.gas_limit.into(),
			to: *self.config.reward_contract.as_h160(),
			value: U256::zero(),
			input: encode_reward_call(&address, amount),
			chain_id: self.config.chain_id.into(),
		})
	}

	fn sign(&self, tx: UnsignedTransaction) -> Result<SignedTransaction, Error> {
		self.signer()?.sign_transaction(tx)
	}

	async fn submit(&self, signed: SignedTransaction) -> Result<H256, Error> {
		let local_hash = signed.hash();
		let hash = self
			.client
			.send_raw_transaction(signed.raw())
			.await
			.map_err(|err| Error::BroadcastFailure(err.to_string()))?;

		if hash != local_hash {
			log::warn!(
				target: LOG_TARGET,
				"Node reported hash {hash:?} for transaction {local_hash:?}",
			);
		}
		log::info!(target: LOG_TARGET, "Submitted reward transaction {hash:?}");
		Ok(hash)
	}

	async fn confirm(&self, hash: H256) -> Result<SettlementReceipt, Error> {
		let receipt = self.client.wait_for_transaction_receipt(hash).await.map_err(|err| {
			Error::NetworkUnavailable(format!("failed to fetch receipt of {hash:?}: {err}"))
		})?;

		let receipt = SettlementReceipt::from(receipt);
		match receipt.status {
			ReceiptStatus::Success => {
				log::info!(
					target: LOG_TARGET,
					"Reward transaction {hash:?} confirmed in block {}",
					receipt.block_confirmation.block_number,
				);
				Ok(receipt)
			},
			ReceiptStatus::Failed => Err(Error::OnChainRevert(receipt)),
		}
	}
}

/// Settles reward quotes for the wallets of a [`SessionState`].
pub struct SettlementEngine<C> {
	client: Arc<C>,
	config: NetworkConfig,
}

impl<C: NetworkClient> SettlementEngine<C> {
	pub fn new(client: Arc<C>, config: NetworkConfig) -> Self {
		Self { client, config }
	}

	pub fn config(&self) -> &NetworkConfig {
		&self.config
	}

	/// Check that the endpoint serves the configured chain.
	pub async fn verify_chain(&self) -> Result<(), Error> {
		let chain_id = self
			.client
			.chain_id()
			.await
			.map_err(|err| Error::NetworkUnavailable(err.to_string()))?;
		if chain_id != U256::from(self.config.chain_id) {
			return Err(Error::NetworkUnavailable(format!(
				"endpoint serves chain {chain_id}, expected {}",
				self.config.chain_id
			)))
		}
		Ok(())
	}

	/// Start an attempt to settle `quote` with the active wallet of `session`.
	pub fn begin<'a>(&'a self, session: &'a SessionState, quote: RewardQuote) -> ClaimAttempt<'a, C> {
		ClaimAttempt::new(&*self.client, &self.config, session.signer(), quote)
	}

	/// Settle `quote` in one call. Waits for the transaction to be mined, without a deadline.
	pub async fn settle(
		&self,
		session: &SessionState,
		quote: RewardQuote,
	) -> Result<SettlementReceipt, Error> {
		self.begin(session, quote).run().await
	}

	/// Like [`Self::settle`], failing with [`Error::Timeout`] once `deadline` elapsed.
	///
	/// A transaction broadcast before the deadline may still be mined afterwards.
	pub async fn settle_with_deadline(
		&self,
		session: &SessionState,
		quote: RewardQuote,
		deadline: Duration,
	) -> Result<SettlementReceipt, Error> {
		tokio::time::timeout(deadline, self.settle(session, quote))
			.await
			.unwrap_or(Err(Error::Timeout(deadline)))
	}
}
