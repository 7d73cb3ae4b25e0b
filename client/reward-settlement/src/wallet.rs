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

//! The session wallet.

use crate::{from_smallest_unit, Address, Error, LocalAccount, NetworkClient, LOG_TARGET};
use std::sync::Arc;

/// The wallet a session currently acts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveWallet {
	/// Imported by address. Can be queried but never signs.
	ReadOnly(Address),
	/// Backed by the session's [`LocalAccount`].
	Owned(Address),
}

impl ActiveWallet {
	pub fn address(&self) -> Address {
		match self {
			Self::ReadOnly(address) | Self::Owned(address) => *address,
		}
	}

	pub fn can_sign(&self) -> bool {
		matches!(self, Self::Owned(_))
	}
}

/// Mutable state of one user session.
///
/// Holds at most one private key. Once generated it is kept for the lifetime of the session and
/// only dropped together with it.
#[derive(Debug, Default)]
pub struct SessionState {
	account: Option<LocalAccount>,
	active: Option<ActiveWallet>,
	balance: Option<f64>,
}

impl SessionState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active_wallet(&self) -> Option<ActiveWallet> {
		self.active
	}

	pub fn active_address(&self) -> Option<Address> {
		self.active.map(|wallet| wallet.address())
	}

	/// The last balance read for the active wallet, in display units.
	pub fn cached_balance(&self) -> Option<f64> {
		self.balance
	}

	/// The signing key of the active wallet, `None` when it is read-only or absent.
	pub fn signer(&self) -> Option<&LocalAccount> {
		match self.active {
			Some(ActiveWallet::Owned(_)) => self.account.as_ref(),
			_ => None,
		}
	}

	fn activate(&mut self, wallet: ActiveWallet) {
		if self.active != Some(wallet) {
			self.balance = None;
		}
		self.active = Some(wallet);
	}
}

/// Outcome of a balance query.
///
/// A failed query reads as zero and keeps the error for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
	pub amount: f64,
	pub error: Option<Error>,
}

/// Creates the session wallet and reads its balance.
pub struct WalletManager<C> {
	client: Arc<C>,
}

impl<C: NetworkClient> WalletManager<C> {
	pub fn new(client: Arc<C>) -> Self {
		Self { client }
	}

	/// Activate a wallet for `session`.
	///
	/// With an `address`, it is imported read-only; a malformed address fails with
	/// [`Error::InvalidAddressFormat`] and leaves the session as it was. Without one, the
	/// session's own key is used, generated on first use.
	pub fn connect(&self, session: &mut SessionState, address: Option<&str>) -> Result<Address, Error> {
		let wallet = match address {
			Some(address) => ActiveWallet::ReadOnly(Address::parse(address)?),
			None => {
				let account = session.account.get_or_insert_with(LocalAccount::generate);
				ActiveWallet::Owned(account.address())
			},
		};

		log::info!(target: LOG_TARGET, "Active wallet: {wallet:?}");
		session.activate(wallet);
		Ok(wallet.address())
	}

	/// Balance of `address` in display units.
	///
	/// Never fails: when the endpoint is unreachable the amount is zero and the report carries a
	/// [`Error::NetworkUnavailable`]. A successful reading of the active wallet is cached in the
	/// session.
	pub async fn balance(&self, session: &mut SessionState, address: &Address) -> BalanceReport {
		match self.query_balance(address).await {
			Ok(amount) => {
				if session.active_address() == Some(*address) {
					session.balance = Some(amount);
				}
				BalanceReport { amount, error: None }
			},
			Err(err) => {
				log::warn!(target: LOG_TARGET, "Balance of {address} unavailable: {err}");
				BalanceReport { amount: 0.0, error: Some(err) }
			},
		}
	}

	/// Re-read the balance of the active wallet, `None` without one.
	pub async fn refresh_balance(&self, session: &mut SessionState) -> Option<BalanceReport> {
		let address = session.active_address()?;
		Some(self.balance(session, &address).await)
	}

	async fn query_balance(&self, address: &Address) -> Result<f64, Error> {
		if !self.client.is_connected().await {
			return Err(Error::NetworkUnavailable("endpoint is not reachable".into()))
		}
		let wei = self
			.client
			.get_balance(*address.as_h160())
			.await
			.map_err(|err| Error::NetworkUnavailable(err.to_string()))?;
		Ok(from_smallest_unit(wei))
	}
}
