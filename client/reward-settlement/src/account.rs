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

//! Accounts holding a secp256k1 signing key.

use crate::{Address, Error, SignedTransaction, UnsignedTransaction, LOG_TARGET};
use rand::{rngs::OsRng, RngCore};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, SignOnly};
use std::fmt;
use zeroize::Zeroizing;

/// An account whose private key is held in memory.
///
/// The key never leaves this type: it is neither displayed nor serialized, and it is erased when
/// the account is dropped. Only signatures produced with it are handed out.
pub struct LocalAccount {
	secret: SecretKey,
	address: Address,
	context: Secp256k1<SignOnly>,
}

impl LocalAccount {
	/// Generate a fresh key from the operating system's random source.
	pub fn generate() -> Self {
		let mut bytes = Zeroizing::new([0u8; 32]);
		loop {
			OsRng.fill_bytes(&mut bytes[..]);
			// Rejects zero and values above the curve order, both with negligible probability.
			if let Ok(account) = Self::from_secret_key(&bytes[..]) {
				log::debug!(target: LOG_TARGET, "Generated account {}", account.address);
				return account
			}
		}
	}

	/// Build an account from 32 raw key bytes.
	pub fn from_secret_key(bytes: &[u8]) -> Result<Self, Error> {
		let secret = SecretKey::from_slice(bytes)
			.map_err(|_| Error::SigningFailure("invalid secret key".into()))?;
		let context = Secp256k1::signing_only();
		let public = PublicKey::from_secret_key(&context, &secret);
		let address = Address::from_public_key(&public.serialize_uncompressed());
		Ok(Self { secret, address, context })
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// Sign a transaction.
	pub fn sign_transaction(&self, tx: UnsignedTransaction) -> Result<SignedTransaction, Error> {
		let message = Message::from_digest(tx.signing_hash());
		let (recovery_id, compact) = self
			.context
			.sign_ecdsa_recoverable(&message, &self.secret)
			.serialize_compact();

		let recovery_id = u8::try_from(recovery_id.to_i32())
			.map_err(|_| Error::SigningFailure("invalid recovery id".into()))?;
		let mut signature = [0u8; 65];
		signature[..64].copy_from_slice(&compact);
		signature[64] = recovery_id;
		tx.with_signature(signature)
	}
}

impl fmt::Debug for LocalAccount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocalAccount").field("address", &self.address).finish_non_exhaustive()
	}
}

impl Drop for LocalAccount {
	fn drop(&mut self) {
		self.secret.non_secure_erase();
	}
}
