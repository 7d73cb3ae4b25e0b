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

//! Legacy (EIP-155) transactions carrying the `reward(address,uint256)` call.
//! See <https://eips.ethereum.org/EIPS/eip-155>.

use crate::{keccak_256, units::to_alloy, Address, Bytes, Error};
use alloy_core::{primitives, sol, sol_types::SolCall};
use ethereum_types::{H160, H256, U256};
use rlp::Encodable;
use secp256k1::{
	ecdsa::{RecoverableSignature, RecoveryId},
	Message, Secp256k1,
};

sol! {
	/// The single method of the reward contract.
	function reward(address user, uint256 amount) external;
}

/// ABI-encode `reward(user, amount)`.
pub fn encode_reward_call(user: &Address, amount: U256) -> Bytes {
	let call = rewardCall {
		user: primitives::Address::from(user.as_h160().0),
		amount: to_alloy(amount),
	};
	Bytes(call.abi_encode())
}

/// A transaction ready to be signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsignedTransaction {
	pub nonce: U256,
	pub gas_price: U256,
	pub gas: U256,
	pub to: H160,
	pub value: U256,
	pub input: Bytes,
	pub chain_id: U256,
}

impl UnsignedTransaction {
	/// The digest signed by the sender.
	pub fn signing_hash(&self) -> [u8; 32] {
		keccak_256(&rlp::encode(self))
	}

	/// Attach a 65-byte `r || s || recovery_id` signature.
	pub fn with_signature(self, signature: [u8; 65]) -> Result<SignedTransaction, Error> {
		let r = U256::from_big_endian(&signature[..32]);
		let s = U256::from_big_endian(&signature[32..64]);
		let v = self
			.chain_id
			.checked_mul(U256::from(2))
			.and_then(|v| v.checked_add(U256::from(35u32 + signature[64] as u32)))
			.ok_or_else(|| Error::SigningFailure(format!("chain id {} too large", self.chain_id)))?;

		Ok(SignedTransaction { transaction: self, v, r, s })
	}
}

impl Encodable for UnsignedTransaction {
	fn rlp_append(&self, s: &mut rlp::RlpStream) {
		s.begin_list(9);
		s.append(&self.nonce);
		s.append(&self.gas_price);
		s.append(&self.gas);
		s.append(&self.to);
		s.append(&self.value);
		s.append(&self.input.0);
		s.append(&self.chain_id);
		s.append(&0u8);
		s.append(&0u8);
	}
}

/// A signed transaction, as broadcast to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
	pub transaction: UnsignedTransaction,
	pub v: U256,
	pub r: U256,
	pub s: U256,
}

impl SignedTransaction {
	/// The RLP-encoded payload for `eth_sendRawTransaction`.
	pub fn raw(&self) -> Bytes {
		Bytes(rlp::encode(self).to_vec())
	}

	/// The transaction hash, keccak-256 of the raw payload.
	pub fn hash(&self) -> H256 {
		H256(keccak_256(&self.raw().0))
	}

	fn recovery_id(&self) -> Option<u8> {
		// v - chain_id * 2 - 35
		let id = self
			.v
			.checked_sub(self.transaction.chain_id.checked_mul(U256::from(2))?)?
			.checked_sub(U256::from(35))?;
		(id <= U256::from(3)).then(|| id.low_u32() as u8)
	}

	/// Recover the address of the key that signed this transaction.
	pub fn recover_signer(&self) -> Result<Address, Error> {
		let failure = |reason: &str| Error::SigningFailure(reason.to_string());

		let recovery_id = self.recovery_id().ok_or_else(|| failure("invalid v"))?;
		let recovery_id =
			RecoveryId::from_i32(recovery_id as i32).map_err(|e| failure(&e.to_string()))?;
		let mut compact = [0u8; 64];
		compact[..32].copy_from_slice(&self.r.to_big_endian());
		compact[32..].copy_from_slice(&self.s.to_big_endian());
		let signature = RecoverableSignature::from_compact(&compact, recovery_id)
			.map_err(|e| failure(&e.to_string()))?;

		let message = Message::from_digest(self.transaction.signing_hash());
		let public_key = Secp256k1::verification_only()
			.recover_ecdsa(&message, &signature)
			.map_err(|e| failure(&e.to_string()))?;
		Ok(Address::from_public_key(&public_key.serialize_uncompressed()))
	}
}

impl Encodable for SignedTransaction {
	fn rlp_append(&self, s: &mut rlp::RlpStream) {
		let tx = &self.transaction;
		s.begin_list(9);
		s.append(&tx.nonce);
		s.append(&tx.gas_price);
		s.append(&tx.gas);
		s.append(&tx.to);
		s.append(&tx.value);
		s.append(&tx.input.0);

		s.append(&self.v);
		s.append(&self.r);
		s.append(&self.s);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::LocalAccount;
	use hex_literal::hex;
	use pretty_assertions::assert_eq;

	/// The worked example of EIP-155.
	fn eip155_example() -> UnsignedTransaction {
		UnsignedTransaction {
			nonce: 9.into(),
			gas_price: 20_000_000_000u64.into(),
			gas: 21_000.into(),
			to: H160(hex!("3535353535353535353535353535353535353535")),
			value: 1_000_000_000_000_000_000u64.into(),
			input: Bytes::default(),
			chain_id: 1.into(),
		}
	}

	#[test]
	fn signing_payload_matches_eip155() {
		let tx = eip155_example();
		assert_eq!(
			hex::encode(rlp::encode(&tx)),
			"ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
		);
		assert_eq!(
			tx.signing_hash(),
			hex!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53")
		);
	}

	#[test]
	fn signed_payload_matches_eip155() {
		let account = LocalAccount::from_secret_key(&[0x46; 32]).unwrap();
		let signed = account.sign_transaction(eip155_example()).unwrap();

		assert_eq!(signed.v, U256::from(37));
		assert_eq!(
			signed.raw().to_string(),
			"0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
		);
		assert_eq!(signed.recover_signer().unwrap(), account.address());
	}

	#[test]
	fn reward_call_encoding() {
		let user = Address::from(H160(hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")));
		let amount = U256::from(7_500_000_000_000_000_000u64);
		let input = encode_reward_call(&user, amount).0;

		assert_eq!(input.len(), 4 + 32 + 32);
		assert_eq!(input[..4], keccak_256(b"reward(address,uint256)")[..4]);
		assert_eq!(input[4..16], [0u8; 12]);
		assert_eq!(input[16..36], user.as_h160().0);
		assert_eq!(input[36..], amount.to_big_endian());
	}

	#[test]
	fn chain_id_determines_v() {
		let tx = UnsignedTransaction { chain_id: 6342.into(), ..eip155_example() };
		let signed = tx.clone().with_signature([1u8; 65]).unwrap();
		assert_eq!(signed.v, U256::from(6342 * 2 + 35 + 1));
		assert_eq!(signed.recovery_id(), Some(1));

		let tx = UnsignedTransaction { chain_id: U256::MAX, ..tx };
		assert!(tx.with_signature([0u8; 65]).is_err());
	}
}
