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

//! Account addresses and their textual form.

use crate::{keccak_256, Error};
use alloy_core::primitives;
use ethereum_types::H160;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A 20-byte account address.
///
/// Parsing accepts 40 hex digits with or without a `0x` prefix. Mixed-case input must carry a
/// valid EIP-55 checksum; all-lowercase and all-uppercase input is accepted as is. Addresses are
/// displayed in checksummed form.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(H160);

impl Address {
	/// Derive the address of an uncompressed secp256k1 public key (`0x04 || x || y`).
	pub fn from_public_key(public_key: &[u8; 65]) -> Self {
		let hash = keccak_256(&public_key[1..]);
		Self(H160::from_slice(&hash[12..]))
	}

	/// Parse an address, see the type documentation for the accepted forms.
	pub fn parse(input: &str) -> Result<Self, Error> {
		let invalid = || Error::InvalidAddressFormat(input.to_string());
		let digits = input
			.strip_prefix("0x")
			.or_else(|| input.strip_prefix("0X"))
			.unwrap_or(input);
		if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(invalid())
		}

		let address = digits.parse::<primitives::Address>().map_err(|_| invalid())?;
		let mixed_case = digits.bytes().any(|b| b.is_ascii_lowercase()) &&
			digits.bytes().any(|b| b.is_ascii_uppercase());
		if mixed_case && primitives::Address::parse_checksummed(format!("0x{digits}"), None).is_err() {
			return Err(invalid())
		}
		Ok(Self(H160(address.into_array())))
	}

	pub fn as_h160(&self) -> &H160 {
		&self.0
	}

	/// The EIP-55 checksummed form, with `0x` prefix.
	pub fn to_checksum(&self) -> String {
		primitives::Address::from(self.0 .0).to_checksum(None)
	}
}

impl From<H160> for Address {
	fn from(address: H160) -> Self {
		Self(address)
	}
}

impl From<Address> for H160 {
	fn from(address: Address) -> Self {
		address.0
	}
}

impl FromStr for Address {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_checksum())
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({})", self.to_checksum())
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_checksum())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Self::parse(&s).map_err(de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

	#[test]
	fn checksum_round_trip() {
		let address = Address::parse(CHECKSUMMED).unwrap();
		assert_eq!(address.to_string(), CHECKSUMMED);
		assert_eq!(
			Address::parse("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap().to_string(),
			"0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
		);
	}

	#[test]
	fn accepts_uniform_case_and_missing_prefix() {
		let expected = Address::parse(CHECKSUMMED).unwrap();
		assert_eq!(Address::parse(&CHECKSUMMED.to_lowercase()).unwrap(), expected);
		assert_eq!(Address::parse(&CHECKSUMMED[2..].to_uppercase()).unwrap(), expected);
		assert_eq!(Address::parse(&CHECKSUMMED[2..]).unwrap(), expected);
	}

	#[test]
	fn rejects_malformed_input() {
		for input in [
			"not-an-address",
			"",
			"0x",
			"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe",
			"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAedd",
			"0xZaAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
			// Mixed case with a broken checksum.
			"0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
		] {
			assert_matches!(
				Address::parse(input),
				Err(Error::InvalidAddressFormat(s)) if s == input,
				"{input:?} was accepted"
			);
		}
	}

	#[test]
	fn checksum_of_derived_addresses() {
		// Key 0x46..46 of the EIP-155 example.
		let public_key = secp256k1::PublicKey::from_secret_key(
			&secp256k1::Secp256k1::signing_only(),
			&secp256k1::SecretKey::from_slice(&[0x46; 32]).unwrap(),
		);
		let address = Address::from_public_key(&public_key.serialize_uncompressed());
		assert_eq!(address.to_checksum(), "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F");
		assert_eq!(Address::parse(&address.to_checksum()).unwrap(), address);
		assert_eq!(Address::parse(&address.to_checksum().replacen("0x", "0X", 1)).unwrap(), address);
	}

	#[test]
	fn serde_uses_checksummed_form() {
		let address = Address::parse(CHECKSUMMED).unwrap();
		let json = serde_json::to_string(&address).unwrap();
		assert_eq!(json, format!("\"{CHECKSUMMED}\""));
		assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
		assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
	}
}
