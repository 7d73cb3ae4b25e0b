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

//! Hex-encoded byte strings as used on the JSON-RPC wire.

use serde::{Deserialize, Serialize};
use std::{
	fmt::{Debug, Display, Formatter, Result as FmtResult},
	str::FromStr,
};

mod hex_serde {
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&format!("0x{}", hex::encode(value)))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let s = String::deserialize(deserializer)?;
		hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
	}
}

/// Raw bytes, `0x`-prefixed hex on the wire.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bytes(#[serde(with = "hex_serde")] pub Vec<u8>);

impl Bytes {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(inner: Vec<u8>) -> Self {
		Bytes(inner)
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl FromStr for Bytes {
	type Err = hex::FromHexError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		hex::decode(s.trim_start_matches("0x")).map(Bytes)
	}
}

impl Debug for Bytes {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		write!(f, "Bytes(0x{})", hex::encode(&self.0))
	}
}

impl Display for Bytes {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

#[test]
fn serialize_works() {
	let a = Bytes(b"bello world".to_vec());
	let s = serde_json::to_string(&a).unwrap();
	assert_eq!(s, "\"0x62656c6c6f20776f726c64\"");
	let b = serde_json::from_str::<Bytes>(&s).unwrap();
	assert_eq!(a, b);

	assert_eq!(serde_json::to_string(&Bytes::default()).unwrap(), "\"0x\"");
	assert!(serde_json::from_str::<Bytes>("\"0xabc\"").is_err());
	assert_eq!("0x0102".parse::<Bytes>().unwrap(), Bytes(vec![1, 2]));
}
