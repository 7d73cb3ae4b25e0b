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

//! Conversion between display units and the chain's smallest unit.

use alloy_core::primitives::{
	self,
	utils::{format_ether, parse_ether},
};
use ethereum_types::U256;

/// Convert an amount in display units into the smallest unit.
///
/// The amount is taken through its shortest decimal representation, so `0.1` becomes exactly
/// `10^17`. Digits beyond the 18th decimal are truncated. Returns `None` for negative, non-finite
/// or out-of-range amounts.
pub fn to_smallest_unit(amount: f64) -> Option<U256> {
	if !amount.is_finite() || amount < 0.0 {
		return None
	}
	if amount == 0.0 {
		return Some(U256::zero())
	}
	parse_ether(&amount.to_string()).ok().map(from_alloy)
}

/// Convert an amount in the smallest unit into display units.
pub fn from_smallest_unit(value: U256) -> f64 {
	format_ether(to_alloy(value)).parse().unwrap_or(f64::INFINITY)
}

pub(crate) fn to_alloy(value: U256) -> primitives::U256 {
	primitives::U256::from_be_bytes(value.to_big_endian())
}

fn from_alloy(value: primitives::U256) -> U256 {
	U256::from_big_endian(&value.to_be_bytes::<32>())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wei(s: &str) -> U256 {
		U256::from_dec_str(s).unwrap()
	}

	#[test]
	fn display_to_smallest_unit() {
		assert_eq!(to_smallest_unit(7.5), Some(wei("7500000000000000000")));
		assert_eq!(to_smallest_unit(10.0), Some(wei("10000000000000000000")));
		assert_eq!(to_smallest_unit(0.1), Some(wei("100000000000000000")));
		assert_eq!(to_smallest_unit(7.4), Some(wei("7400000000000000000")));
		assert_eq!(to_smallest_unit(1e-18), Some(wei("1")));
		assert_eq!(to_smallest_unit(1e-19), Some(U256::zero()));
		assert_eq!(to_smallest_unit(0.0), Some(U256::zero()));
	}

	#[test]
	fn rejects_unrepresentable_amounts() {
		assert_eq!(to_smallest_unit(-1.0), None);
		assert_eq!(to_smallest_unit(f64::NAN), None);
		assert_eq!(to_smallest_unit(f64::INFINITY), None);
		assert_eq!(to_smallest_unit(f64::MAX), None);
	}

	#[test]
	fn smallest_unit_to_display() {
		assert_eq!(from_smallest_unit(wei("1500000000000000000")), 1.5);
		assert_eq!(from_smallest_unit(wei("1")), 1e-18);
		assert_eq!(from_smallest_unit(U256::zero()), 0.0);
		assert_eq!(from_smallest_unit(wei("123000000000000000000")), 123.0);
	}

	#[test]
	fn reward_amounts_survive_the_round_trip() {
		for amount in [10.0, 9.75, 7.5, 3.3, 0.05] {
			let wei = to_smallest_unit(amount).unwrap();
			assert_eq!(from_smallest_unit(wei), amount);
		}
		assert!(from_smallest_unit(U256::MAX) > 1e58);
	}
}
