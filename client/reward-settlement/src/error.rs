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

//! Errors of the settlement path.

use crate::SettlementReceipt;
use carbon_footprint::FootprintError;
use std::time::Duration;
use thiserror::Error;

/// Machine-checkable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	InvalidAddressFormat,
	InvalidVehicleType,
	/// Any other rejected input, such as a negative distance or a malformed catalog.
	InvalidInput,
	NoSigningKey,
	NothingToClaim,
	NetworkUnavailable,
	SigningFailure,
	BroadcastFailure,
	OnChainRevert,
	Timeout,
}

/// The error type of this crate.
///
/// None of these is retried internally. After any failure on the settlement path the caller has
/// to start a new claim attempt, which rebuilds the transaction from the current nonce and gas
/// price.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// The string is not a well-formed address.
	#[error("invalid address format: {0:?}")]
	InvalidAddressFormat(String),
	/// A [`FootprintError`] wrapper error.
	#[error(transparent)]
	Footprint(#[from] FootprintError),
	/// No active wallet, or the active wallet was imported by address only.
	#[error("the active wallet has no signing key")]
	NoSigningKey,
	/// The footprint or the reward is not positive, so no transaction is attempted.
	#[error("nothing to claim for a footprint of {footprint} kg (reward {amount})")]
	NothingToClaim { footprint: f64, amount: f64 },
	/// The endpoint could not be reached or answered with an error.
	#[error("network unavailable: {0}")]
	NetworkUnavailable(String),
	#[error("signing failed: {0}")]
	SigningFailure(String),
	/// The endpoint refused the signed transaction.
	#[error("broadcast failed: {0}")]
	BroadcastFailure(String),
	/// The transaction was mined with a failure status.
	#[error("transaction {:?} reverted on chain", .0.tx_hash)]
	OnChainRevert(SettlementReceipt),
	/// A caller-imposed deadline elapsed.
	#[error("settlement did not finish within {0:?}")]
	Timeout(Duration),
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::InvalidAddressFormat(_) => ErrorKind::InvalidAddressFormat,
			Error::Footprint(FootprintError::InvalidVehicleType(_)) => ErrorKind::InvalidVehicleType,
			Error::Footprint(_) => ErrorKind::InvalidInput,
			Error::NoSigningKey => ErrorKind::NoSigningKey,
			Error::NothingToClaim { .. } => ErrorKind::NothingToClaim,
			Error::NetworkUnavailable(_) => ErrorKind::NetworkUnavailable,
			Error::SigningFailure(_) => ErrorKind::SigningFailure,
			Error::BroadcastFailure(_) => ErrorKind::BroadcastFailure,
			Error::OnChainRevert(_) => ErrorKind::OnChainRevert,
			Error::Timeout(_) => ErrorKind::Timeout,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn footprint_errors_keep_their_kind() {
		let err = Error::from(FootprintError::InvalidVehicleType("Zeppelin".into()));
		assert_eq!(err.kind(), ErrorKind::InvalidVehicleType);
		assert_eq!(err.to_string(), "invalid vehicle type: \"Zeppelin\"");

		let err = Error::from(FootprintError::InvalidDistance(-3.0));
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
	}

	#[test]
	fn messages_are_readable() {
		assert_eq!(
			Error::NetworkUnavailable("connection refused".into()).to_string(),
			"network unavailable: connection refused"
		);
		assert_eq!(Error::NoSigningKey.to_string(), "the active wallet has no signing key");
	}
}
