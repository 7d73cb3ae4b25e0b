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

//! The reward curve.

use serde::{Deserialize, Serialize};

/// Footprint, in kg CO2e, at and beyond which no reward is granted.
pub const MAX_FOOTPRINT: f64 = 100.0;

/// Reward granted for a footprint of zero, in whole reward tokens.
pub const BASE_REWARD: f64 = 10.0;

/// Map a total footprint onto the reward curve.
///
/// The curve falls linearly from [`BASE_REWARD`] at a footprint of zero to nothing at
/// [`MAX_FOOTPRINT`]. A footprint that is zero or negative means nothing has been recorded yet and
/// earns the full reward.
pub fn reward(total_footprint: f64) -> f64 {
	if total_footprint <= 0.0 {
		BASE_REWARD
	} else if total_footprint >= MAX_FOOTPRINT {
		0.0
	} else {
		BASE_REWARD * (1.0 - total_footprint / MAX_FOOTPRINT)
	}
}

/// A reward amount quoted for a footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardQuote {
	pub footprint: f64,
	pub amount: f64,
}

impl RewardQuote {
	pub fn for_footprint(footprint: f64) -> Self {
		Self { footprint, amount: reward(footprint) }
	}

	/// Whether this quote may be settled: something was recorded and something is owed.
	pub fn is_claimable(&self) -> bool {
		self.footprint > 0.0 && self.amount > 0.0
	}
}
