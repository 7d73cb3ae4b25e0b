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

//! Footprint primitives.
//!
//! Everything in this crate is free of I/O towards the network: matching extracted receipt text
//! against an emission [`Catalog`], folding the matches and a transport term into a
//! [`FootprintSummary`], and mapping the total onto the reward curve ([`reward`]).
//!
//! ```
//! use carbon_footprint::{reward, Catalog, FootprintSummary, ImpactLevel};
//!
//! let catalog = Catalog::from_json(r#"[{ "category": "beef", "footprint": 12.5, "alt": "lentils" }]"#)
//! 	.unwrap();
//! let matches = catalog.match_text("1x Beef mince\n1x beef burger");
//! let summary = FootprintSummary::new(&matches, 0.0);
//!
//! assert_eq!(summary.food_total, 25.0);
//! assert_eq!(summary.impact_level, ImpactLevel::Medium);
//! assert_eq!(reward(summary.total), 7.5);
//! ```

mod catalog;
mod extract;
mod footprint;
mod reward;

pub use catalog::*;
pub use extract::*;
pub use footprint::*;
pub use reward::*;

use thiserror::Error;

/// Log target used by this crate.
pub const LOG_TARGET: &str = "carbon-footprint";

/// Errors produced while loading reference data or computing a footprint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
	/// The vehicle type is not one of [`VehicleType::ALL`].
	#[error("invalid vehicle type: {0:?}")]
	InvalidVehicleType(String),
	/// A travelled distance must be finite and not negative.
	#[error("invalid distance: {0} km")]
	InvalidDistance(f64),
	/// The catalog reference data could not be loaded.
	#[error("invalid catalog: {0}")]
	InvalidCatalog(String),
}

impl From<serde_json::Error> for FootprintError {
	fn from(err: serde_json::Error) -> Self {
		Self::InvalidCatalog(err.to_string())
	}
}
