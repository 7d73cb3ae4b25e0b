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

//! Footprint aggregation, impact bands and the transport term.

use crate::{FootprintError, MatchResult, LOG_TARGET};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Three-band impact classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
	Low,
	Medium,
	High,
}

impl ImpactLevel {
	/// Bands for an aggregate food footprint: below 10 kg is low, below 30 kg is medium.
	pub fn for_food_total(food_total: f64) -> Self {
		Self::banded(food_total, 10.0, 30.0)
	}

	/// Bands for a single catalog entry: below 2 kg is low, below 10 kg is medium.
	pub fn for_item(footprint: f64) -> Self {
		Self::banded(footprint, 2.0, 10.0)
	}

	fn banded(value: f64, low: f64, medium: f64) -> Self {
		if value < low {
			ImpactLevel::Low
		} else if value < medium {
			ImpactLevel::Medium
		} else {
			ImpactLevel::High
		}
	}
}

impl fmt::Display for ImpactLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ImpactLevel::Low => f.pad("Low"),
			ImpactLevel::Medium => f.pad("Medium"),
			ImpactLevel::High => f.pad("High"),
		}
	}
}

/// Food and transport footprint of one input, with its classification.
///
/// Derived on every new input and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintSummary {
	pub food_total: f64,
	pub transport_total: f64,
	/// `food_total + transport_total`.
	pub total: f64,
	/// Classification of `food_total` only; the transport term never moves the band.
	pub impact_level: ImpactLevel,
}

impl FootprintSummary {
	/// Fold matched entries into the food total and combine it with the transport term.
	pub fn new(matches: &[MatchResult<'_>], transport_total: f64) -> Self {
		let food_total = food_total(matches);
		let summary = Self {
			food_total,
			transport_total,
			total: food_total + transport_total,
			impact_level: ImpactLevel::for_food_total(food_total),
		};
		log::debug!(target: LOG_TARGET, "Footprint summary: {summary:?}");
		summary
	}
}

/// Sum of the footprints of all matches, counting repeated matches every time.
pub fn food_total(matches: &[MatchResult<'_>]) -> f64 {
	matches.iter().map(|m| m.entry.footprint).sum()
}

/// Means of transport with a fixed emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
	PetrolCar,
	DieselCar,
	Bus,
	Train,
	ElectricCar,
	DomesticFlight,
}

impl VehicleType {
	/// All vehicle types, in display order.
	pub const ALL: [VehicleType; 6] = [
		VehicleType::PetrolCar,
		VehicleType::DieselCar,
		VehicleType::Bus,
		VehicleType::Train,
		VehicleType::ElectricCar,
		VehicleType::DomesticFlight,
	];

	/// Emission factor in kg CO2e per km.
	pub fn emission_factor(&self) -> f64 {
		match self {
			VehicleType::PetrolCar => 0.192,
			VehicleType::DieselCar => 0.171,
			VehicleType::Bus => 0.105,
			VehicleType::Train => 0.041,
			VehicleType::ElectricCar => 0.05,
			VehicleType::DomesticFlight => 0.255,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			VehicleType::PetrolCar => "Petrol Car",
			VehicleType::DieselCar => "Diesel Car",
			VehicleType::Bus => "Bus",
			VehicleType::Train => "Train",
			VehicleType::ElectricCar => "Electric Car",
			VehicleType::DomesticFlight => "Domestic Flight",
		}
	}

	/// Footprint of travelling `distance_km`, rounded to two decimal places.
	pub fn footprint(&self, distance_km: f64) -> Result<f64, FootprintError> {
		if !distance_km.is_finite() || distance_km < 0.0 {
			return Err(FootprintError::InvalidDistance(distance_km))
		}
		Ok(round_to_cents(distance_km * self.emission_factor()))
	}
}

impl fmt::Display for VehicleType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for VehicleType {
	type Err = FootprintError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		VehicleType::ALL
			.into_iter()
			.find(|vehicle| vehicle.name() == s)
			.ok_or_else(|| FootprintError::InvalidVehicleType(s.to_string()))
	}
}

/// Transport footprint for a vehicle given by its display name.
pub fn transport_footprint(distance_km: f64, vehicle_type: &str) -> Result<f64, FootprintError> {
	vehicle_type.parse::<VehicleType>()?.footprint(distance_km)
}

/// Round to two decimals on the exact binary value, ties to even.
fn round_to_cents(value: f64) -> f64 {
	format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Catalog, CatalogEntry};
	use assert_matches::assert_matches;

	#[test]
	fn food_bands() {
		assert_eq!(ImpactLevel::for_food_total(0.0), ImpactLevel::Low);
		assert_eq!(ImpactLevel::for_food_total(9.99), ImpactLevel::Low);
		assert_eq!(ImpactLevel::for_food_total(10.0), ImpactLevel::Medium);
		assert_eq!(ImpactLevel::for_food_total(25.0), ImpactLevel::Medium);
		assert_eq!(ImpactLevel::for_food_total(30.0), ImpactLevel::High);
	}

	#[test]
	fn item_bands() {
		assert_eq!(ImpactLevel::for_item(1.9), ImpactLevel::Low);
		assert_eq!(ImpactLevel::for_item(2.0), ImpactLevel::Medium);
		assert_eq!(ImpactLevel::for_item(9.9), ImpactLevel::Medium);
		assert_eq!(ImpactLevel::for_item(27.0), ImpactLevel::High);
	}

	#[test]
	fn repeated_matches_accumulate() {
		let catalog = Catalog::new(vec![CatalogEntry {
			category: "beef".into(),
			footprint: 27.0,
			alternative: "lentils".into(),
		}])
		.unwrap();

		let matches = catalog.match_text("beef beef");
		assert_eq!(FootprintSummary::new(&matches, 0.0).food_total, 54.0);

		let matches = catalog.match_text("beef\nBEEF");
		assert_eq!(FootprintSummary::new(&matches, 0.0).food_total, 54.0);
	}

	#[test]
	fn summary_bands_use_food_total_only() {
		let catalog = Catalog::builtin().unwrap();
		let matches = catalog.match_text("Chicken breast");
		let summary = FootprintSummary::new(&matches, 40.0);

		assert_eq!(summary.food_total, 6.9);
		assert_eq!(summary.total, 6.9 + 40.0);
		// Transport pushes the total beyond the high band, the classification stays low.
		assert_eq!(summary.impact_level, ImpactLevel::Low);
	}

	#[test]
	fn transport_footprint_per_vehicle() {
		assert_eq!(transport_footprint(100.0, "Electric Car"), Ok(5.0));
		assert_eq!(transport_footprint(12.5, "Petrol Car"), Ok(2.4));
		assert_eq!(transport_footprint(0.0, "Domestic Flight"), Ok(0.0));
		assert_eq!(VehicleType::Train.footprint(33.3), Ok(1.37));
	}

	#[test]
	fn emission_factor_table() {
		let expected = [
			("Petrol Car", 19.2, 48.0),
			("Diesel Car", 17.1, 42.75),
			("Bus", 10.5, 26.25),
			("Train", 4.1, 10.25),
			("Electric Car", 5.0, 12.5),
			("Domestic Flight", 25.5, 63.75),
		];
		assert_eq!(expected.len(), VehicleType::ALL.len());

		for (vehicle, (name, per_100_km, per_250_km)) in VehicleType::ALL.into_iter().zip(expected) {
			assert_eq!(vehicle.name(), name);
			assert_eq!(transport_footprint(100.0, name), Ok(per_100_km), "{name}");
			assert_eq!(vehicle.footprint(250.0), Ok(per_250_km), "{name}");
		}
	}

	#[test]
	fn rounding_follows_the_exact_value() {
		// Products that print as a half cent but are stored just below it round down.
		assert_eq!(transport_footprint(205.0, "Diesel Car"), Ok(35.05));
		assert_eq!(transport_footprint(1.0, "Bus"), Ok(0.1));
		assert_eq!(transport_footprint(15.0, "Train"), Ok(0.61));
		assert_eq!(transport_footprint(0.3, "Electric Car"), Ok(0.01));
		assert_eq!(transport_footprint(9.0, "Domestic Flight"), Ok(2.29));

		assert_eq!(transport_footprint(37.0, "Petrol Car"), Ok(7.1));
		assert_eq!(transport_footprint(37.0, "Diesel Car"), Ok(6.33));
		assert_eq!(transport_footprint(37.0, "Domestic Flight"), Ok(9.44));
	}

	#[test]
	fn unknown_vehicle_is_rejected() {
		assert_matches!(
			transport_footprint(10.0, "Hovercraft"),
			Err(FootprintError::InvalidVehicleType(v)) if v == "Hovercraft"
		);
		// Names are matched exactly.
		assert_matches!(
			transport_footprint(10.0, "bus"),
			Err(FootprintError::InvalidVehicleType(_))
		);
	}

	#[test]
	fn negative_distance_is_rejected() {
		assert_matches!(
			VehicleType::Bus.footprint(-1.0),
			Err(FootprintError::InvalidDistance(_))
		);
		assert_matches!(
			VehicleType::Bus.footprint(f64::INFINITY),
			Err(FootprintError::InvalidDistance(_))
		);
	}

	#[test]
	fn vehicle_names_round_trip() {
		for vehicle in VehicleType::ALL {
			assert_eq!(vehicle.to_string().parse::<VehicleType>(), Ok(vehicle));
		}
	}
}
