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

//! The emission catalog and the receipt-line matcher.

use crate::{extract_lines, FootprintError, ImpactLevel, LOG_TARGET};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// Reference data shipped with the crate, used when no catalog file is supplied.
const BUILTIN_CATALOG: &str = include_str!("../data/carbon_data.json");

/// A consumption category with its emission factor and a suggested lower-impact alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
	/// Name of the category, matched case-insensitively.
	pub category: String,
	/// Footprint in kg CO2e, always positive.
	pub footprint: f64,
	/// Suggested alternative shown next to a match.
	#[serde(rename = "alt", alias = "alternative")]
	pub alternative: String,
}

impl CatalogEntry {
	/// Per-item impact band of this entry.
	pub fn impact_level(&self) -> ImpactLevel {
		ImpactLevel::for_item(self.footprint)
	}
}

/// A catalog entry found in one line of extracted text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
	/// Index of the matching line among the lines handed to the matcher.
	pub line: usize,
	/// The matched entry.
	pub entry: &'a CatalogEntry,
}

/// Immutable table of [`CatalogEntry`] loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	entries: Vec<CatalogEntry>,
	/// Lower-cased categories, index-aligned with `entries`.
	needles: Vec<String>,
}

impl Catalog {
	/// Build a catalog from entries, rejecting entries that could never contribute a valid
	/// footprint and categories that are listed twice.
	pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, FootprintError> {
		let mut seen = HashSet::with_capacity(entries.len());
		let mut needles = Vec::with_capacity(entries.len());

		for entry in &entries {
			let needle = entry.category.trim().to_lowercase();
			if needle.is_empty() {
				return Err(FootprintError::InvalidCatalog("empty category".into()))
			}
			if !entry.footprint.is_finite() || entry.footprint <= 0.0 {
				return Err(FootprintError::InvalidCatalog(format!(
					"category {:?} has non-positive footprint {}",
					entry.category, entry.footprint
				)))
			}
			if !seen.insert(needle.clone()) {
				return Err(FootprintError::InvalidCatalog(format!(
					"category {:?} is listed more than once",
					entry.category
				)))
			}
			needles.push(needle);
		}

		Ok(Self { entries, needles })
	}

	/// Parse a JSON array of `{ "category", "footprint", "alt" }` objects.
	pub fn from_json(json: &str) -> Result<Self, FootprintError> {
		let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
		Self::new(entries)
	}

	/// Load a catalog from a JSON file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, FootprintError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|err| {
			FootprintError::InvalidCatalog(format!("failed to read {}: {err}", path.display()))
		})?;
		let catalog = Self::from_json(&json)?;
		log::debug!(
			target: LOG_TARGET,
			"Loaded {} catalog entries from {}",
			catalog.len(),
			path.display()
		);
		Ok(catalog)
	}

	/// The catalog bundled with this crate.
	pub fn builtin() -> Result<Self, FootprintError> {
		Self::from_json(BUILTIN_CATALOG)
	}

	pub fn entries(&self) -> &[CatalogEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up an entry by its category, ignoring case.
	pub fn get(&self, category: &str) -> Option<&CatalogEntry> {
		let needle = category.trim().to_lowercase();
		self.needles.iter().position(|n| *n == needle).map(|idx| &self.entries[idx])
	}

	/// Match every line against every entry.
	///
	/// An entry matches when its category occurs anywhere in the line, ignoring case. This is a
	/// substring test, so `milk` matches `almond milk`. One line may match several entries and
	/// the same entry may match several lines. Every non-overlapping occurrence is reported as its
	/// own match, so `beef beef` yields two; nothing is deduplicated.
	pub fn match_lines<'l>(
		&self,
		lines: impl IntoIterator<Item = &'l str>,
	) -> Vec<MatchResult<'_>> {
		let mut matches = Vec::new();
		for (line, text) in lines.into_iter().enumerate() {
			let haystack = text.to_lowercase();
			for (entry, needle) in self.entries.iter().zip(&self.needles) {
				let occurrences = haystack.matches(needle.as_str()).count();
				if occurrences > 0 {
					log::trace!(
						target: LOG_TARGET,
						"line {line} matched {:?} {occurrences} time(s)",
						entry.category
					);
				}
				matches.extend((0..occurrences).map(|_| MatchResult { line, entry }));
			}
		}
		matches
	}

	/// Split raw extracted text into lines and match them.
	///
	/// Line indices in the result refer to the non-blank lines of `text`.
	pub fn match_text(&self, text: &str) -> Vec<MatchResult<'_>> {
		self.match_lines(extract_lines(text))
	}

	/// Free-text search over categories, for display only.
	///
	/// Uses the same case-insensitive substring rule as the matcher, with the query as the
	/// needle and the category as the haystack. An empty query matches every entry.
	pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
		let query = query.to_lowercase();
		self.entries
			.iter()
			.zip(&self.needles)
			.filter(|(_, category)| category.contains(query.as_str()))
			.map(|(entry, _)| entry)
			.collect()
	}
}
