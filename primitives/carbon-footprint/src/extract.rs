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

//! Boundary towards the text-extraction collaborator.

/// A source of extracted receipt text, such as an OCR service.
///
/// The only contract is that the returned text is UTF-8. An empty string is a valid result and
/// produces no matches.
pub trait TextExtractor {
	/// Error reported by the extraction backend.
	type Error;

	/// Extract the text contained in an encoded image.
	fn extract_text(&self, image: &[u8]) -> Result<String, Self::Error>;
}

/// Text that was already extracted elsewhere, returned as-is for any image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreExtracted(pub String);

impl TextExtractor for PreExtracted {
	type Error = core::convert::Infallible;

	fn extract_text(&self, _image: &[u8]) -> Result<String, Self::Error> {
		Ok(self.0.clone())
	}
}

/// Split extracted text into trimmed, non-blank lines.
pub fn extract_lines(text: &str) -> impl Iterator<Item = &str> {
	text.lines().map(str::trim).filter(|line| !line.is_empty())
}
