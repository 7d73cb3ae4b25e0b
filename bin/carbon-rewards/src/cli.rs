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

//! Command line parsing and the commands themselves.

use anyhow::{anyhow, Context};
use carbon_footprint::{
	transport_footprint, Catalog, FootprintError, FootprintSummary, ImpactLevel, RewardQuote,
	VehicleType,
};
use clap::{Args, Parser, Subcommand};
use reward_settlement::{
	Address, NetworkConfig, RpcNetworkClient, SessionState, SettlementEngine, SettlementReceipt,
	WalletManager,
};
use std::{fs, path::PathBuf, sync::Arc, time::Duration};

const LOG_TARGET: &str = "carbon-rewards";

// Parsed command instructions from the command line
#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct Cli {
	/// Emission catalog (JSON). The built-in catalog is used when omitted.
	#[clap(long, global = true)]
	pub catalog: Option<PathBuf>,

	#[clap(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Compute the footprint of a receipt and the reward it earns.
	Footprint(ReceiptArgs),
	/// Search the catalog by category.
	Search {
		/// Case-insensitive part of a category name. Lists everything when empty.
		#[clap(default_value = "")]
		query: String,
	},
	/// Show the balance of a wallet.
	Balance {
		/// Address to query. A fresh wallet is generated when omitted.
		#[clap(long)]
		address: Option<String>,
	},
	/// Compute the reward of a receipt and settle it on chain.
	Claim {
		#[clap(flatten)]
		receipt: ReceiptArgs,

		/// Import this address instead of generating a wallet. Imported wallets cannot sign.
		#[clap(long)]
		address: Option<String>,

		/// Give up waiting for the settlement after this many seconds.
		#[clap(long)]
		timeout: Option<u64>,
	},
}

#[derive(Args, Debug)]
pub struct ReceiptArgs {
	/// Text extracted from the receipt, one item per line.
	#[clap(long)]
	pub receipt: PathBuf,

	/// Vehicle used for the trip, one of "Petrol Car", "Diesel Car", "Bus", "Train",
	/// "Electric Car", "Domestic Flight".
	#[clap(long, requires = "distance")]
	pub vehicle: Option<String>,

	/// Distance travelled, in km.
	#[clap(long, requires = "vehicle")]
	pub distance: Option<f64>,
}

/// A matched receipt line, as printed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedItem {
	pub category: String,
	pub footprint: f64,
	pub impact_level: ImpactLevel,
	pub alternative: String,
}

/// Footprint and reward of one receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
	pub items: Vec<MatchedItem>,
	pub summary: FootprintSummary,
	pub quote: RewardQuote,
}

/// Assess receipt `text`, optionally with a trip.
pub fn assess(
	catalog: &Catalog,
	text: &str,
	trip: Option<(&str, f64)>,
) -> Result<Assessment, FootprintError> {
	let transport_total = match trip {
		Some((vehicle, distance)) => transport_footprint(distance, vehicle)?,
		None => 0.0,
	};

	let matches = catalog.match_text(text);
	let items = matches
		.iter()
		.map(|m| MatchedItem {
			category: m.entry.category.clone(),
			footprint: m.entry.footprint,
			impact_level: m.entry.impact_level(),
			alternative: m.entry.alternative.clone(),
		})
		.collect();
	let summary = FootprintSummary::new(&matches, transport_total);

	Ok(Assessment { items, summary, quote: RewardQuote::for_footprint(summary.total) })
}

fn assess_receipt(catalog: &Catalog, args: &ReceiptArgs) -> anyhow::Result<Assessment> {
	let text = fs::read_to_string(&args.receipt)
		.with_context(|| format!("Failed to read receipt {}", args.receipt.display()))?;
	let trip = args.vehicle.as_deref().zip(args.distance);
	assess(catalog, &text, trip).map_err(|err| match err {
		FootprintError::InvalidVehicleType(_) =>
			anyhow!("{err}, expected one of: {}", vehicle_names().join(", ")),
		err => err.into(),
	})
}

fn print_assessment(assessment: &Assessment) {
	for item in &assessment.items {
		println!(
			"{:<16} {:>8.2} kg  {:<6}  try: {}",
			item.category, item.footprint, item.impact_level, item.alternative
		);
	}
	let summary = &assessment.summary;
	println!("Food:      {:.2} kg CO2e", summary.food_total);
	println!("Transport: {:.2} kg CO2e", summary.transport_total);
	println!("Total:     {:.2} kg CO2e ({} impact)", summary.total, summary.impact_level);
	println!("Reward:    {:.4}", assessment.quote.amount);
}

fn balance_line(address: &Address, amount: f64, config: &NetworkConfig) -> String {
	format!("{address}: {amount:.4} {}", config.currency_symbol)
}

fn claim_line(amount: f64, receipt: &SettlementReceipt, config: &NetworkConfig) -> String {
	format!(
		"Claimed {amount:.4} in block {}: {}",
		receipt.block_confirmation.block_number,
		config.explorer_tx_url(&receipt.tx_hash)
	)
}

/// Run the parsed command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
	let catalog = match &cli.catalog {
		Some(path) => Catalog::load(path)?,
		None => Catalog::builtin()?,
	};
	log::debug!(target: LOG_TARGET, "Loaded {} catalog entries", catalog.len());

	match cli.command {
		Command::Footprint(args) => print_assessment(&assess_receipt(&catalog, &args)?),
		Command::Search { query } =>
			for entry in catalog.search(&query) {
				println!(
					"{:<16} {:>8.2} kg  {:<6}  try: {}",
					entry.category,
					entry.footprint,
					entry.impact_level(),
					entry.alternative
				);
			},
		Command::Balance { address } => {
			let config = NetworkConfig::default();
			let client = Arc::new(RpcNetworkClient::new(&config)?);
			let wallets = WalletManager::new(client);
			let mut session = SessionState::new();

			let address = wallets.connect(&mut session, address.as_deref())?;
			let report = wallets.balance(&mut session, &address).await;
			if let Some(err) = &report.error {
				log::warn!(target: LOG_TARGET, "{err}");
			}
			println!("{}", balance_line(&address, report.amount, &config));
		},
		Command::Claim { receipt, address, timeout } => {
			let assessment = assess_receipt(&catalog, &receipt)?;
			print_assessment(&assessment);

			let config = NetworkConfig::default();
			let client = Arc::new(RpcNetworkClient::new(&config)?);
			let wallets = WalletManager::new(client.clone());
			let engine = SettlementEngine::new(client, config);
			let mut session = SessionState::new();

			let address = wallets.connect(&mut session, address.as_deref())?;
			log::info!(target: LOG_TARGET, "Claiming {} for {address}", assessment.quote.amount);
			engine.verify_chain().await?;

			let receipt = match timeout {
				Some(secs) =>
					engine
						.settle_with_deadline(&session, assessment.quote, Duration::from_secs(secs))
						.await?,
				None => engine.settle(&session, assessment.quote).await?,
			};
			println!("{}", claim_line(assessment.quote.amount, &receipt, engine.config()));
		},
	}
	Ok(())
}

/// Vehicle names accepted by `--vehicle`.
pub fn vehicle_names() -> Vec<&'static str> {
	VehicleType::ALL.iter().map(VehicleType::name).collect()
}
