// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use nym_chainspace_contract::{Contract, Transaction};
use tracing::{info, warn};

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Path to the JSON file containing the transaction to check
    #[arg(long)]
    transaction: PathBuf,
}

pub(crate) fn execute(contract: &Contract, args: Args) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.transaction)
        .with_context(|| format!("failed to read {}", args.transaction.display()))?;
    let transaction: Transaction = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid transaction", args.transaction.display()))?;

    if !contract.check(&transaction) {
        warn!("'{}' transaction got rejected", transaction.operation);
        bail!("transaction rejected");
    }

    info!("'{}' transaction is valid", transaction.operation);
    println!("accepted");
    Ok(())
}
