// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use nym_chainspace_contract::{Contract, MethodCall};
use serde::Deserialize;
use tracing::info;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Path to the JSON file describing the method call
    #[arg(long)]
    request: PathBuf,
}

/// Content of the `--request` file.
#[derive(Deserialize, Debug)]
struct ExecuteRequest {
    operation: String,

    #[serde(flatten)]
    call: MethodCall,
}

pub(crate) fn execute(contract: &Contract, args: Args) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.request)
        .with_context(|| format!("failed to read {}", args.request.display()))?;
    let request: ExecuteRequest = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid method call", args.request.display()))?;

    let transaction = contract.execute(&request.operation, request.call)?;
    info!(
        "'{}' produced {} output(s)",
        request.operation,
        transaction.outputs.len()
    );

    println!("{}", serde_json::to_string_pretty(&transaction)?);
    Ok(())
}
