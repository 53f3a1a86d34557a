// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nym_chainspace_contract::Contract;
use nym_coconut_contract::{coconut_contract, ContractConfig};
use tracing::info;

mod check;
mod execute;
mod operations;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to the TOML configuration of the contract. Defaults are used if not provided.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the operations exposed by the contract
    Operations,

    /// Run a contract method and print the resulting transaction
    Execute(execute::Args),

    /// Run the checker of a transaction. Exits with a non-zero status if it gets rejected
    Check(check::Args),
}

impl Cli {
    fn load_contract(&self) -> anyhow::Result<Contract> {
        let config = match &self.config {
            Some(path) => ContractConfig::read_from_toml_file(path)?,
            None => ContractConfig::default(),
        };
        info!(
            "using contract '{}' with at most {} attributes",
            config.name, config.max_attributes
        );

        Ok(coconut_contract(config)?)
    }

    pub(crate) fn execute(self) -> anyhow::Result<()> {
        let contract = self.load_contract()?;

        match self.command {
            Commands::Operations => operations::execute(&contract),
            Commands::Execute(args) => execute::execute(&contract, args),
            Commands::Check(args) => check::execute(&contract, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
