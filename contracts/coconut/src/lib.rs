// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Ledger-side Coconut credential contract.
//!
//! `init` mints the token that `create` consumes to publish a credential issuing instance
//! (its policy and threshold verification key, signed by the authorities). `request_issue`
//! then publishes blinded issuance requests against that instance.

#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]

pub mod checkers;
pub mod config;
pub mod contract;
pub mod error;
pub mod objects;
pub mod transactions;

pub use config::ContractConfig;
pub use contract::coconut_contract;
pub use error::CoconutContractError;
pub use objects::{CoCoInstance, CoCoObject, CoCoRequest};
