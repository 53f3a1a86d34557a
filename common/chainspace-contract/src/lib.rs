// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! A tiny host framework for ledger-side contracts: every operation is a pair of a
//! *method*, which runs in the trusted client context and builds the transaction,
//! and a *checker*, a pure predicate anyone can re-run over the resulting transaction.

pub mod contract;
pub mod error;
pub mod transaction;

pub use contract::{Checker, Contract, Method};
pub use error::ChainspaceError;
pub use transaction::{MethodCall, MethodOutput, Transaction};
