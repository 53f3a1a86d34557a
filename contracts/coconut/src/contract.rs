// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use nym_chainspace_contract::{ChainspaceError, Contract, MethodCall, MethodOutput};
use nym_coconut::{unpack_g1, unpack_scalar, Attribute, PublicKey};
use serde::{Deserialize, Serialize};

use crate::checkers::{check_create, check_init, check_request_issue};
use crate::config::ContractConfig;
use crate::error::CoconutContractError;
use crate::objects::{PackedSignature, PackedVerifier};
use crate::transactions::{create, init, request_issue};

pub const INIT: &str = "init";
pub const CREATE: &str = "create";
pub const REQUEST_ISSUE: &str = "request_issue";

/// Arguments of the `create` method, with every cryptographic value in its packed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateArgs {
    pub q: u32,
    pub t: u64,
    pub n: u64,
    pub callback: String,
    pub verifier: PackedVerifier,
    pub sig: PackedSignature,
}

/// Arguments of the `request_issue` method, with attributes as packed scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIssueArgs {
    pub q: u32,
    #[serde(default)]
    pub clear_m: Vec<String>,
    pub hidden_m: Vec<String>,
    #[serde(rename = "pub")]
    pub pub_key: String,
}

fn unpack_attributes(packed: &[String]) -> Result<Vec<Attribute>, CoconutContractError> {
    packed
        .iter()
        .map(|m| unpack_scalar(m).map_err(Into::into))
        .collect()
}

fn create_method(
    config: &ContractConfig,
    call: &MethodCall,
) -> Result<MethodOutput, CoconutContractError> {
    let args: CreateArgs = call.parameters()?;
    create(
        config,
        &call.inputs,
        args.q,
        args.t,
        args.n,
        &args.callback,
        &args.verifier.unpack()?,
        &args.sig.unpack()?,
    )
}

fn request_issue_method(
    config: &ContractConfig,
    call: &MethodCall,
) -> Result<MethodOutput, CoconutContractError> {
    let args: RequestIssueArgs = call.parameters()?;
    request_issue(
        config,
        &call.inputs,
        args.q,
        &unpack_attributes(&args.clear_m)?,
        &unpack_attributes(&args.hidden_m)?,
        &PublicKey::from(unpack_g1(&args.pub_key)?),
    )
}

/// Builds the registry of every operation exposed by the coconut contract.
pub fn coconut_contract(config: ContractConfig) -> Result<Contract, ChainspaceError> {
    let config = Arc::new(config);

    let create_config = Arc::clone(&config);
    let create_checker_config = Arc::clone(&config);
    let request_config = Arc::clone(&config);
    let request_checker_config = Arc::clone(&config);

    Contract::new(config.name.clone())
        .with_operation(INIT, |_: &MethodCall| init(), check_init)?
        .with_operation(
            CREATE,
            move |call: &MethodCall| create_method(&create_config, call),
            move |tx| check_create(&create_checker_config, tx),
        )?
        .with_operation(
            REQUEST_ISSUE,
            move |call: &MethodCall| request_issue_method(&request_config, call),
            move |tx| check_request_issue(&request_checker_config, tx),
        )
}
