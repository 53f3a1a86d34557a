// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Checkers of the contract: deterministic predicates over submitted transactions.
//! They never trust the submitter and never panic on malformed input.

use nym_chainspace_contract::Transaction;
use nym_coconut::{mix_verify, setup, unpack_g1, verify_mix_sign, Base58, ProofCmCs, PublicKey};
use tracing::{debug, trace};

use crate::config::ContractConfig;
use crate::error::CoconutContractError;
use crate::objects::{instance_message, CoCoObject, PackedSignature};
use crate::transactions::ensure_arity;

/// Collapses the outcome of a check into the verdict reported to the ledger.
fn verdict(operation: &str, result: Result<(), CoconutContractError>) -> bool {
    match result {
        Ok(()) => {
            trace!("accepted '{operation}' transaction");
            true
        }
        Err(err) => {
            debug!("rejected '{operation}' transaction: {err}");
            false
        }
    }
}

struct Shape {
    inputs: usize,
    reference_inputs: usize,
    outputs: usize,
    returns: usize,
    parameters: usize,
}

fn ensure_shape(transaction: &Transaction, shape: Shape) -> Result<(), CoconutContractError> {
    ensure_arity("inputs", shape.inputs, transaction.inputs.len())?;
    ensure_arity(
        "reference inputs",
        shape.reference_inputs,
        transaction.reference_inputs.len(),
    )?;
    ensure_arity("outputs", shape.outputs, transaction.outputs.len())?;
    ensure_arity("returns", shape.returns, transaction.returns.len())?;
    ensure_arity("parameters", shape.parameters, transaction.parameters.len())
}

pub fn check_init(transaction: &Transaction) -> bool {
    verdict("init", try_check_init(transaction))
}

fn try_check_init(transaction: &Transaction) -> Result<(), CoconutContractError> {
    ensure_shape(
        transaction,
        Shape {
            inputs: 0,
            reference_inputs: 0,
            outputs: 1,
            returns: 0,
            parameters: 0,
        },
    )?;
    CoCoObject::decode_token(&transaction.outputs[0])
}

pub fn check_create(config: &ContractConfig, transaction: &Transaction) -> bool {
    verdict("create", try_check_create(config, transaction))
}

fn try_check_create(
    config: &ContractConfig,
    transaction: &Transaction,
) -> Result<(), CoconutContractError> {
    ensure_shape(
        transaction,
        Shape {
            inputs: 1,
            reference_inputs: 0,
            outputs: 2,
            returns: 0,
            parameters: 1,
        },
    )?;

    if transaction.outputs[0] != transaction.inputs[0] {
        return Err(CoconutContractError::EchoViolation);
    }

    let raw_instance = &transaction.outputs[1];
    let instance = CoCoObject::decode_instance(raw_instance)?;
    instance.validate(config)?;

    let verification_key = instance.verifier.unpack()?;
    let signature = PackedSignature::decode(&transaction.parameters[0])?.unpack()?;
    let params = setup(instance.q)?;

    // the instance is signed exactly as it was serialized on the ledger
    let message = instance_message(raw_instance);

    if !mix_verify(&params, &verification_key, &signature, &[message]) {
        return Err(CoconutContractError::InvalidSignature);
    }

    Ok(())
}

pub fn check_request_issue(config: &ContractConfig, transaction: &Transaction) -> bool {
    verdict("request_issue", try_check_request_issue(config, transaction))
}

fn try_check_request_issue(
    config: &ContractConfig,
    transaction: &Transaction,
) -> Result<(), CoconutContractError> {
    ensure_shape(
        transaction,
        Shape {
            inputs: 1,
            reference_inputs: 0,
            outputs: 2,
            returns: 0,
            parameters: 2,
        },
    )?;

    let request = CoCoObject::decode_request(&transaction.outputs[1])?;

    let instance = CoCoObject::decode_instance(&transaction.outputs[0])?;
    if transaction.outputs[0] != transaction.inputs[0] {
        return Err(CoconutContractError::EchoViolation);
    }
    config.ensure_attribute_bound(instance.q)?;
    let params = setup(instance.q)?;

    let commitment = request.commitment()?;
    let ciphertexts = request.ciphertexts()?;
    let proof = ProofCmCs::try_from_bs58(&transaction.parameters[0])?;
    let pub_key = PublicKey::from(unpack_g1(&transaction.parameters[1])?);

    if !verify_mix_sign(&params, &pub_key, &ciphertexts, &commitment, &proof) {
        return Err(CoconutContractError::InvalidProof);
    }

    // TODO: authorize the `callback` dependency of the instance once issuance is implemented
    Ok(())
}
