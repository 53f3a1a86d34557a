// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Methods of the contract. They run in the (trusted) client context and fail loudly
//! on malformed arguments instead of producing transactions that would be rejected.

use nym_chainspace_contract::MethodOutput;
use nym_coconut::{
    pack_g1, prepare_mix_sign, setup, Attribute, Base58, PublicKey, Signature, VerificationKey,
};
use tracing::debug;

use crate::config::ContractConfig;
use crate::error::CoconutContractError;
use crate::objects::{CoCoInstance, CoCoObject, CoCoRequest, PackedSignature};

pub(crate) fn ensure_arity(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), CoconutContractError> {
    if expected != actual {
        return Err(CoconutContractError::InvalidArity {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Produces the `CoCoToken` consumed by [`create`].
pub fn init() -> Result<MethodOutput, CoconutContractError> {
    Ok(MethodOutput {
        outputs: vec![CoCoObject::CoCoToken.encode()?],
        extra_parameters: Vec::new(),
        returns: Vec::new(),
    })
}

/// Consumes the token and creates a new credential issuing instance.
///
/// `signature` must be the aggregate signature on [`CoCoInstance::signing_message`]
/// of the very instance described by the remaining arguments.
#[allow(clippy::too_many_arguments)]
pub fn create(
    config: &ContractConfig,
    inputs: &[String],
    q: u32,
    t: u64,
    n: u64,
    callback: &str,
    verification_key: &VerificationKey,
    signature: &Signature,
) -> Result<MethodOutput, CoconutContractError> {
    ensure_arity("inputs", 1, inputs.len())?;
    let token = &inputs[0];
    CoCoObject::decode_token(token)?;

    let instance = CoCoInstance::new(q, t, n, callback, verification_key);
    instance.validate(config)?;

    debug!("creating instance with q = {q}, t = {t}, n = {n}");

    Ok(MethodOutput {
        outputs: vec![token.clone(), instance.encode()?],
        extra_parameters: vec![PackedSignature::from(signature).encode()?],
        returns: Vec::new(),
    })
}

/// Builds a blinded issuance request against the provided instance.
pub fn request_issue(
    config: &ContractConfig,
    inputs: &[String],
    q: u32,
    public_attributes: &[Attribute],
    private_attributes: &[Attribute],
    pub_key: &PublicKey,
) -> Result<MethodOutput, CoconutContractError> {
    ensure_arity("inputs", 1, inputs.len())?;
    let raw_instance = &inputs[0];
    let instance = CoCoObject::decode_instance(raw_instance)?;

    if instance.q != q {
        return Err(CoconutContractError::AttributeCountMismatch {
            instance: instance.q,
            requested: q,
        });
    }
    config.ensure_attribute_bound(q)?;

    if private_attributes.is_empty() {
        return Err(CoconutContractError::NoHiddenAttributes);
    }
    let requested = public_attributes.len() + private_attributes.len();
    if requested > q as usize {
        return Err(CoconutContractError::TooManyAttributes {
            max: q as u64,
            requested: requested as u64,
        });
    }

    let params = setup(q)?;
    let mix_sign_request = prepare_mix_sign(&params, public_attributes, private_attributes, pub_key)?;

    debug!(
        "prepared issuance request for {} clear and {} hidden attributes",
        public_attributes.len(),
        private_attributes.len()
    );

    let request = CoCoRequest::new(mix_sign_request.commitment(), mix_sign_request.ciphertexts());

    Ok(MethodOutput {
        outputs: vec![raw_instance.clone(), request.encode()?],
        extra_parameters: vec![
            mix_sign_request.proof().to_bs58(),
            pack_g1(pub_key.inner()),
        ],
        returns: Vec::new(),
    })
}
