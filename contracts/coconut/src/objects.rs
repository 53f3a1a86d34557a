// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Ledger objects produced and consumed by the contract, all encoded as JSON mappings
//! discriminated by their `type` field.

use nym_coconut::{
    hash_to_scalar, pack_g1, pack_g2, unpack_g1, unpack_g2, Attribute, Ciphertext, G1Projective,
    Signature, VerificationKey,
};
use serde::{Deserialize, Serialize};

use crate::config::ContractConfig;
use crate::error::CoconutContractError;

pub const TOKEN_TYPE: &str = "CoCoToken";
pub const INSTANCE_TYPE: &str = "CoCoInstance";
pub const REQUEST_TYPE: &str = "CoCoRequest";
pub const CREDENTIAL_TYPE: &str = "CoCoCredential";
pub const LIST_TYPE: &str = "CoCoList";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoCoObject {
    CoCoToken,
    CoCoInstance(CoCoInstance),
    CoCoRequest(CoCoRequest),
    CoCoCredential(CoCoCredential),
    CoCoList(CoCoList),
}

impl CoCoObject {
    pub fn type_name(&self) -> &'static str {
        match self {
            CoCoObject::CoCoToken => TOKEN_TYPE,
            CoCoObject::CoCoInstance(_) => INSTANCE_TYPE,
            CoCoObject::CoCoRequest(_) => REQUEST_TYPE,
            CoCoObject::CoCoCredential(_) => CREDENTIAL_TYPE,
            CoCoObject::CoCoList(_) => LIST_TYPE,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, CoconutContractError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn encode(&self) -> Result<String, CoconutContractError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode_token(raw: &str) -> Result<(), CoconutContractError> {
        match Self::decode(raw)? {
            CoCoObject::CoCoToken => Ok(()),
            other => Err(CoconutContractError::UnexpectedObjectType {
                expected: TOKEN_TYPE,
                actual: other.type_name(),
            }),
        }
    }

    pub fn decode_instance(raw: &str) -> Result<CoCoInstance, CoconutContractError> {
        match Self::decode(raw)? {
            CoCoObject::CoCoInstance(instance) => Ok(instance),
            other => Err(CoconutContractError::UnexpectedObjectType {
                expected: INSTANCE_TYPE,
                actual: other.type_name(),
            }),
        }
    }

    pub fn decode_request(raw: &str) -> Result<CoCoRequest, CoconutContractError> {
        match Self::decode(raw)? {
            CoCoObject::CoCoRequest(request) => Ok(request),
            other => Err(CoconutContractError::UnexpectedObjectType {
                expected: REQUEST_TYPE,
                actual: other.type_name(),
            }),
        }
    }
}

/// Threshold verification key `[g2, X, [Y_0, ..., Y_{q-1}]]` with every element base58 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedVerifier(pub String, pub String, pub Vec<String>);

impl From<&VerificationKey> for PackedVerifier {
    fn from(vk: &VerificationKey) -> Self {
        PackedVerifier(
            pack_g2(vk.gen2()),
            pack_g2(vk.alpha()),
            vk.beta().iter().map(pack_g2).collect(),
        )
    }
}

impl PackedVerifier {
    pub fn num_attributes(&self) -> usize {
        self.2.len()
    }

    pub fn unpack(&self) -> Result<VerificationKey, CoconutContractError> {
        let beta = self
            .2
            .iter()
            .map(|y| unpack_g2(y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VerificationKey::from_parts(
            unpack_g2(&self.0)?,
            unpack_g2(&self.1)?,
            beta,
        ))
    }
}

/// Aggregate signature `[h, s]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedSignature(pub String, pub String);

impl From<&Signature> for PackedSignature {
    fn from(signature: &Signature) -> Self {
        PackedSignature(pack_g1(signature.sig1()), pack_g1(signature.sig2()))
    }
}

impl PackedSignature {
    pub fn unpack(&self) -> Result<Signature, CoconutContractError> {
        Ok(Signature::from_parts(
            unpack_g1(&self.0)?,
            unpack_g1(&self.1)?,
        ))
    }

    pub fn encode(&self) -> Result<String, CoconutContractError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, CoconutContractError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// ElGamal ciphertext `[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedCiphertext(pub String, pub String);

impl From<&Ciphertext> for PackedCiphertext {
    fn from(ciphertext: &Ciphertext) -> Self {
        PackedCiphertext(pack_g1(ciphertext.c1()), pack_g1(ciphertext.c2()))
    }
}

impl PackedCiphertext {
    pub fn unpack(&self) -> Result<Ciphertext, CoconutContractError> {
        Ok(Ciphertext::from_parts(
            unpack_g1(&self.0)?,
            unpack_g1(&self.1)?,
        ))
    }
}

/// Public configuration of a credential issuing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoCoInstance {
    /// Number of attribute slots.
    pub q: u32,

    /// Number of authorities required to issue a credential.
    pub t: u64,

    /// Total number of authorities.
    pub n: u64,

    pub callback: String,

    pub verifier: PackedVerifier,
}

impl CoCoInstance {
    pub fn new(
        q: u32,
        t: u64,
        n: u64,
        callback: impl Into<String>,
        verification_key: &VerificationKey,
    ) -> Self {
        CoCoInstance {
            q,
            t,
            n,
            callback: callback.into(),
            verifier: verification_key.into(),
        }
    }

    /// Checks the field invariants of the instance against the contract configuration.
    pub fn validate(&self, config: &ContractConfig) -> Result<(), CoconutContractError> {
        if self.q < 1 {
            return Err(CoconutContractError::PolicyViolation(
                "an instance needs at least one attribute slot".to_string(),
            ));
        }
        if self.n < 1 {
            return Err(CoconutContractError::PolicyViolation(
                "an instance needs at least one authority".to_string(),
            ));
        }
        if self.t < 1 || self.t > self.n {
            return Err(CoconutContractError::PolicyViolation(format!(
                "threshold {} is not within [1, {}]",
                self.t, self.n
            )));
        }
        config.ensure_attribute_bound(self.q)?;

        if self.verifier.num_attributes() != self.q as usize {
            return Err(CoconutContractError::PolicyViolation(format!(
                "verification key supports {} attributes, but the instance declares {}",
                self.verifier.num_attributes(),
                self.q
            )));
        }

        Ok(())
    }

    /// The canonical serialization of the instance, as stored on the ledger.
    pub fn encode(&self) -> Result<String, CoconutContractError> {
        CoCoObject::CoCoInstance(self.clone()).encode()
    }

    /// The message the authorities must jointly sign for the instance to be accepted.
    pub fn signing_message(&self) -> Result<Attribute, CoconutContractError> {
        Ok(instance_message(&self.encode()?))
    }
}

/// Maps a serialized instance onto the scalar its signature is verified against.
pub fn instance_message(serialized_instance: &str) -> Attribute {
    hash_to_scalar(serialized_instance.as_bytes())
}

/// Blinded issuance request: a commitment to all attributes and the encryptions of the hidden ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoCoRequest {
    pub cm: String,
    pub c: Vec<PackedCiphertext>,
}

impl CoCoRequest {
    pub fn new(commitment: &G1Projective, ciphertexts: &[Ciphertext]) -> Self {
        CoCoRequest {
            cm: pack_g1(commitment),
            c: ciphertexts.iter().map(Into::into).collect(),
        }
    }

    pub fn encode(&self) -> Result<String, CoconutContractError> {
        CoCoObject::CoCoRequest(self.clone()).encode()
    }

    pub fn commitment(&self) -> Result<G1Projective, CoconutContractError> {
        Ok(unpack_g1(&self.cm)?)
    }

    pub fn ciphertexts(&self) -> Result<Vec<Ciphertext>, CoconutContractError> {
        self.c.iter().map(PackedCiphertext::unpack).collect()
    }
}

/// Issued credential; only decoded, never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoCoCredential {
    pub sigs: Vec<PackedSignature>,
}

/// List of spent credentials; only decoded, never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoCoList {
    pub list: Vec<String>,
}
