// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::G1Projective;
use group::Curve;

use crate::error::{CoconutError, Result};
use crate::traits::{Base58, Bytable};
use crate::utils::{fixed_bytes, try_deserialize_g1_projective};

pub mod aggregation;
pub mod issuance;
pub mod keygen;
pub mod setup;
pub mod verification;

pub type SignerIndex = u64;

/// Coconut signature `(h, s)`, either a partial one produced by a single authority
/// or the aggregate of at least `t` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub(crate) G1Projective, pub(crate) G1Projective);

pub type PartialSignature = Signature;

impl Signature {
    pub fn sig1(&self) -> &G1Projective {
        &self.0
    }

    pub fn sig2(&self) -> &G1Projective {
        &self.1
    }

    pub fn from_parts(h: G1Projective, s: G1Projective) -> Self {
        Signature(h, s)
    }

    pub fn to_bytes(&self) -> [u8; 96] {
        let mut bytes = [0u8; 96];
        bytes[..48].copy_from_slice(&self.0.to_affine().to_compressed());
        bytes[48..].copy_from_slice(&self.1.to_affine().to_compressed());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Signature> {
        if bytes.len() != 96 {
            return Err(CoconutError::Deserialization(format!(
                "Signature must be exactly 96 bytes, got {}",
                bytes.len()
            )));
        }

        let sig1 = try_deserialize_g1_projective(
            &fixed_bytes(&bytes[..48])?,
            CoconutError::Deserialization("Failed to deserialize compressed sig1".to_string()),
        )?;
        let sig2 = try_deserialize_g1_projective(
            &fixed_bytes(&bytes[48..])?,
            CoconutError::Deserialization("Failed to deserialize compressed sig2".to_string()),
        )?;

        Ok(Signature(sig1, sig2))
    }
}

impl Bytable for Signature {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        Signature::from_bytes(slice)
    }
}

impl Base58 for Signature {}

pub struct SignatureShare {
    signature: Signature,
    index: SignerIndex,
}

impl SignatureShare {
    pub fn new(signature: Signature, index: SignerIndex) -> Self {
        SignatureShare { signature, index }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn index(&self) -> SignerIndex {
        self.index
    }
}
