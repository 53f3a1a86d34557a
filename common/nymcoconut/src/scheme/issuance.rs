// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::{G1Affine, G1Projective, Scalar};
use group::GroupEncoding;

use crate::elgamal::{Ciphertext, EphemeralKey, PublicKey};
use crate::error::{CoconutError, Result};
use crate::proofs::ProofCmCs;
use crate::scheme::keygen::SecretKey;
use crate::scheme::setup::Parameters;
use crate::scheme::Signature;
use crate::utils::hash_g1;
use crate::Attribute;

/// Everything produced by `prepare_mix_sign`: `(cm, c, pi_s)`.
// Lambda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixSignRequest {
    // cm
    commitment: G1Projective,
    // c
    private_attributes_ciphertexts: Vec<Ciphertext>,
    // pi_s
    pi_s: ProofCmCs,
}

impl MixSignRequest {
    pub fn commitment(&self) -> &G1Projective {
        &self.commitment
    }

    pub fn ciphertexts(&self) -> &[Ciphertext] {
        &self.private_attributes_ciphertexts
    }

    pub fn proof(&self) -> &ProofCmCs {
        &self.pi_s
    }

    pub fn into_parts(self) -> (G1Projective, Vec<Ciphertext>, ProofCmCs) {
        (
            self.commitment,
            self.private_attributes_ciphertexts,
            self.pi_s,
        )
    }
}

// Produces g1^r * h0^m0 * h1^m1 * .... * hn^mn
pub(crate) fn compute_attributes_commitment(
    params: &Parameters,
    attributes: &[Attribute],
    hs: &[G1Affine],
) -> (Scalar, G1Projective) {
    let commitment_opening = params.random_scalar();

    let attr_cm = attributes
        .iter()
        .zip(hs)
        .map(|(&m, h)| h * m)
        .sum::<G1Projective>();

    let commitment = params.gen1() * commitment_opening + attr_cm;
    (commitment_opening, commitment)
}

pub fn compute_commitment_hash(commitment: G1Projective) -> G1Projective {
    hash_g1(commitment.to_bytes())
}

pub(crate) fn compute_attribute_encryption(
    params: &Parameters,
    private_attributes: &[Attribute],
    pub_key: &PublicKey,
    commitment_hash: G1Projective,
) -> (Vec<Ciphertext>, Vec<EphemeralKey>) {
    private_attributes
        .iter()
        .map(|m| pub_key.encrypt(params, &commitment_hash, m))
        .unzip()
}

/// Builds the commitment to all attributes, the ElGamal encryption of the hidden ones under
/// `pub_key` and the proof tying them together.
///
/// The committed attribute vector is `private_attributes || public_attributes`.
pub fn prepare_mix_sign(
    params: &Parameters,
    public_attributes: &[Attribute],
    private_attributes: &[Attribute],
    pub_key: &PublicKey,
) -> Result<MixSignRequest> {
    if private_attributes.is_empty() {
        return Err(CoconutError::Issuance(
            "Tried to prepare mix sign request for an empty set of private attributes".to_string(),
        ));
    }

    let hs = params.gen_hs();
    if private_attributes.len() + public_attributes.len() > hs.len() {
        return Err(CoconutError::IssuanceMaxAttributes {
            max: hs.len(),
            requested: private_attributes.len() + public_attributes.len(),
        });
    }

    let attributes = private_attributes
        .iter()
        .chain(public_attributes.iter())
        .copied()
        .collect::<Vec<_>>();

    let (commitment_opening, commitment) = compute_attributes_commitment(params, &attributes, hs);

    // build ElGamal encryption under the commitment hash
    let commitment_hash = compute_commitment_hash(commitment);
    let (private_attributes_ciphertexts, ephemeral_keys) =
        compute_attribute_encryption(params, private_attributes, pub_key, commitment_hash);

    let pi_s = ProofCmCs::construct(
        params,
        pub_key,
        &ephemeral_keys,
        &commitment,
        &commitment_opening,
        &attributes,
    );

    Ok(MixSignRequest {
        commitment,
        private_attributes_ciphertexts,
        pi_s,
    })
}

/// Creates a Coconut Signature under a given secret key on a set of public attributes only.
pub fn sign(
    _params: &Parameters,
    secret_key: &SecretKey,
    public_attributes: &[Attribute],
) -> Result<Signature> {
    if public_attributes.len() > secret_key.ys.len() {
        return Err(CoconutError::IssuanceMaxAttributes {
            max: secret_key.ys.len(),
            requested: public_attributes.len(),
        });
    }

    // h must be identical for every authority so that the partial signatures can be aggregated,
    // hence it's derived from the signed attributes themselves
    let attributes_bytes = public_attributes
        .iter()
        .flat_map(|attr| attr.to_bytes())
        .collect::<Vec<_>>();
    let h = hash_g1(attributes_bytes);

    // x + m0 * y0 + m1 * y1 + ... mn * yn
    let exponent = secret_key.x
        + public_attributes
            .iter()
            .zip(secret_key.ys.iter())
            .map(|(m_i, y_i)| m_i * y_i)
            .sum::<Scalar>();

    let sig2 = h * exponent;
    Ok(Signature(h, sig2))
}
