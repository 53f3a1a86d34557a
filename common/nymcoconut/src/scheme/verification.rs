// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::{G1Projective, G2Prepared, G2Projective};
use group::Curve;

use crate::elgamal::{Ciphertext, PublicKey};
use crate::proofs::ProofCmCs;
use crate::scheme::keygen::VerificationKey;
use crate::scheme::setup::Parameters;
use crate::scheme::Signature;
use crate::utils::check_bilinear_pairing;
use crate::Attribute;

/// Verifies a (possibly aggregated) signature `(h, s)` on the provided public attributes,
/// i.e. checks whether `e(h, X + m0 * Y0 + ... + mn * Yn) == e(s, g2)`.
///
/// The check is performed against the generator embedded in the verification key.
/// Signatures with `h` at infinity, keys with an identity generator, and attribute
/// lists longer than the key are all rejected.
pub fn mix_verify(
    params: &Parameters,
    verification_key: &VerificationKey,
    signature: &Signature,
    public_attributes: &[Attribute],
) -> bool {
    if public_attributes.len() > verification_key.beta.len()
        || public_attributes.len() > params.gen_hs().len()
    {
        return false;
    }

    if bool::from(signature.0.is_identity()) || bool::from(verification_key.gen2.is_identity()) {
        return false;
    }

    let kappa = verification_key.alpha
        + public_attributes
            .iter()
            .zip(verification_key.beta.iter())
            .map(|(m_i, b_i)| b_i * m_i)
            .sum::<G2Projective>();

    check_bilinear_pairing(
        &signature.0.to_affine(),
        &G2Prepared::from(kappa.to_affine()),
        &signature.1.to_affine(),
        &G2Prepared::from(verification_key.gen2.to_affine()),
    )
}

/// Verifies the proof that the ElGamal ciphertexts encrypt, under `pub_key`, the hidden
/// attributes committed to in `commitment`.
pub fn verify_mix_sign(
    params: &Parameters,
    pub_key: &PublicKey,
    ciphertexts: &[Ciphertext],
    commitment: &G1Projective,
    proof: &ProofCmCs,
) -> bool {
    if ciphertexts.is_empty() || ciphertexts.len() > params.gen_hs().len() {
        return false;
    }

    if proof.num_attributes() > params.gen_hs().len() {
        return false;
    }

    proof.verify(params, pub_key, commitment, ciphertexts)
}
