// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Borrow;

use bls12_381::{G1Projective, Scalar};
use digest::generic_array::typenum::Unsigned;
use digest::Digest;
use group::GroupEncoding;
use itertools::izip;
use sha2::Sha256;

use crate::elgamal::{Ciphertext, EphemeralKey, PublicKey};
use crate::error::{CoconutError, Result};
use crate::scheme::setup::Parameters;
use crate::traits::{Base58, Bytable};
use crate::utils::{
    fixed_bytes, hash_g1, read_u64_le, try_deserialize_scalar, try_deserialize_scalar_vec,
};
use crate::Attribute;

type ChallengeDigest = Sha256;

/// Generates a Scalar [or Fp] challenge by hashing a number of elliptic curve points.
fn compute_challenge<D, I, B>(iter: I) -> Scalar
where
    D: Digest,
    I: Iterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut h = D::new();
    for point_representation in iter {
        h.update(point_representation);
    }
    let digest = h.finalize();

    // the digest is zero-padded up to the 64 bytes expected by the wide reduction
    let mut bytes = [0u8; 64];
    let pad_size = 64usize
        .checked_sub(D::OutputSize::to_usize())
        .unwrap_or_default();

    bytes[pad_size..].copy_from_slice(&digest);

    Scalar::from_bytes_wide(&bytes)
}

fn produce_response(witness: &Scalar, challenge: &Scalar, secret: &Scalar) -> Scalar {
    witness - challenge * secret
}

// note: it's caller's responsibility to ensure witnesses.len() = secrets.len()
fn produce_responses<S>(witnesses: &[Scalar], challenge: &Scalar, secrets: &[S]) -> Vec<Scalar>
where
    S: Borrow<Scalar>,
{
    debug_assert_eq!(witnesses.len(), secrets.len());

    witnesses
        .iter()
        .zip(secrets.iter())
        .map(|(w, x)| produce_response(w, challenge, x.borrow()))
        .collect()
}

/// Non-interactive proof that the ElGamal ciphertexts `c` encrypt, under the given public key,
/// the same hidden attributes that were committed to in `cm`.
// pi_s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofCmCs {
    challenge: Scalar,
    // rr
    response_opening: Scalar,
    // rk
    response_keys: Vec<Scalar>,
    // rm
    response_attributes: Vec<Scalar>,
}

/// Builds the Fiat-Shamir challenge shared by the prover and the verifier.
fn proof_cm_cs_challenge(
    params: &Parameters,
    pub_key: &PublicKey,
    commitment: &G1Projective,
    commitment_hash: &G1Projective,
    commitment_attributes: &G1Projective,
    commitment_keys1: &[G1Projective],
    commitment_keys2: &[G1Projective],
) -> Scalar {
    let g1_bytes = params.gen1().to_compressed();
    let g2_bytes = params.gen2().to_compressed();
    let hs_bytes = params.gen_hs_bytes();
    let pub_key_bytes = pub_key.to_bytes();
    let single_elements = [commitment, commitment_hash, commitment_attributes]
        .map(|element| element.to_bytes());
    let keys1_bytes = commitment_keys1
        .iter()
        .map(|aw| aw.to_bytes())
        .collect::<Vec<_>>();
    let keys2_bytes = commitment_keys2
        .iter()
        .map(|bw| bw.to_bytes())
        .collect::<Vec<_>>();

    compute_challenge::<ChallengeDigest, _, _>(
        std::iter::once(g1_bytes.as_slice())
            .chain(std::iter::once(g2_bytes.as_slice()))
            .chain(hs_bytes.iter().map(|hs| hs.as_slice()))
            .chain(std::iter::once(pub_key_bytes.as_slice()))
            .chain(single_elements.iter().map(|el| el.as_ref()))
            .chain(keys1_bytes.iter().map(|aw| aw.as_ref()))
            .chain(keys2_bytes.iter().map(|bw| bw.as_ref())),
    )
}

impl ProofCmCs {
    /// Construct non-interactive zero-knowledge proof of correctness of the ciphertexts and the commitment.
    ///
    /// `attributes` are all the attributes committed to in `commitment`, with the hidden ones first,
    /// i.e. `attributes[i]` is the plaintext of `ciphertexts[i]` for every `i < ephemeral_keys.len()`.
    pub(crate) fn construct(
        params: &Parameters,
        pub_key: &PublicKey,
        ephemeral_keys: &[EphemeralKey],
        commitment: &G1Projective,
        commitment_opening: &Scalar,
        attributes: &[Attribute],
    ) -> Self {
        // note: this is only called from `prepare_mix_sign` that already checks
        // whether private attributes are non-empty and whether we don't have too many
        // attributes in total to sign.

        // witness creation
        let witness_commitment_opening = params.random_scalar();
        let witness_keys = params.n_random_scalars(ephemeral_keys.len());
        let witness_attributes = params.n_random_scalars(attributes.len());

        // recompute h
        let h = hash_g1(commitment.to_bytes());
        let g1 = params.gen1();

        // Aw[i] = (wk[i] * g1)
        let commitment_keys1 = witness_keys.iter().map(|wk_i| g1 * wk_i).collect::<Vec<_>>();

        // Bw[i] = (wm[i] * h) + (wk[i] * gamma)
        let commitment_keys2 = witness_keys
            .iter()
            .zip(witness_attributes.iter())
            .map(|(wk_i, wm_i)| pub_key.inner() * wk_i + h * wm_i)
            .collect::<Vec<_>>();

        // Cw = (wr * g1) + (wm[0] * hs[0]) + ... + (wm[i] * hs[i])
        let commitment_attributes = g1 * witness_commitment_opening
            + witness_attributes
                .iter()
                .zip(params.gen_hs().iter())
                .map(|(wm_i, hs_i)| hs_i * wm_i)
                .sum::<G1Projective>();

        let challenge = proof_cm_cs_challenge(
            params,
            pub_key,
            commitment,
            &h,
            &commitment_attributes,
            &commitment_keys1,
            &commitment_keys2,
        );

        // Responses
        let response_opening =
            produce_response(&witness_commitment_opening, &challenge, commitment_opening);
        let response_keys = produce_responses(&witness_keys, &challenge, ephemeral_keys);
        let response_attributes = produce_responses(&witness_attributes, &challenge, attributes);

        ProofCmCs {
            challenge,
            response_opening,
            response_keys,
            response_attributes,
        }
    }

    pub(crate) fn verify(
        &self,
        params: &Parameters,
        pub_key: &PublicKey,
        commitment: &G1Projective,
        attributes_ciphertexts: &[Ciphertext],
    ) -> bool {
        // every ciphertext needs its own key response and its own attribute response,
        // and there can't be more attributes than the parameters were set up for
        if self.response_keys.len() != attributes_ciphertexts.len()
            || self.response_attributes.len() < attributes_ciphertexts.len()
            || self.response_attributes.len() > params.gen_hs().len()
        {
            return false;
        }

        // recompute h
        let h = hash_g1(commitment.to_bytes());
        let g1 = params.gen1();

        // Aw[i] = (c * c1[i]) + (rk[i] * g1)
        let commitment_keys1 = attributes_ciphertexts
            .iter()
            .map(|ciphertext| ciphertext.c1())
            .zip(self.response_keys.iter())
            .map(|(c1, res_attr)| c1 * self.challenge + g1 * res_attr)
            .collect::<Vec<_>>();

        // Bw[i] = (c * c2[i]) + (rk[i] * gamma) + (rm[i] * h)
        let commitment_keys2 = izip!(
            attributes_ciphertexts
                .iter()
                .map(|ciphertext| ciphertext.c2()),
            self.response_keys.iter(),
            self.response_attributes.iter()
        )
        .map(|(c2, res_key, res_attr)| {
            c2 * self.challenge + pub_key.inner() * res_key + h * res_attr
        })
        .collect::<Vec<_>>();

        // Cw = (cm * c) + (rr * g1) + (rm[0] * hs[0]) + ... + (rm[n] * hs[n])
        let commitment_attributes = commitment * self.challenge
            + g1 * self.response_opening
            + self
                .response_attributes
                .iter()
                .zip(params.gen_hs().iter())
                .map(|(res_attr, hs)| hs * res_attr)
                .sum::<G1Projective>();

        let challenge = proof_cm_cs_challenge(
            params,
            pub_key,
            commitment,
            &h,
            &commitment_attributes,
            &commitment_keys1,
            &commitment_keys2,
        );

        challenge == self.challenge
    }

    pub(crate) fn num_attributes(&self) -> usize {
        self.response_attributes.len()
    }

    // challenge || rr || rk.len() || rk || rm.len() || rm
    pub fn to_bytes(&self) -> Vec<u8> {
        let keys_len = self.response_keys.len() as u64;
        let attributes_len = self.response_attributes.len() as u64;

        let mut bytes = Vec::with_capacity(
            32 + 32 + 8 + keys_len as usize * 32 + 8 + attributes_len as usize * 32,
        );

        bytes.extend_from_slice(&self.challenge.to_bytes());
        bytes.extend_from_slice(&self.response_opening.to_bytes());

        bytes.extend_from_slice(&keys_len.to_le_bytes());
        for rk in &self.response_keys {
            bytes.extend_from_slice(&rk.to_bytes());
        }

        bytes.extend_from_slice(&attributes_len.to_le_bytes());
        for rm in &self.response_attributes {
            bytes.extend_from_slice(&rm.to_bytes());
        }

        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        // at the very minimum there must be a single attribute being proven
        if bytes.len() < 32 * 4 + 16 || (bytes.len() - 16) % 32 != 0 {
            return Err(CoconutError::DeserializationInvalidLength {
                actual: bytes.len(),
                modulus_target: bytes.len().saturating_sub(16),
                target: 32 * 4 + 16,
                modulus: 32,
                object: "proof of commitment and ciphertexts".to_string(),
            });
        }

        let challenge = try_deserialize_scalar(
            &fixed_bytes(&bytes[..32])?,
            CoconutError::Deserialization("Failed to deserialize challenge".to_string()),
        )?;

        let response_opening = try_deserialize_scalar(
            &fixed_bytes(&bytes[32..64])?,
            CoconutError::Deserialization(
                "Failed to deserialize the response to the random".to_string(),
            ),
        )?;

        let keys_len = read_u64_le(bytes, 64)?;
        let keys_end = (keys_len as usize)
            .checked_mul(32)
            .and_then(|len| len.checked_add(72))
            .filter(|&end| end <= bytes.len())
            .ok_or(CoconutError::DeserializationMinLength {
                min: 72usize.saturating_add((keys_len as usize).saturating_mul(32)),
                actual: bytes.len(),
            })?;

        let response_keys = try_deserialize_scalar_vec(
            keys_len,
            &bytes[72..keys_end],
            CoconutError::Deserialization("Failed to deserialize keys response".to_string()),
        )?;

        let attributes_len = read_u64_le(bytes, keys_end)?;
        let response_attributes = try_deserialize_scalar_vec(
            attributes_len,
            &bytes[keys_end + 8..],
            CoconutError::Deserialization("Failed to deserialize attributes response".to_string()),
        )?;

        Ok(ProofCmCs {
            challenge,
            response_opening,
            response_keys,
            response_attributes,
        })
    }
}

impl Bytable for ProofCmCs {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        ProofCmCs::from_bytes(slice)
    }
}

impl Base58 for ProofCmCs {}
