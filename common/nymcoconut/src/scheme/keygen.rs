// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use core::borrow::Borrow;
use core::iter::Sum;
use core::ops::{Add, Mul};

use bls12_381::{G2Projective, Scalar};
use group::Curve;

use crate::error::{CoconutError, Result};
use crate::scheme::setup::Parameters;
use crate::scheme::SignerIndex;
use crate::traits::{Base58, Bytable};
use crate::utils::{fixed_bytes, read_u64_le, try_deserialize_g2_projective, Polynomial};

pub struct SecretKey {
    pub(crate) x: Scalar,
    pub(crate) ys: Vec<Scalar>,
}

impl SecretKey {
    /// Following a (distributed) key generation process, scalar values can be obtained
    /// outside of the normal key generation process.
    pub fn create_from_raw(x: Scalar, ys: Vec<Scalar>) -> Self {
        Self { x, ys }
    }

    /// Derive verification key using this secret key.
    pub fn verification_key(&self, params: &Parameters) -> VerificationKey {
        let g2 = params.gen2();
        VerificationKey {
            gen2: G2Projective::from(g2),
            alpha: g2 * self.x,
            beta: self.ys.iter().map(|y| g2 * y).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.ys.len()
    }
}

/// Threshold verification key `(g2, X, [Y_0, ..., Y_{q-1}])`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VerificationKey {
    // g2
    pub(crate) gen2: G2Projective,
    // X
    pub(crate) alpha: G2Projective,
    // Y
    pub(crate) beta: Vec<G2Projective>,
}

impl<'b> Add<&'b VerificationKey> for VerificationKey {
    type Output = VerificationKey;

    #[inline]
    fn add(self, rhs: &'b VerificationKey) -> VerificationKey {
        // If you're trying to add two keys together that were created
        // for different number of attributes, just panic as it's a
        // nonsense operation.
        assert_eq!(
            self.beta.len(),
            rhs.beta.len(),
            "trying to add verification keys generated for different number of attributes"
        );

        VerificationKey {
            gen2: self.gen2,
            alpha: self.alpha + rhs.alpha,
            beta: self
                .beta
                .iter()
                .zip(rhs.beta.iter())
                .map(|(self_beta, rhs_beta)| self_beta + rhs_beta)
                .collect(),
        }
    }
}

impl<'a> Mul<Scalar> for &'a VerificationKey {
    type Output = VerificationKey;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self::Output {
        VerificationKey {
            gen2: self.gen2,
            alpha: self.alpha * rhs,
            beta: self.beta.iter().map(|b_i| b_i * rhs).collect(),
        }
    }
}

impl<T> Sum<T> for VerificationKey
where
    T: Borrow<VerificationKey>,
{
    #[inline]
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        let mut peekable = iter.peekable();
        let head_attributes = match peekable.peek() {
            Some(head) => head.borrow().beta.len(),
            // an empty sum has no meaningful attribute count
            None => return VerificationKey::identity(0),
        };

        peekable.fold(VerificationKey::identity(head_attributes), |acc, item| {
            acc + item.borrow()
        })
    }
}

impl VerificationKey {
    /// Create a (kinda) identity verification key using specified
    /// number of 'beta' elements
    pub(crate) fn identity(beta_size: usize) -> Self {
        VerificationKey {
            gen2: G2Projective::generator(),
            alpha: G2Projective::identity(),
            beta: vec![G2Projective::identity(); beta_size],
        }
    }

    pub fn from_parts(gen2: G2Projective, alpha: G2Projective, beta: Vec<G2Projective>) -> Self {
        VerificationKey { gen2, alpha, beta }
    }

    pub fn gen2(&self) -> &G2Projective {
        &self.gen2
    }

    pub fn alpha(&self) -> &G2Projective {
        &self.alpha
    }

    pub fn beta(&self) -> &[G2Projective] {
        &self.beta
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let beta_len = self.beta.len() as u64;
        let mut bytes = Vec::with_capacity(96 + 96 + 8 + beta_len as usize * 96);

        bytes.extend_from_slice(&self.gen2.to_affine().to_compressed());
        bytes.extend_from_slice(&self.alpha.to_affine().to_compressed());
        bytes.extend_from_slice(&beta_len.to_le_bytes());
        for beta in &self.beta {
            bytes.extend_from_slice(&beta.to_affine().to_compressed());
        }

        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<VerificationKey> {
        // gen2, alpha, beta length and at least one beta
        if bytes.len() < 96 * 3 + 8 || (bytes.len() - 8) % 96 != 0 {
            return Err(CoconutError::DeserializationInvalidLength {
                actual: bytes.len(),
                target: 96 * 3 + 8,
                modulus_target: bytes.len().saturating_sub(8),
                modulus: 96,
                object: "verification key".to_string(),
            });
        }

        let gen2 = try_deserialize_g2_projective(
            &fixed_bytes(&bytes[..96])?,
            CoconutError::Deserialization("Failed to deserialize verification key G2 generator".to_string()),
        )?;
        let alpha = try_deserialize_g2_projective(
            &fixed_bytes(&bytes[96..192])?,
            CoconutError::Deserialization("Failed to deserialize verification key alpha".to_string()),
        )?;

        let beta_len = read_u64_le(bytes, 192)?;
        let actual_beta_len = (bytes.len() - 200) / 96;
        if beta_len as usize != actual_beta_len {
            return Err(CoconutError::Deserialization(format!(
                "Tried to deserialize verification key with inconsistent beta len (expected {beta_len}, got {actual_beta_len})",
            )));
        }

        let beta = bytes[200..]
            .chunks_exact(96)
            .map(|chunk| {
                try_deserialize_g2_projective(
                    &fixed_bytes(chunk)?,
                    CoconutError::Deserialization(
                        "Failed to deserialize verification key beta".to_string(),
                    ),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VerificationKey { gen2, alpha, beta })
    }
}

impl Bytable for VerificationKey {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        VerificationKey::from_bytes(slice)
    }
}

impl Base58 for VerificationKey {}

pub struct KeyPair {
    secret_key: SecretKey,
    verification_key: VerificationKey,

    /// Optional index value specifying polynomial point used during threshold key generation.
    pub index: Option<SignerIndex>,
}

impl KeyPair {
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.verification_key
    }
}

/// Generates a single Coconut keypair ((x, y0, y1...), (g2, g2^x, g2^y0, ...)).
/// It is not suitable for threshold credentials as all generated keys
/// are independent of each other.
pub fn keygen(params: &Parameters) -> KeyPair {
    let attributes = params.gen_hs().len();

    let x = params.random_scalar();
    let ys = params.n_random_scalars(attributes);

    let secret_key = SecretKey { x, ys };
    let verification_key = secret_key.verification_key(params);

    KeyPair {
        secret_key,
        verification_key,
        index: None,
    }
}

/// Generates a set of `num_authorities` Coconut keypairs
/// [((x, y0, y1...), (g2, g2^x, g2^y0, ...)), ...],
/// such that they support threshold aggregation of `threshold` parties.
/// It is expected that this procedure is executed by a Trusted Third Party.
pub fn ttp_keygen(
    params: &Parameters,
    threshold: u64,
    num_authorities: u64,
) -> Result<Vec<KeyPair>> {
    if threshold == 0 {
        return Err(CoconutError::Keygen(
            "tried to generate threshold keys with a 0 threshold value".to_string(),
        ));
    }

    if threshold > num_authorities {
        return Err(CoconutError::Keygen(
            "tried to generate threshold keys for threshold value being higher than number of the signing authorities".to_string(),
        ));
    }

    let attributes = params.gen_hs().len();

    // generate polynomials
    let v = Polynomial::new_random(params, threshold - 1);
    let ws = (0..attributes)
        .map(|_| Polynomial::new_random(params, threshold - 1))
        .collect::<Vec<_>>();

    // authorities are identified by the increasing (1,2,3,...) sequence
    let polynomial_indices = (1..=num_authorities).collect::<Vec<_>>();

    // generate polynomial shares
    let x = polynomial_indices
        .iter()
        .map(|&id| v.evaluate(&Scalar::from(id)));
    let ys = polynomial_indices.iter().map(|&id| {
        ws.iter()
            .map(|w| w.evaluate(&Scalar::from(id)))
            .collect::<Vec<_>>()
    });

    // finally set the keys
    let secret_keys = x.zip(ys).map(|(x, ys)| SecretKey { x, ys });

    let keypairs = secret_keys
        .zip(polynomial_indices.iter())
        .map(|(secret_key, index)| {
            let verification_key = secret_key.verification_key(params);
            KeyPair {
                secret_key,
                verification_key,
                index: Some(*index),
            }
        })
        .collect();

    Ok(keypairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::setup::setup;

    #[test]
    fn keygen_matches_attribute_slots() {
        let params = setup(3).unwrap();
        let keypair = keygen(&params);

        assert_eq!(3, keypair.secret_key().size());
        assert_eq!(3, keypair.verification_key().beta().len());
        assert!(keypair.index.is_none());
    }

    #[test]
    fn ttp_keygen_checks_threshold() {
        let params = setup(1).unwrap();

        assert!(ttp_keygen(&params, 0, 3).is_err());
        assert!(ttp_keygen(&params, 4, 3).is_err());

        let keys = ttp_keygen(&params, 2, 3).unwrap();
        assert_eq!(3, keys.len());
        assert_eq!(
            vec![Some(1), Some(2), Some(3)],
            keys.iter().map(|k| k.index).collect::<Vec<_>>()
        );
    }

    #[test]
    fn verification_key_bytes_roundtrip() {
        let params = setup(4).unwrap();
        let keypair = keygen(&params);
        let vk = keypair.verification_key();

        let bytes = vk.to_bytes();
        assert_eq!(vk, &VerificationKey::from_bytes(&bytes).unwrap());
        assert_eq!(vk, &VerificationKey::try_from_bs58(vk.to_bs58()).unwrap());
        assert!(VerificationKey::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
