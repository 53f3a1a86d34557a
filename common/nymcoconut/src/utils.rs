// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use core::iter::Sum;
use core::ops::Mul;
use std::collections::HashSet;

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Scalar,
};
use group::Group;
use sha2::{Digest, Sha256};

use crate::error::{CoconutError, Result};

const G1_HASH_DOMAIN: &[u8] = b"QUUX-V01-CS02-with-BLS12381G1_XMD:SHA-256_SSWU_RO_";

pub(crate) const SCALAR_BYTES: usize = 32;
pub(crate) const G1_BYTES: usize = 48;
pub(crate) const G2_BYTES: usize = 96;

pub fn hash_g1<M: AsRef<[u8]>>(msg: M) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve([msg], G1_HASH_DOMAIN)
}

/// Hashes the message with SHA-256 and reduces the digest, read as a big-endian integer,
/// into the scalar field.
pub fn hash_to_scalar<M: AsRef<[u8]>>(msg: M) -> Scalar {
    let digest = Sha256::digest(msg.as_ref());

    // `from_bytes_wide` expects little-endian input
    let mut bytes = [0u8; 64];
    for (dst, src) in bytes.iter_mut().zip(digest.iter().rev()) {
        *dst = *src;
    }

    Scalar::from_bytes_wide(&bytes)
}

pub(crate) fn check_bilinear_pairing(
    p: &G1Affine,
    q: &G2Prepared,
    r: &G1Affine,
    s: &G2Prepared,
) -> bool {
    // checking e(P, Q) * e(-R, S) == id
    // is equivalent to checking e(P, Q) == e(R, S)
    // but requires only a single final exponentiation rather than two of them
    let multi_miller = multi_miller_loop(&[(p, q), (&-r, s)]);
    multi_miller.final_exponentiation().is_identity().into()
}

pub fn try_deserialize_scalar(bytes: &[u8; SCALAR_BYTES], err: CoconutError) -> Result<Scalar> {
    Into::<Option<Scalar>>::into(Scalar::from_bytes(bytes)).ok_or(err)
}

pub fn try_deserialize_scalar_vec(
    expected_len: u64,
    bytes: &[u8],
    err: CoconutError,
) -> Result<Vec<Scalar>> {
    let expected_bytes = (expected_len as usize)
        .checked_mul(SCALAR_BYTES)
        .ok_or(CoconutError::Deserialization(
            "declared scalar vector length overflows".to_string(),
        ))?;

    if bytes.len() != expected_bytes {
        return Err(CoconutError::DeserializationInvalidLength {
            actual: bytes.len(),
            target: expected_bytes,
            modulus_target: bytes.len(),
            modulus: SCALAR_BYTES,
            object: "scalars".to_string(),
        });
    }

    let mut out = Vec::with_capacity(expected_len as usize);
    for chunk in bytes.chunks_exact(SCALAR_BYTES) {
        let scalar_bytes = fixed_bytes::<SCALAR_BYTES>(chunk)?;
        let scalar = Into::<Option<Scalar>>::into(Scalar::from_bytes(&scalar_bytes));
        match scalar {
            Some(scalar) => out.push(scalar),
            None => return Err(err),
        }
    }

    Ok(out)
}

pub fn try_deserialize_g1_projective(
    bytes: &[u8; G1_BYTES],
    err: CoconutError,
) -> Result<G1Projective> {
    Into::<Option<G1Affine>>::into(G1Affine::from_compressed(bytes))
        .ok_or(err)
        .map(G1Projective::from)
}

pub fn try_deserialize_g2_projective(
    bytes: &[u8; G2_BYTES],
    err: CoconutError,
) -> Result<G2Projective> {
    Into::<Option<G2Affine>>::into(G2Affine::from_compressed(bytes))
        .ok_or(err)
        .map(G2Projective::from)
}

/// Copies `slice` into a fixed size array, failing if the lengths differ.
pub(crate) fn fixed_bytes<const N: usize>(slice: &[u8]) -> Result<[u8; N]> {
    slice
        .try_into()
        .map_err(|_| CoconutError::DeserializationInvalidLength {
            actual: slice.len(),
            target: N,
            modulus_target: slice.len(),
            modulus: N,
            object: "fixed size array".to_string(),
        })
}

/// Reads a little-endian `u64` length prefix starting at `offset`.
pub(crate) fn read_u64_le(bytes: &[u8], offset: usize) -> Result<u64> {
    let end = offset + 8;
    if bytes.len() < end {
        return Err(CoconutError::DeserializationMinLength {
            min: end,
            actual: bytes.len(),
        });
    }
    Ok(u64::from_le_bytes(fixed_bytes::<8>(&bytes[offset..end])?))
}

pub(crate) struct Polynomial {
    coefficients: Vec<Scalar>,
}

impl Polynomial {
    // for polynomial of degree n, we generate n+1 values
    // (for example for degree 1, like y = x + 2, we need [2,1])
    pub(crate) fn new_random(params: &crate::Parameters, degree: u64) -> Self {
        Polynomial {
            coefficients: params.n_random_scalars((degree + 1) as usize),
        }
    }

    /// Evaluates the polynomial at point x.
    pub(crate) fn evaluate(&self, x: &Scalar) -> Scalar {
        // Horner's method
        self.coefficients
            .iter()
            .rev()
            .fold(Scalar::zero(), |acc, coefficient| acc * x + coefficient)
    }
}

fn contains_duplicates(vals: &[Scalar]) -> bool {
    let mut set = HashSet::new();

    for x in vals {
        if !set.insert(x.to_bytes()) {
            return true;
        }
    }

    false
}

fn generate_lagrangian_coefficients_at_origin(points: &[Scalar]) -> Result<Vec<Scalar>> {
    let num_points = points.len();
    if num_points == 0 {
        return Ok(Vec::new());
    } else if num_points == 1 {
        return Ok(vec![Scalar::one()]);
    }

    if contains_duplicates(points) {
        return Err(CoconutError::Interpolation(
            "tried to interpolate with duplicate coordinates".to_string(),
        ));
    }

    let x = Scalar::zero();
    let mut res = Vec::with_capacity(num_points);

    for (i, xi) in points.iter().enumerate() {
        let mut numerator = Scalar::one();
        let mut denominator = Scalar::one();

        for (j, xj) in points.iter().enumerate() {
            if j != i {
                // numerator = (x - xs[0]) * ... * (x - xs[j]), j != i
                numerator *= x - xj;

                // denominator = (xs[i] - x[0]) * ... * (xs[i] - x[j]), j != i
                denominator *= xi - xj;
            }
        }

        let inv: Scalar = Option::from(denominator.invert()).ok_or(
            CoconutError::Interpolation("could not invert the lagrangian denominator".to_string()),
        )?;

        res.push(numerator * inv)
    }

    Ok(res)
}

/// Performs a Lagrange interpolation at the origin for a polynomial defined by set of coordinates
/// (x, f(x)), where x is a `Scalar` and f(x) is a generic type that can be obtained by evaluating `f` at `x`.
/// It can be used for Scalars, G1 and G2 points as well as verification keys.
pub fn perform_lagrangian_interpolation_at_origin<T>(
    points: &[u64],
    values: &[T],
) -> Result<T>
where
    T: Sum,
    for<'a> &'a T: Mul<Scalar, Output = T>,
{
    if points.is_empty() || values.is_empty() {
        return Err(CoconutError::Interpolation(
            "tried to perform lagrangian interpolation for an empty set of coordinates"
                .to_string(),
        ));
    }

    if points.len() != values.len() {
        return Err(CoconutError::Interpolation(
            "tried to perform lagrangian interpolation for an incomplete set of coordinates"
                .to_string(),
        ));
    }

    let xs = points.iter().map(|&x| Scalar::from(x)).collect::<Vec<_>>();
    let coefficients = generate_lagrangian_coefficients_at_origin(&xs)?;

    Ok(coefficients
        .into_iter()
        .zip(values.iter())
        .map(|(coeff, value)| value * coeff)
        .sum())
}
