// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Base58 text encoding of individual group elements and scalars, as they appear
//! inside ledger objects.

use bls12_381::{G1Projective, G2Projective, Scalar};
use group::Curve;

use crate::error::{CoconutError, Result};
use crate::utils::{
    fixed_bytes, try_deserialize_g1_projective, try_deserialize_g2_projective,
    try_deserialize_scalar,
};

fn decode_bs58<const N: usize>(encoded: &str) -> Result<[u8; N]> {
    let bytes = bs58::decode(encoded).into_vec()?;
    fixed_bytes(&bytes)
}

pub fn pack_g1(element: &G1Projective) -> String {
    bs58::encode(element.to_affine().to_compressed()).into_string()
}

pub fn unpack_g1(encoded: &str) -> Result<G1Projective> {
    try_deserialize_g1_projective(
        &decode_bs58(encoded)?,
        CoconutError::Deserialization("Failed to unpack G1 element".to_string()),
    )
}

pub fn pack_g2(element: &G2Projective) -> String {
    bs58::encode(element.to_affine().to_compressed()).into_string()
}

pub fn unpack_g2(encoded: &str) -> Result<G2Projective> {
    try_deserialize_g2_projective(
        &decode_bs58(encoded)?,
        CoconutError::Deserialization("Failed to unpack G2 element".to_string()),
    )
}

pub fn pack_scalar(scalar: &Scalar) -> String {
    bs58::encode(scalar.to_bytes()).into_string()
}

pub fn unpack_scalar(encoded: &str) -> Result<Scalar> {
    try_deserialize_scalar(
        &decode_bs58(encoded)?,
        CoconutError::Deserialization("Failed to unpack scalar".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::setup::setup;

    #[test]
    fn packed_elements_can_be_recovered() {
        let params = setup(1).unwrap();
        let r = params.random_scalar();

        let g1 = params.gen1() * r;
        let g2 = params.gen2() * r;

        assert_eq!(g1, unpack_g1(&pack_g1(&g1)).unwrap());
        assert_eq!(g2, unpack_g2(&pack_g2(&g2)).unwrap());
        assert_eq!(r, unpack_scalar(&pack_scalar(&r)).unwrap());
    }

    #[test]
    fn unpacking_rejects_garbage() {
        let params = setup(1).unwrap();
        let g1 = pack_g1(&(params.gen1() * params.random_scalar()));

        // not base58
        assert!(unpack_g1("0OIl").is_err());
        // wrong group
        assert!(unpack_g2(&g1).is_err());
        // wrong length
        assert!(unpack_scalar(&g1).is_err());
        // non-canonical scalar
        assert!(unpack_scalar(&bs58::encode([0xffu8; 32]).into_string()).is_err());
    }
}
