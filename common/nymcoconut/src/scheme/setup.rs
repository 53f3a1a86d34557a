// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::{G1Affine, G2Affine, Scalar};
use ff::Field;
use group::Curve;
use rand::thread_rng;

use crate::error::{CoconutError, Result};
use crate::utils::hash_g1;

pub struct Parameters {
    /// Generator of the G1 group
    g1: G1Affine,

    /// Additional generators of the G1 group, one per attribute slot
    hs: Vec<G1Affine>,

    /// Generator of the G2 group
    g2: G2Affine,
}

impl Parameters {
    pub fn new(num_attributes: u32) -> Result<Parameters> {
        if num_attributes == 0 {
            return Err(CoconutError::Setup(
                "Tried to setup the scheme for 0 attributes".to_string(),
            ));
        }

        let hs = (1..=num_attributes)
            .map(|i| hash_g1(format!("h{i}")).to_affine())
            .collect();

        Ok(Parameters {
            g1: G1Affine::generator(),
            hs,
            g2: G2Affine::generator(),
        })
    }

    pub fn gen1(&self) -> &G1Affine {
        &self.g1
    }

    pub fn gen2(&self) -> &G2Affine {
        &self.g2
    }

    pub fn gen_hs(&self) -> &[G1Affine] {
        &self.hs
    }

    pub fn max_attributes(&self) -> usize {
        self.hs.len()
    }

    pub(crate) fn gen_hs_bytes(&self) -> Vec<[u8; 48]> {
        self.hs
            .iter()
            .map(|h| h.to_compressed())
            .collect()
    }

    pub fn random_scalar(&self) -> Scalar {
        // lazily-initialized thread-local random number generator, seeded by the system
        let mut rng = thread_rng();
        Scalar::random(&mut rng)
    }

    pub fn n_random_scalars(&self, n: usize) -> Vec<Scalar> {
        (0..n).map(|_| self.random_scalar()).collect()
    }
}

/// Generates the public parameters required by the scheme.
/// `num_attributes` indicates the maximum number of attributes that can be embedded
/// in a single credential, i.e. the number of attribute slots `q`.
pub fn setup(num_attributes: u32) -> Result<Parameters> {
    Parameters::new(num_attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_rejects_zero_attributes() {
        assert!(setup(0).is_err());
    }

    #[test]
    fn setup_is_deterministic() {
        let params1 = setup(3).unwrap();
        let params2 = setup(3).unwrap();

        assert_eq!(3, params1.max_attributes());
        assert_eq!(params1.gen_hs(), params2.gen_hs());
        assert_eq!(params1.gen1(), params2.gen1());
        assert_eq!(params1.gen2(), params2.gen2());

        // the generators are shared between differently sized parameters
        let params3 = setup(5).unwrap();
        assert_eq!(params1.gen_hs(), &params3.gen_hs()[..3]);
    }
}
