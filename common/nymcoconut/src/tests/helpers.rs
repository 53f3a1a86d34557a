// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::{CoconutError, Result};
use crate::scheme::aggregation::{aggregate_signature_shares, aggregate_verification_keys};
use crate::scheme::issuance::sign;
use crate::scheme::keygen::{ttp_keygen, KeyPair, VerificationKey};
use crate::scheme::setup::Parameters;
use crate::scheme::{Signature, SignatureShare};
use crate::Attribute;

/// A set of `num_authorities` signers produced by a trusted dealer, any `threshold`
/// of which can jointly produce a valid signature under `verification_key`.
pub struct ThresholdAuthorities {
    pub threshold: u64,
    pub keypairs: Vec<KeyPair>,
    pub verification_key: VerificationKey,
}

pub fn threshold_authorities(
    params: &Parameters,
    threshold: u64,
    num_authorities: u64,
) -> Result<ThresholdAuthorities> {
    let keypairs = ttp_keygen(params, threshold, num_authorities)?;

    let (vks, indices): (Vec<_>, Vec<_>) = keypairs
        .iter()
        .map(|keypair| {
            keypair
                .index
                .map(|index| (keypair.verification_key().clone(), index))
                .ok_or_else(|| CoconutError::Keygen("threshold key without an index".to_string()))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .unzip();

    let verification_key = aggregate_verification_keys(&vks, Some(&indices))?;

    Ok(ThresholdAuthorities {
        threshold,
        keypairs,
        verification_key,
    })
}

impl ThresholdAuthorities {
    /// Collects partial signatures from the first `threshold` authorities and aggregates them.
    pub fn sign(&self, params: &Parameters, attributes: &[Attribute]) -> Result<Signature> {
        self.sign_with(params, attributes, self.threshold as usize)
    }

    /// Same as [`Self::sign`], but uses the first `signers` authorities instead.
    pub fn sign_with(
        &self,
        params: &Parameters,
        attributes: &[Attribute],
        signers: usize,
    ) -> Result<Signature> {
        let shares = self
            .keypairs
            .iter()
            .take(signers)
            .map(|keypair| {
                let index = keypair.index.ok_or_else(|| {
                    CoconutError::Keygen("threshold key without an index".to_string())
                })?;
                Ok(SignatureShare::new(
                    sign(params, keypair.secret_key(), attributes)?,
                    index,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        aggregate_signature_shares(params, &self.verification_key, attributes, &shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::setup::setup;
    use crate::scheme::verification::mix_verify;
    use crate::utils::hash_to_scalar;

    #[test]
    fn threshold_signature_verifies_under_aggregated_key() {
        let params = setup(1).unwrap();
        let authorities = threshold_authorities(&params, 2, 3).unwrap();
        let attributes = [hash_to_scalar("instance")];

        let signature = authorities.sign(&params, &attributes).unwrap();
        assert!(mix_verify(
            &params,
            &authorities.verification_key,
            &signature,
            &attributes
        ));

        let signature = authorities.sign_with(&params, &attributes, 3).unwrap();
        assert!(mix_verify(
            &params,
            &authorities.verification_key,
            &signature,
            &attributes
        ));

        assert!(authorities.sign_with(&params, &attributes, 1).is_err());
    }
}
