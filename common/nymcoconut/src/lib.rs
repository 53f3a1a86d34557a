// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]

pub use bls12_381::{G1Projective, G2Projective, Scalar};
pub use elgamal::elgamal_keygen;
pub use elgamal::Ciphertext;
pub use elgamal::ElGamalKeyPair;
pub use elgamal::PrivateKey;
pub use elgamal::PublicKey;
pub use error::CoconutError;
pub use packing::{pack_g1, pack_g2, pack_scalar, unpack_g1, unpack_g2, unpack_scalar};
pub use proofs::ProofCmCs;
pub use scheme::aggregation::aggregate_signature_shares;
pub use scheme::aggregation::aggregate_signatures;
pub use scheme::aggregation::aggregate_verification_keys;
pub use scheme::issuance::prepare_mix_sign;
pub use scheme::issuance::sign;
pub use scheme::issuance::MixSignRequest;
pub use scheme::keygen::keygen;
pub use scheme::keygen::ttp_keygen;
pub use scheme::keygen::KeyPair;
pub use scheme::keygen::SecretKey;
pub use scheme::keygen::VerificationKey;
pub use scheme::setup::setup;
pub use scheme::setup::Parameters;
pub use scheme::verification::mix_verify;
pub use scheme::verification::verify_mix_sign;
pub use scheme::PartialSignature;
pub use scheme::Signature;
pub use scheme::SignatureShare;
pub use scheme::SignerIndex;
pub use traits::Base58;
pub use traits::Bytable;
pub use utils::hash_g1;
pub use utils::hash_to_scalar;
pub use utils::perform_lagrangian_interpolation_at_origin;

pub mod elgamal;
mod error;
pub mod packing;
mod proofs;
mod scheme;
pub mod tests;
mod traits;
pub mod utils;

pub type Attribute = Scalar;
