// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use nym_chainspace_contract::ChainspaceError;
use nym_coconut::CoconutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoconutContractError {
    #[error("expected {expected} {field}, got {actual}")]
    InvalidArity {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("expected object of type '{expected}', got '{actual}'")]
    UnexpectedObjectType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("the first output does not echo the consumed input")]
    EchoViolation,

    #[error("failed to decode ledger object: {0}")]
    MalformedObject(#[from] serde_json::Error),

    #[error(transparent)]
    Crypto(#[from] CoconutError),

    #[error(transparent)]
    Framework(#[from] ChainspaceError),

    #[error("instance policy violation: {0}")]
    PolicyViolation(String),

    #[error("requested {requested} attributes, but at most {max} are allowed")]
    TooManyAttributes { max: u64, requested: u64 },

    #[error("request was built for q = {requested}, but the instance uses q = {instance}")]
    AttributeCountMismatch { instance: u32, requested: u32 },

    #[error("the request does not hide any attribute")]
    NoHiddenAttributes,

    #[error("the instance signature does not verify under its verification key")]
    InvalidSignature,

    #[error("the issuance request proof does not verify")]
    InvalidProof,

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
