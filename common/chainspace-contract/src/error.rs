// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainspaceError {
    #[error("contract '{contract_id}' does not expose operation '{operation}'")]
    UnknownOperation {
        contract_id: String,
        operation: String,
    },

    #[error("operation '{0}' has already been registered")]
    DuplicateOperation(String),

    #[error("malformed method arguments: {0}")]
    MalformedArguments(String),

    #[error("method '{operation}' failed: {source}")]
    MethodFailure {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to (de)serialize: {0}")]
    Serde(#[from] serde_json::Error),
}
