// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::ChainspaceError;
use crate::transaction::{MethodCall, MethodOutput, Transaction};

pub type Method = Box<dyn Fn(&MethodCall) -> Result<MethodOutput, ChainspaceError> + Send + Sync>;
pub type Checker = Box<dyn Fn(&Transaction) -> bool + Send + Sync>;

struct Operation {
    method: Method,
    checker: Checker,
}

/// Registry of the operations exposed by a single contract.
///
/// It is built once, at start-up, and never mutated afterwards, so a shared reference
/// can be used to run checkers from any number of threads.
pub struct Contract {
    contract_id: String,
    operations: BTreeMap<String, Operation>,
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("contract_id", &self.contract_id)
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Contract {
    pub fn new(contract_id: impl Into<String>) -> Self {
        Contract {
            contract_id: contract_id.into(),
            operations: BTreeMap::new(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Registers `method` and its matching `checker` under the `operation` name.
    pub fn register<M, E, C>(
        &mut self,
        operation: impl Into<String>,
        method: M,
        checker: C,
    ) -> Result<(), ChainspaceError>
    where
        M: Fn(&MethodCall) -> Result<MethodOutput, E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
        C: Fn(&Transaction) -> bool + Send + Sync + 'static,
    {
        let operation = operation.into();
        if self.operations.contains_key(&operation) {
            return Err(ChainspaceError::DuplicateOperation(operation));
        }

        let name = operation.clone();
        let method: Method = Box::new(move |call| {
            method(call).map_err(|source| ChainspaceError::MethodFailure {
                operation: name.clone(),
                source: Box::new(source),
            })
        });

        self.operations.insert(
            operation,
            Operation {
                method,
                checker: Box::new(checker),
            },
        );
        Ok(())
    }

    /// Builder-style variant of [`Self::register`].
    pub fn with_operation<M, E, C>(
        mut self,
        operation: impl Into<String>,
        method: M,
        checker: C,
    ) -> Result<Self, ChainspaceError>
    where
        M: Fn(&MethodCall) -> Result<MethodOutput, E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
        C: Fn(&Transaction) -> bool + Send + Sync + 'static,
    {
        self.register(operation, method, checker)?;
        Ok(self)
    }

    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Runs the method registered for `operation` and assembles the resulting transaction.
    pub fn execute(&self, operation: &str, call: MethodCall) -> Result<Transaction, ChainspaceError> {
        let registered =
            self.operations
                .get(operation)
                .ok_or_else(|| ChainspaceError::UnknownOperation {
                    contract_id: self.contract_id.clone(),
                    operation: operation.to_string(),
                })?;

        debug!("executing {}::{operation}", self.contract_id);
        let output = (registered.method)(&call)?;

        Ok(Transaction::assemble(
            self.contract_id.clone(),
            operation,
            call,
            output,
        ))
    }

    /// Runs the checker matching the transaction's operation.
    /// Transactions addressed to a different contract or to an unknown operation are rejected.
    pub fn check(&self, transaction: &Transaction) -> bool {
        if transaction.contract_id != self.contract_id {
            debug!(
                "transaction targets contract '{}', not '{}'",
                transaction.contract_id, self.contract_id
            );
            return false;
        }

        let Some(registered) = self.operations.get(&transaction.operation) else {
            debug!(
                "contract '{}' has no checker for '{}'",
                self.contract_id, transaction.operation
            );
            return false;
        };

        let valid = (registered.checker)(transaction);
        trace!(
            "{}::{} checker returned {valid}",
            self.contract_id,
            transaction.operation
        );
        valid
    }
}
