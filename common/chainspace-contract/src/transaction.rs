// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ChainspaceError;

/// Arguments handed to a contract method.
///
/// `inputs` and `reference_inputs` are serialized ledger objects; `parameters` carry the
/// operation specific (typed) arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub reference_inputs: Vec<String>,

    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl MethodCall {
    pub fn new(inputs: Vec<String>, parameters: serde_json::Value) -> Self {
        MethodCall {
            inputs,
            reference_inputs: Vec::new(),
            parameters,
        }
    }

    /// Decodes the method parameters into the operation's own argument type.
    pub fn parameters<T: DeserializeOwned>(&self) -> Result<T, ChainspaceError> {
        serde_json::from_value(self.parameters.clone())
            .map_err(|err| ChainspaceError::MalformedArguments(err.to_string()))
    }
}

/// Result of running a contract method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodOutput {
    pub outputs: Vec<String>,

    /// Auxiliary values needed by the checker that are never persisted as objects.
    pub extra_parameters: Vec<String>,

    pub returns: Vec<String>,
}

/// A fully assembled transaction, as submitted to the ledger and re-validated by checkers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub contract_id: String,
    pub operation: String,

    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub reference_inputs: Vec<String>,

    /// The extra parameters emitted by the method.
    #[serde(default)]
    pub parameters: Vec<String>,

    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub returns: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<Transaction>,
}

impl Transaction {
    pub fn assemble(
        contract_id: impl Into<String>,
        operation: impl Into<String>,
        call: MethodCall,
        output: MethodOutput,
    ) -> Self {
        Transaction {
            contract_id: contract_id.into(),
            operation: operation.into(),
            inputs: call.inputs,
            reference_inputs: call.reference_inputs,
            parameters: output.extra_parameters,
            outputs: output.outputs,
            returns: output.returns,
            dependencies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Args {
        q: u32,
    }

    #[test]
    fn typed_parameters_are_decoded() {
        let call = MethodCall::new(vec![], json!({ "q": 3 }));
        assert_eq!(Args { q: 3 }, call.parameters().unwrap());

        let bad = MethodCall::new(vec![], json!({ "q": "three" }));
        assert!(matches!(
            bad.parameters::<Args>(),
            Err(ChainspaceError::MalformedArguments(_))
        ));
    }

    #[test]
    fn missing_transaction_fields_default_to_empty() {
        let tx: Transaction = serde_json::from_value(json!({
            "contract_id": "foo",
            "operation": "bar",
            "outputs": ["baz"],
        }))
        .unwrap();

        assert!(tx.inputs.is_empty());
        assert!(tx.reference_inputs.is_empty());
        assert!(tx.parameters.is_empty());
        assert!(tx.returns.is_empty());
        assert!(tx.dependencies.is_empty());
        assert_eq!(vec!["baz".to_string()], tx.outputs);
    }

    #[test]
    fn assembled_transaction_carries_extra_parameters() {
        let call = MethodCall::new(vec!["in".to_string()], serde_json::Value::Null);
        let output = MethodOutput {
            outputs: vec!["in".to_string(), "out".to_string()],
            extra_parameters: vec!["aux".to_string()],
            returns: vec![],
        };

        let tx = Transaction::assemble("foo", "bar", call, output);
        assert_eq!(vec!["in".to_string()], tx.inputs);
        assert_eq!(vec!["aux".to_string()], tx.parameters);
        assert_eq!(2, tx.outputs.len());
    }
}
