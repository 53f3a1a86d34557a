// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoconutContractError;

pub const DEFAULT_CONTRACT_NAME: &str = "coconut";

/// Upper bound on `q` accepted by the checkers; `setup(q)` hashes `q` points onto the curve
/// for every checked transaction.
pub const DEFAULT_MAX_ATTRIBUTES: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Identifier under which the contract is registered and which transactions must target.
    pub name: String,

    /// Maximum number of attribute slots (`q`) an instance may declare.
    pub max_attributes: u32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        ContractConfig {
            name: DEFAULT_CONTRACT_NAME.to_string(),
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
        }
    }
}

impl ContractConfig {
    pub fn read_from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CoconutContractError> {
        let path = path.as_ref();
        debug!("loading contract config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| CoconutContractError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| CoconutContractError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Makes sure `q` is within the configured bound.
    pub(crate) fn ensure_attribute_bound(&self, q: u32) -> Result<(), CoconutContractError> {
        if q > self.max_attributes {
            return Err(CoconutContractError::TooManyAttributes {
                max: self.max_attributes as u64,
                requested: q as u64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_are_defaulted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_attributes = 4").unwrap();

        let config = ContractConfig::read_from_toml_file(file.path()).unwrap();
        assert_eq!(DEFAULT_CONTRACT_NAME, config.name);
        assert_eq!(4, config.max_attributes);

        let empty = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            ContractConfig::default(),
            ContractConfig::read_from_toml_file(empty.path()).unwrap()
        );
    }

    #[test]
    fn invalid_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ContractConfig::read_from_toml_file(dir.path().join("nope.toml")),
            Err(CoconutContractError::ConfigRead { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unknown_field = true").unwrap();
        assert!(matches!(
            ContractConfig::read_from_toml_file(file.path()),
            Err(CoconutContractError::ConfigParse { .. })
        ));
    }

    #[test]
    fn attribute_bound_is_enforced() {
        let config = ContractConfig {
            max_attributes: 2,
            ..Default::default()
        };
        assert!(config.ensure_attribute_bound(2).is_ok());
        assert!(config.ensure_attribute_bound(3).is_err());
    }
}
