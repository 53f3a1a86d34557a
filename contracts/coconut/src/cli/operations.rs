// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use nym_chainspace_contract::Contract;

pub(crate) fn execute(contract: &Contract) -> anyhow::Result<()> {
    for operation in contract.operations() {
        println!("{}::{operation}", contract.contract_id());
    }
    Ok(())
}
