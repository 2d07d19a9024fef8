// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::code::{
    CODE_MODULE_NAME, METADATA_STORE_RESOURCE_NAME, MODULE_STORE_RESOURCE_NAME,
    SET_ALLOW_ARBITRARY_FUNCTION_NAME,
};
use movekv_vm_types::language_storage::CORE_CODE_ADDRESS;
use serde::{Deserialize, Serialize};

/// Names of the on chain code module the keeper reads through.
/// Defaults match the standard library published at `0x1`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeeperConfig {
    pub std_address: AccountAddress,
    pub code_module: String,
    pub module_store_resource: String,
    pub metadata_store_resource: String,
    pub set_allow_arbitrary_function: String,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            std_address: CORE_CODE_ADDRESS,
            code_module: CODE_MODULE_NAME.to_string(),
            module_store_resource: MODULE_STORE_RESOURCE_NAME.to_string(),
            metadata_store_resource: METADATA_STORE_RESOURCE_NAME.to_string(),
            set_allow_arbitrary_function: SET_ALLOW_ARBITRARY_FUNCTION_NAME.to_string(),
        }
    }
}
