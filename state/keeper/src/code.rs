// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::errors::{KeeperError, KeeperResult};
use crate::executor::MoveExecutor;
use crate::move_keeper::MoveKeeper;
use movekv_config::KeeperConfig;
use movekv_logger::prelude::*;
use movekv_state_api::StateStore;
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::code::{MetadataStore, ModuleMetadata, ModuleStore, UpgradePolicy};
use movekv_vm_types::identifier::Identifier;
use movekv_vm_types::language_storage::{ModuleId, StructTag};
use std::sync::Arc;

/// Validated names of the code module, resolved once from `KeeperConfig`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeNames {
    pub std_address: AccountAddress,
    pub code_module: Identifier,
    pub module_store: Identifier,
    pub metadata_store: Identifier,
    pub set_allow_arbitrary: Identifier,
}

impl CodeNames {
    pub fn from_config(config: &KeeperConfig) -> KeeperResult<Self> {
        let ident = |what: &str, name: &str| {
            Identifier::new(name).map_err(|e| KeeperError::encoding(what, e))
        };
        Ok(Self {
            std_address: config.std_address,
            code_module: ident("code module name", &config.code_module)?,
            module_store: ident("module store name", &config.module_store_resource)?,
            metadata_store: ident("metadata store name", &config.metadata_store_resource)?,
            set_allow_arbitrary: ident(
                "set allow arbitrary function name",
                &config.set_allow_arbitrary_function,
            )?,
        })
    }

    pub fn module_store_tag(&self) -> StructTag {
        StructTag::new(
            self.std_address,
            self.code_module.clone(),
            self.module_store.clone(),
            vec![],
        )
    }

    pub fn metadata_store_tag(&self) -> StructTag {
        StructTag::new(
            self.std_address,
            self.code_module.clone(),
            self.metadata_store.clone(),
            vec![],
        )
    }
}

/// Outcome of an upgrade policy lookup.
/// `policy` is `UpgradePolicy::fail_safe()` whenever `error` is set.
#[derive(Debug)]
pub struct PolicyResolution {
    policy: UpgradePolicy,
    error: Option<KeeperError>,
}

impl PolicyResolution {
    fn resolved(policy: UpgradePolicy) -> Self {
        Self {
            policy,
            error: None,
        }
    }

    fn failed(error: KeeperError) -> Self {
        Self {
            policy: UpgradePolicy::fail_safe(),
            error: Some(error),
        }
    }

    pub fn policy(&self) -> UpgradePolicy {
        self.policy
    }

    pub fn error(&self) -> Option<&KeeperError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (UpgradePolicy, Option<KeeperError>) {
        (self.policy, self.error)
    }

    pub fn into_result(self) -> KeeperResult<UpgradePolicy> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.policy),
        }
    }
}

/// Reads and updates the state owned by the `code` module.
pub struct CodeKeeper<E> {
    keeper: Arc<MoveKeeper<E>>,
    names: CodeNames,
}

impl<E> CodeKeeper<E>
where
    E: MoveExecutor,
{
    pub fn new(keeper: Arc<MoveKeeper<E>>, config: &KeeperConfig) -> KeeperResult<Self> {
        Ok(Self {
            keeper,
            names: CodeNames::from_config(config)?,
        })
    }

    pub fn names(&self) -> &CodeNames {
        &self.names
    }

    pub fn keeper(&self) -> &Arc<MoveKeeper<E>> {
        &self.keeper
    }

    /// Load the allow_arbitrary flag from the move store.
    pub fn get_allow_arbitrary(&self, ctx: &dyn StateStore) -> KeeperResult<bool> {
        let bytes = self.keeper.get_resource_bytes(
            ctx,
            &self.names.std_address,
            &self.names.module_store_tag(),
        )?;
        ModuleStore::read_allow_arbitrary(&bytes)
            .map_err(|e| KeeperError::decoding("allow_arbitrary", e))
    }

    /// Update the allow_arbitrary flag through the code module, the VM owns the resource.
    pub fn set_allow_arbitrary(&self, ctx: &dyn StateStore, allow: bool) -> KeeperResult<()> {
        let arg = bcs_ext::serialize_bool(allow)
            .map_err(|e| KeeperError::encoding("allow_arbitrary", e))?;
        info!("set allow_arbitrary to {}", allow);
        self.keeper.execute_entry_function(
            ctx,
            self.names.std_address,
            self.names.std_address,
            self.names.code_module.as_str(),
            self.names.set_allow_arbitrary.as_str(),
            vec![],
            vec![arg],
        )
    }

    /// Read the upgrade policy of `address::module_name`.
    ///
    /// The policy lives in the `metadata` table of the `MetadataStore` resource at `address`,
    /// keyed by the module id string. `NotFound` means either the resource or the table
    /// entry is missing; the error key tells which.
    pub fn get_upgrade_policy(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        module_name: &str,
    ) -> PolicyResolution {
        match self.resolve_upgrade_policy(ctx, address, module_name) {
            Ok(policy) => PolicyResolution::resolved(policy),
            Err(e) => {
                warn!(
                    "resolve upgrade policy of {}::{} fail, fallback to {}: {}",
                    address,
                    module_name,
                    UpgradePolicy::fail_safe(),
                    e
                );
                PolicyResolution::failed(e)
            }
        }
    }

    fn resolve_upgrade_policy(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        module_name: &str,
    ) -> KeeperResult<UpgradePolicy> {
        let bytes =
            self.keeper
                .get_resource_bytes(ctx, address, &self.names.metadata_store_tag())?;
        let handle = MetadataStore::read_table_handle(&bytes)
            .map_err(|e| KeeperError::decoding("metadata store", e))?;

        let name =
            Identifier::new(module_name).map_err(|e| KeeperError::encoding("module name", e))?;
        let module_id = ModuleId::new(*address, name);
        let table_key = bcs_ext::serialize_str(&module_id.short_str_lossless())
            .map_err(|e| KeeperError::encoding("metadata table key", e))?;

        let entry = self.keeper.get_table_entry_bytes(ctx, &handle, &table_key)?;
        debug!("metadata of {} found in table {}", module_id, handle);
        ModuleMetadata::read_upgrade_policy(&entry.value_bytes)
            .map_err(|e| KeeperError::decoding("module metadata", e))
    }
}
