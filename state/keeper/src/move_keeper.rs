// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::errors::{KeeperError, KeeperResult};
use crate::executor::MoveExecutor;
use movekv_logger::prelude::*;
use movekv_state_api::{PrefixStore, StateStore};
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::identifier::Identifier;
use movekv_vm_types::language_storage::{ModuleId, StructTag, TypeTag};
use movekv_vm_types::state_store::state_key::{self, DataPath, StateKey};
use movekv_vm_types::state_store::table::{TableHandle, TableInfo};
use movekv_vm_types::store_keys::{
    decode_execution_counter, encode_execution_counter, EXECUTION_COUNTER_KEY, VM_STORE_PREFIX,
};
use movekv_vm_types::transaction::EntryFunction;

/// A raw table entry, `key_bytes` and `value_bytes` are bcs encoded per the table's types.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableEntry {
    pub handle: TableHandle,
    pub key_bytes: Vec<u8>,
    pub value_bytes: Vec<u8>,
}

/// Reads and writes VM state in the chain store, and forwards entry function calls to the VM.
///
/// Every operation takes the store of the current context explicitly, nothing read from it
/// is kept between calls.
pub struct MoveKeeper<E> {
    executor: E,
}

fn vm_store(ctx: &dyn StateStore) -> PrefixStore<&dyn StateStore> {
    PrefixStore::new(ctx, VM_STORE_PREFIX)
}

fn get_bytes(
    ctx: &dyn StateStore,
    key: &[u8],
    describe: impl FnOnce() -> String,
) -> KeeperResult<Vec<u8>> {
    vm_store(ctx)
        .get(key)
        .map_err(KeeperError::Store)?
        .ok_or_else(|| KeeperError::not_found(describe()))
}

fn set_bytes(ctx: &dyn StateStore, key: Vec<u8>, value: Vec<u8>) -> KeeperResult<()> {
    vm_store(ctx).set(key, value).map_err(KeeperError::Store)
}

fn decode_key(key: &[u8]) -> KeeperResult<StateKey> {
    StateKey::decode(key).map_err(|e| KeeperError::decoding("state key", e))
}

impl<E> MoveKeeper<E>
where
    E: MoveExecutor,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn get_module_bytes(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        module_name: &str,
    ) -> KeeperResult<Vec<u8>> {
        let key = state_key::module_key(address, module_name)
            .map_err(|e| KeeperError::encoding("module key", e))?;
        get_bytes(ctx, &key, || format!("{}/Code({})", address, module_name))
    }

    pub fn set_module_bytes(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        module_name: &str,
        code: Vec<u8>,
    ) -> KeeperResult<()> {
        let key = state_key::module_key(address, module_name)
            .map_err(|e| KeeperError::encoding("module key", e))?;
        set_bytes(ctx, key, code)
    }

    pub fn get_resource_bytes(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        struct_tag: &StructTag,
    ) -> KeeperResult<Vec<u8>> {
        let key = Self::resource_key(address, struct_tag)?;
        get_bytes(ctx, &key, || {
            StateKey::resource(*address, struct_tag.clone()).to_string()
        })
    }

    pub fn has_resource(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        struct_tag: &StructTag,
    ) -> KeeperResult<bool> {
        let key = Self::resource_key(address, struct_tag)?;
        vm_store(ctx).contains_key(&key).map_err(KeeperError::Store)
    }

    pub fn set_resource_bytes(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        struct_tag: &StructTag,
        value: Vec<u8>,
    ) -> KeeperResult<()> {
        let key = Self::resource_key(address, struct_tag)?;
        set_bytes(ctx, key, value)
    }

    pub fn remove_resource(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
        struct_tag: &StructTag,
    ) -> KeeperResult<()> {
        let key = Self::resource_key(address, struct_tag)?;
        vm_store(ctx).remove(&key).map_err(KeeperError::Store)
    }

    fn resource_key(address: &AccountAddress, struct_tag: &StructTag) -> KeeperResult<Vec<u8>> {
        state_key::resource_key(address, struct_tag)
            .map_err(|e| KeeperError::encoding("resource key", e))
    }

    pub fn get_table_entry_bytes(
        &self,
        ctx: &dyn StateStore,
        handle: &TableHandle,
        key_bytes: &[u8],
    ) -> KeeperResult<TableEntry> {
        let key = state_key::table_entry_key(handle, key_bytes);
        let value_bytes = get_bytes(ctx, &key, || {
            StateKey::table_entry(*handle, key_bytes.to_vec()).to_string()
        })?;
        Ok(TableEntry {
            handle: *handle,
            key_bytes: key_bytes.to_vec(),
            value_bytes,
        })
    }

    pub fn set_table_entry_bytes(
        &self,
        ctx: &dyn StateStore,
        handle: &TableHandle,
        key_bytes: &[u8],
        value_bytes: Vec<u8>,
    ) -> KeeperResult<()> {
        set_bytes(ctx, state_key::table_entry_key(handle, key_bytes), value_bytes)
    }

    pub fn get_table_info(
        &self,
        ctx: &dyn StateStore,
        handle: &TableHandle,
    ) -> KeeperResult<TableInfo> {
        let bytes = get_bytes(ctx, &state_key::table_info_key(handle), || {
            StateKey::table_info(*handle).to_string()
        })?;
        bcs_ext::from_bytes(&bytes).map_err(|e| KeeperError::decoding("table info", e))
    }

    pub fn set_table_info(
        &self,
        ctx: &dyn StateStore,
        handle: &TableHandle,
        info: &TableInfo,
    ) -> KeeperResult<()> {
        let bytes = bcs_ext::to_bytes(info).map_err(|e| KeeperError::encoding("table info", e))?;
        set_bytes(ctx, state_key::table_info_key(handle), bytes)
    }

    /// All modules published at `address`, ordered by encoded name.
    pub fn iterate_modules(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
    ) -> KeeperResult<Vec<(Identifier, Vec<u8>)>> {
        vm_store(ctx)
            .iter_prefix(&state_key::module_prefix(address))
            .map_err(KeeperError::Store)?
            .into_iter()
            .map(|(key, code)| match decode_key(&key)?.path {
                DataPath::Code(name) => Ok((name, code)),
                path => Err(KeeperError::decoding(
                    "module key",
                    anyhow::format_err!("unexpected path {} under module prefix", path),
                )),
            })
            .collect()
    }

    /// All resources stored at `address`, ordered by encoded struct tag.
    pub fn iterate_resources(
        &self,
        ctx: &dyn StateStore,
        address: &AccountAddress,
    ) -> KeeperResult<Vec<(StructTag, Vec<u8>)>> {
        vm_store(ctx)
            .iter_prefix(&state_key::resource_prefix(address))
            .map_err(KeeperError::Store)?
            .into_iter()
            .map(|(key, value)| match decode_key(&key)?.path {
                DataPath::Resource(struct_tag) => Ok((struct_tag, value)),
                path => Err(KeeperError::decoding(
                    "resource key",
                    anyhow::format_err!("unexpected path {} under resource prefix", path),
                )),
            })
            .collect()
    }

    /// All entries of the table, ordered by raw key bytes.
    pub fn iterate_table_entries(
        &self,
        ctx: &dyn StateStore,
        handle: &TableHandle,
    ) -> KeeperResult<Vec<TableEntry>> {
        let prefix = state_key::table_entry_prefix(handle);
        Ok(vm_store(ctx)
            .iter_prefix(&prefix)
            .map_err(KeeperError::Store)?
            .into_iter()
            .map(|(key, value_bytes)| TableEntry {
                handle: *handle,
                key_bytes: key[prefix.len()..].to_vec(),
                value_bytes,
            })
            .collect())
    }

    /// Execute `module_address::module_name::function_name` as `sender`.
    /// VM errors are returned as `KeeperError::VmExecution` without modification.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_entry_function(
        &self,
        ctx: &dyn StateStore,
        sender: AccountAddress,
        module_address: AccountAddress,
        module_name: &str,
        function_name: &str,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> KeeperResult<()> {
        let module = Identifier::new(module_name)
            .map_err(|e| KeeperError::encoding("module name", e))?;
        let function = Identifier::new(function_name)
            .map_err(|e| KeeperError::encoding("function name", e))?;
        let entry_function =
            EntryFunction::new(ModuleId::new(module_address, module), function, ty_args, args);
        debug!("execute entry function {} by {}", entry_function, sender);

        self.executor
            .execute_entry_function(ctx, sender, entry_function)
            .map_err(KeeperError::VmExecution)?;
        self.increase_execution_counter(ctx)
    }

    /// Number of entry functions executed successfully through this keeper.
    pub fn get_execution_counter(&self, ctx: &dyn StateStore) -> KeeperResult<u64> {
        match ctx.get(EXECUTION_COUNTER_KEY).map_err(KeeperError::Store)? {
            Some(bytes) => decode_execution_counter(&bytes)
                .map_err(|e| KeeperError::decoding("execution counter", e)),
            None => Ok(0),
        }
    }

    fn increase_execution_counter(&self, ctx: &dyn StateStore) -> KeeperResult<()> {
        let counter = self.get_execution_counter(ctx)?.wrapping_add(1);
        let bytes = encode_execution_counter(counter)
            .map_err(|e| KeeperError::encoding("execution counter", e))?;
        ctx.set(EXECUTION_COUNTER_KEY.to_vec(), bytes)
            .map_err(KeeperError::Store)
    }
}
