// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{ensure, Result};
use movekv_config::KeeperConfig;
use movekv_keeper::mock::MockExecutor;
use movekv_keeper::{CodeKeeper, KeeperError, MoveKeeper};
use movekv_state_api::mock::MockStateStore;
use movekv_state_api::{PrefixStore, StateStore};
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::code::{
    MetadataStore, ModuleMetadata, ModuleStore, Table, UpgradePolicy, CODE_MODULE_NAME,
    MODULE_STORE_RESOURCE_NAME, SET_ALLOW_ARBITRARY_FUNCTION_NAME,
};
use movekv_vm_types::ident;
use movekv_vm_types::language_storage::{StructTag, CORE_CODE_ADDRESS};
use movekv_vm_types::state_store::state_key;
use movekv_vm_types::state_store::table::TableHandle;
use movekv_vm_types::store_keys::VM_STORE_PREFIX;
use std::sync::Arc;

/// Stands in for the `code` module: `set_allow_arbitrary(bool)` rewrites `ModuleStore` at 0x1.
fn code_module_vm() -> MockExecutor {
    MockExecutor::with_handler(|ctx, sender, entry_function| {
        ensure!(*sender == CORE_CODE_ADDRESS, "only 0x1 may set allow_arbitrary");
        ensure!(
            entry_function.module().name().as_str() == CODE_MODULE_NAME
                && entry_function.function().as_str() == SET_ALLOW_ARBITRARY_FUNCTION_NAME,
            "unexpected function {}",
            entry_function
        );
        let allow = bcs_ext::deserialize_bool(&entry_function.args()[0])?;
        let tag = StructTag::new(
            CORE_CODE_ADDRESS,
            ident!(CODE_MODULE_NAME),
            ident!(MODULE_STORE_RESOURCE_NAME),
            vec![],
        );
        PrefixStore::new(ctx, VM_STORE_PREFIX).set(
            state_key::resource_key(&CORE_CODE_ADDRESS, &tag)?,
            bcs_ext::to_bytes(&ModuleStore {
                allow_arbitrary: allow,
            })?,
        )
    })
}

fn code_keeper(executor: MockExecutor) -> CodeKeeper<MockExecutor> {
    CodeKeeper::new(Arc::new(MoveKeeper::new(executor)), &KeeperConfig::default())
        .expect("default names are valid")
}

fn publish_metadata_store(
    code: &CodeKeeper<MockExecutor>,
    store: &MockStateStore,
    address: &AccountAddress,
    handle: TableHandle,
) -> Result<()> {
    let resource = MetadataStore {
        metadata: Table { handle, length: 1 },
    };
    code.keeper().set_resource_bytes(
        store,
        address,
        &code.names().metadata_store_tag(),
        bcs_ext::to_bytes(&resource)?,
    )?;
    Ok(())
}

fn publish_module_metadata(
    code: &CodeKeeper<MockExecutor>,
    store: &MockStateStore,
    address: &AccountAddress,
    handle: &TableHandle,
    module_name: &str,
    policy: UpgradePolicy,
) -> Result<()> {
    let key = bcs_ext::serialize_str(&format!("{}::{}", address, module_name))?;
    code.keeper().set_table_entry_bytes(
        store,
        handle,
        &key,
        bcs_ext::to_bytes(&ModuleMetadata::new(policy))?,
    )?;
    Ok(())
}

#[test]
fn test_allow_arbitrary_round_trip() -> Result<()> {
    let store = MockStateStore::new();
    let code = code_keeper(code_module_vm());

    let err = code.get_allow_arbitrary(&store).unwrap_err();
    assert!(err.is_not_found(), "{:?}", err);

    code.set_allow_arbitrary(&store, true)?;
    assert!(code.get_allow_arbitrary(&store)?);
    assert_eq!(code.keeper().executor().calls().len(), 1);
    assert_eq!(code.keeper().get_execution_counter(&store)?, 1);

    code.set_allow_arbitrary(&store, false)?;
    assert!(!code.get_allow_arbitrary(&store)?);
    assert_eq!(code.keeper().get_execution_counter(&store)?, 2);
    Ok(())
}

#[test]
fn test_allow_arbitrary_ignores_trailing_fields() -> Result<()> {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::new());
    let tag = code.names().module_store_tag();
    // allow_arbitrary, an empty vector, then a u64
    code.keeper().set_resource_bytes(
        &store,
        &CORE_CODE_ADDRESS,
        &tag,
        vec![1, 0, 7, 0, 0, 0, 0, 0, 0, 0],
    )?;
    assert!(code.get_allow_arbitrary(&store)?);

    code.keeper()
        .set_resource_bytes(&store, &CORE_CODE_ADDRESS, &tag, vec![2, 0])?;
    assert!(code.get_allow_arbitrary(&store).unwrap_err().is_decoding());
    Ok(())
}

#[test]
fn test_set_allow_arbitrary_vm_error() {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::failing("MOVE_ABORT 0x50003"));
    let err = code.set_allow_arbitrary(&store, true).unwrap_err();
    match err {
        KeeperError::VmExecution(e) => assert_eq!(e.to_string(), "MOVE_ABORT 0x50003"),
        e => panic!("expect vm execution error, got {:?}", e),
    }
}

#[test]
fn test_policy_without_metadata_store() {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::new());
    let address = AccountAddress::random();

    let (policy, error) = code.get_upgrade_policy(&store, &address, "vault").into_parts();
    assert_eq!(policy, UpgradePolicy::Arbitrary);
    let error = error.expect("lookup must fail");
    assert!(error.is_not_found());
    assert!(error.to_string().contains("MetadataStore"), "{}", error);
}

#[test]
fn test_policy_without_module_metadata() -> Result<()> {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::new());
    let address = AccountAddress::random();
    let handle = TableHandle(AccountAddress::random());
    publish_metadata_store(&code, &store, &address, handle)?;
    publish_module_metadata(
        &code,
        &store,
        &address,
        &handle,
        "other",
        UpgradePolicy::Compatible,
    )?;

    let (policy, error) = code.get_upgrade_policy(&store, &address, "vault").into_parts();
    assert_eq!(policy, UpgradePolicy::Arbitrary);
    let error = error.expect("lookup must fail");
    assert!(error.is_not_found());
    // the missing piece is the table entry, not the resource
    assert!(error.to_string().contains("TableEntry"), "{}", error);
    Ok(())
}

#[test]
fn test_policy_resolved() -> Result<()> {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::new());
    let address = AccountAddress::random();
    let handle = TableHandle(AccountAddress::random());
    publish_metadata_store(&code, &store, &address, handle)?;
    publish_module_metadata(
        &code,
        &store,
        &address,
        &handle,
        "vault",
        UpgradePolicy::Compatible,
    )?;

    let resolution = code.get_upgrade_policy(&store, &address, "vault");
    assert!(resolution.error().is_none());
    assert_eq!(resolution.policy(), UpgradePolicy::Compatible);

    // the table key carries the publisher, the same name elsewhere is unknown
    let other = AccountAddress::random();
    publish_metadata_store(&code, &store, &other, handle)?;
    assert!(code
        .get_upgrade_policy(&store, &other, "vault")
        .into_result()
        .unwrap_err()
        .is_not_found());
    Ok(())
}

#[test]
fn test_policy_tracks_metadata_updates() -> Result<()> {
    let store = MockStateStore::new();
    let code = code_keeper(MockExecutor::new());
    let address = AccountAddress::ONE;
    let handle = TableHandle(AccountAddress::TWO);
    publish_metadata_store(&code, &store, &address, handle)?;
    publish_module_metadata(
        &code,
        &store,
        &address,
        &handle,
        "code",
        UpgradePolicy::Compatible,
    )?;
    assert_eq!(
        code.get_upgrade_policy(&store, &address, "code").into_result()?,
        UpgradePolicy::Compatible
    );
    publish_module_metadata(
        &code,
        &store,
        &address,
        &handle,
        "code",
        UpgradePolicy::Immutable,
    )?;
    assert_eq!(
        code.get_upgrade_policy(&store, &address, "code").into_result()?,
        UpgradePolicy::Immutable
    );
    Ok(())
}
