// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use super::mock_keeper;
use crate::mock::MockExecutor;
use crate::{KeeperError, MoveKeeper};
use movekv_state_api::mock::MockStateStore;
use movekv_state_api::StateStore;
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::ident;
use movekv_vm_types::language_storage::{StructTag, TypeTag};
use movekv_vm_types::state_store::state_key;
use movekv_vm_types::state_store::table::{TableHandle, TableInfo};
use movekv_vm_types::store_keys::{EXECUTION_COUNTER_KEY, VM_STORE_PREFIX};

fn coin_store_tag(coin: &str) -> StructTag {
    let coin_tag = StructTag::new(AccountAddress::ONE, ident!("coin"), ident!(coin), vec![]);
    StructTag::new(
        AccountAddress::ONE,
        ident!("coin"),
        ident!("CoinStore"),
        vec![TypeTag::Struct(Box::new(coin_tag))],
    )
}

#[test]
fn test_resource_read_write() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    let address = AccountAddress::random();
    let tag = coin_store_tag("Coin");

    let err = keeper.get_resource_bytes(&store, &address, &tag).unwrap_err();
    assert!(err.is_not_found(), "{:?}", err);
    assert!(!keeper.has_resource(&store, &address, &tag).unwrap());

    keeper
        .set_resource_bytes(&store, &address, &tag, vec![1, 2, 3])
        .unwrap();
    assert_eq!(
        keeper.get_resource_bytes(&store, &address, &tag).unwrap(),
        vec![1, 2, 3]
    );
    assert!(keeper.has_resource(&store, &address, &tag).unwrap());

    // stored below the vm prefix of the chain store
    let mut raw_key = VM_STORE_PREFIX.to_vec();
    raw_key.extend(state_key::resource_key(&address, &tag).unwrap());
    assert_eq!(store.get(&raw_key).unwrap(), Some(vec![1, 2, 3]));

    keeper.remove_resource(&store, &address, &tag).unwrap();
    assert!(keeper
        .get_resource_bytes(&store, &address, &tag)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_module_read_write() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    keeper
        .set_module_bytes(&store, &AccountAddress::ONE, "code", vec![0xa1, 0x1c])
        .unwrap();
    assert_eq!(
        keeper
            .get_module_bytes(&store, &AccountAddress::ONE, "code")
            .unwrap(),
        vec![0xa1, 0x1c]
    );
    assert!(keeper
        .get_module_bytes(&store, &AccountAddress::TWO, "code")
        .unwrap_err()
        .is_not_found());

    let err = keeper
        .get_module_bytes(&store, &AccountAddress::ONE, "1code")
        .unwrap_err();
    assert!(err.is_encoding(), "{:?}", err);
}

#[test]
fn test_iterate_by_namespace() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    let address = AccountAddress::ONE;
    let handle = TableHandle(address);

    for name in ["coin", "account", "code"] {
        keeper
            .set_module_bytes(&store, &address, name, name.as_bytes().to_vec())
            .unwrap();
    }
    keeper
        .set_resource_bytes(&store, &address, &coin_store_tag("A"), vec![1])
        .unwrap();
    keeper
        .set_resource_bytes(&store, &address, &coin_store_tag("B"), vec![2])
        .unwrap();
    keeper
        .set_table_entry_bytes(&store, &handle, &[9], vec![3])
        .unwrap();
    keeper
        .set_table_info(&store, &handle, &TableInfo::new(TypeTag::U8, TypeTag::U64))
        .unwrap();
    keeper
        .set_module_bytes(&store, &AccountAddress::TWO, "other", vec![4])
        .unwrap();

    let modules = keeper.iterate_modules(&store, &address).unwrap();
    let names: Vec<&str> = modules.iter().map(|(name, _)| name.as_str()).collect();
    // ordered by encoded name, the length prefix sorts shorter names first
    assert_eq!(names, vec!["code", "coin", "account"]);
    assert_eq!(modules[1].1, b"coin".to_vec());

    let resources = keeper.iterate_resources(&store, &address).unwrap();
    assert_eq!(
        resources,
        vec![(coin_store_tag("A"), vec![1]), (coin_store_tag("B"), vec![2])]
    );

    let entries = keeper.iterate_table_entries(&store, &handle).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key_bytes, vec![9]);
    assert_eq!(entries[0].value_bytes, vec![3]);

    assert!(keeper
        .iterate_modules(&store, &AccountAddress::random())
        .unwrap()
        .is_empty());
}

#[test]
fn test_table_info() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    let handle = TableHandle(AccountAddress::random());
    assert!(keeper
        .get_table_info(&store, &handle)
        .unwrap_err()
        .is_not_found());
    let info = TableInfo::new(TypeTag::Vector(Box::new(TypeTag::U8)), TypeTag::Bool);
    keeper.set_table_info(&store, &handle, &info).unwrap();
    assert_eq!(keeper.get_table_info(&store, &handle).unwrap(), info);

    let mut raw_key = VM_STORE_PREFIX.to_vec();
    raw_key.extend(state_key::table_info_key(&handle));
    store.set(raw_key, vec![0xff]).unwrap();
    assert!(keeper
        .get_table_info(&store, &handle)
        .unwrap_err()
        .is_decoding());
}

#[test]
fn test_table_entry() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    let handle = TableHandle(AccountAddress::random());
    let err = keeper
        .get_table_entry_bytes(&store, &handle, b"key")
        .unwrap_err();
    assert!(matches!(err, KeeperError::NotFound { .. }));
    keeper
        .set_table_entry_bytes(&store, &handle, b"key", b"value".to_vec())
        .unwrap();
    let entry = keeper.get_table_entry_bytes(&store, &handle, b"key").unwrap();
    assert_eq!(entry.handle, handle);
    assert_eq!(entry.key_bytes, b"key".to_vec());
    assert_eq!(entry.value_bytes, b"value".to_vec());
}

#[test]
fn test_execute_entry_function() {
    let store = MockStateStore::new();
    let keeper = mock_keeper();
    assert_eq!(keeper.get_execution_counter(&store).unwrap(), 0);
    keeper
        .execute_entry_function(
            &store,
            AccountAddress::TWO,
            AccountAddress::ONE,
            "coin",
            "transfer",
            vec![TypeTag::U64],
            vec![vec![1], vec![2]],
        )
        .unwrap();
    assert_eq!(keeper.get_execution_counter(&store).unwrap(), 1);

    let calls = keeper.executor().calls();
    assert_eq!(calls.len(), 1);
    let (sender, entry_function) = &calls[0];
    assert_eq!(*sender, AccountAddress::TWO);
    assert_eq!(entry_function.to_string(), "0x1::coin::transfer");
    assert_eq!(entry_function.ty_args(), &[TypeTag::U64]);
    assert_eq!(entry_function.args(), &[vec![1], vec![2]]);

    let err = keeper
        .execute_entry_function(
            &store,
            AccountAddress::TWO,
            AccountAddress::ONE,
            "coin",
            "",
            vec![],
            vec![],
        )
        .unwrap_err();
    assert!(err.is_encoding());
    assert_eq!(keeper.executor().calls().len(), 1);
}

#[test]
fn test_vm_error_passed_through() {
    let store = MockStateStore::new();
    let keeper = MoveKeeper::new(MockExecutor::failing("ABORTED: code 0x10001"));
    let err = keeper
        .execute_entry_function(
            &store,
            AccountAddress::ONE,
            AccountAddress::ONE,
            "code",
            "set_allow_arbitrary",
            vec![],
            vec![vec![1]],
        )
        .unwrap_err();
    assert!(err.is_vm_execution());
    assert_eq!(err.to_string(), "ABORTED: code 0x10001");
    // failed executions are not counted
    assert_eq!(keeper.get_execution_counter(&store).unwrap(), 0);
}

#[test]
fn test_corrupted_execution_counter() {
    let store = MockStateStore::new();
    store.set(EXECUTION_COUNTER_KEY.to_vec(), vec![1, 2]).unwrap();
    let keeper = mock_keeper();
    assert!(keeper
        .get_execution_counter(&store)
        .unwrap_err()
        .is_decoding());
}
