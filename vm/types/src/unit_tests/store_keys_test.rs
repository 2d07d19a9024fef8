// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::store_keys::*;

#[test]
fn test_store_prefixes_distinct() {
    let prefixes = [EXECUTION_COUNTER_KEY, VM_STORE_PREFIX, DEX_PAIR_PREFIX, PARAMS_KEY];
    for (i, a) in prefixes.iter().enumerate() {
        for b in prefixes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_dex_pair_key() {
    let key = dex_pair_key(&AccountAddress::ONE);
    assert_eq!(key[0], 0x14);
    assert_eq!(&key[1..], AccountAddress::ONE.as_ref());
}

#[test]
fn test_execution_counter_encoding() {
    let bytes = encode_execution_counter(258).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 1, 2]);
    assert_eq!(decode_execution_counter(&bytes).unwrap(), 258);
    assert!(decode_execution_counter(&bytes[1..]).is_err());
}
