// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Keys of the chain level store that hosts the VM keyspace.
//! Everything in `state_store::state_key` lives below `VM_STORE_PREFIX`.

use crate::account_address::AccountAddress;
use anyhow::{ensure, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

pub const EXECUTION_COUNTER_KEY: &[u8] = &[0x11];
pub const VM_STORE_PREFIX: &[u8] = &[0x12];
pub const DEX_PAIR_PREFIX: &[u8] = &[0x14];
pub const PARAMS_KEY: &[u8] = &[0x21];

pub fn dex_pair_key(metadata: &AccountAddress) -> Vec<u8> {
    let mut key = DEX_PAIR_PREFIX.to_vec();
    key.extend_from_slice(metadata.as_ref());
    key
}

pub fn encode_execution_counter(counter: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(8);
    bytes.write_u64::<BigEndian>(counter)?;
    Ok(bytes)
}

pub fn decode_execution_counter(mut bytes: &[u8]) -> Result<u64> {
    ensure!(
        bytes.len() == 8,
        "execution counter must be 8 bytes, got {}",
        bytes.len()
    );
    Ok(bytes.read_u64::<BigEndian>()?)
}
