// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rust views of the resources published by the `0x1::code` module.

use crate::account_address::AccountAddress;
use crate::state_store::table::TableHandle;
use anyhow::{ensure, format_err, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

pub const CODE_MODULE_NAME: &str = "code";
pub const MODULE_STORE_RESOURCE_NAME: &str = "ModuleStore";
pub const METADATA_STORE_RESOURCE_NAME: &str = "MetadataStore";
pub const SET_ALLOW_ARBITRARY_FUNCTION_NAME: &str = "set_allow_arbitrary";

/// Whether and how a published module may be replaced.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum UpgradePolicy {
    /// Any upgrade is allowed, no compatibility checks.
    Arbitrary = 0,
    /// Upgrades must keep storage and public API compatible.
    Compatible = 1,
    /// The module can not be upgraded.
    Immutable = 2,
}

impl UpgradePolicy {
    /// The policy reported alongside every resolution error.
    pub const fn fail_safe() -> Self {
        UpgradePolicy::Arbitrary
    }
}

impl fmt::Display for UpgradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpgradePolicy::Arbitrary => "ARBITRARY",
            UpgradePolicy::Compatible => "COMPATIBLE",
            UpgradePolicy::Immutable => "IMMUTABLE",
        };
        write!(f, "{}", name)
    }
}

/// `0x1::code::ModuleStore`, holds the global allow_arbitrary flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModuleStore {
    pub allow_arbitrary: bool,
}

impl ModuleStore {
    /// Read the leading `allow_arbitrary` field, fields after it are not interpreted.
    pub fn read_allow_arbitrary(bytes: &[u8]) -> Result<bool> {
        let first = bytes
            .first()
            .ok_or_else(|| format_err!("module store is empty"))?;
        bcs_ext::deserialize_bool(std::slice::from_ref(first))
    }
}

/// On chain layout of `0x1::table::Table<K, V>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub handle: TableHandle,
    pub length: u64,
}

/// `0x1::code::MetadataStore`, published at every account that publishes modules.
/// `metadata` maps module id strings (`0x1::code`) to `ModuleMetadata`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MetadataStore {
    pub metadata: Table,
}

impl MetadataStore {
    /// Read the metadata table handle, which is the leading field of the resource.
    /// Fields after the handle are not interpreted.
    pub fn read_table_handle(bytes: &[u8]) -> Result<TableHandle> {
        ensure!(
            bytes.len() >= AccountAddress::LENGTH,
            "metadata store too short: expect at least {} bytes, got {}",
            AccountAddress::LENGTH,
            bytes.len()
        );
        let address = AccountAddress::from_bytes(&bytes[..AccountAddress::LENGTH])?;
        Ok(TableHandle(address))
    }
}

/// Value type of the metadata table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub upgrade_policy: u8,
}

impl ModuleMetadata {
    pub fn new(upgrade_policy: UpgradePolicy) -> Self {
        Self {
            upgrade_policy: upgrade_policy.into(),
        }
    }

    pub fn upgrade_policy(&self) -> Result<UpgradePolicy> {
        UpgradePolicy::try_from(self.upgrade_policy)
            .map_err(|_| format_err!("unknown upgrade policy: {}", self.upgrade_policy))
    }

    /// Decode a metadata table value and extract its policy.
    pub fn read_upgrade_policy(bytes: &[u8]) -> Result<UpgradePolicy> {
        bcs_ext::from_bytes::<ModuleMetadata>(bytes)?.upgrade_policy()
    }
}
