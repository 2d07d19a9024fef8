// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layout of VM state in the flat key value store.
//!
//! Every key is `address || separator || qualifier`. The address is always
//! `AccountAddress::LENGTH` bytes, so the separator sits at a fixed offset and the four
//! namespaces under one address never share a prefix.
//!
//! | namespace   | separator | qualifier                 |
//! |-------------|-----------|---------------------------|
//! | module code | `0x00`    | bcs(module identifier)    |
//! | resource    | `0x01`    | bcs(struct tag)           |
//! | table entry | `0x02`    | raw, caller encoded key   |
//! | table info  | `0x03`    | none                      |

use crate::account_address::AccountAddress;
use crate::identifier::Identifier;
use crate::language_storage::{ModuleId, StructTag};
use crate::state_store::table::TableHandle;
use anyhow::{bail, ensure, format_err, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::convert::TryFrom;
use std::fmt;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum KeySeparator {
    Module = 0,
    Resource = 1,
    TableEntry = 2,
    TableInfo = 3,
}

impl KeySeparator {
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

fn prefix(address: &AccountAddress, separator: KeySeparator) -> Vec<u8> {
    let mut key = Vec::with_capacity(AccountAddress::LENGTH + 1);
    key.extend_from_slice(address.as_ref());
    key.push(separator.as_byte());
    key
}

fn with_qualifier(
    address: &AccountAddress,
    separator: KeySeparator,
    qualifier: &[u8],
) -> Vec<u8> {
    let mut key = prefix(address, separator);
    key.extend_from_slice(qualifier);
    key
}

/// Prefix of all modules published at `address`.
pub fn module_prefix(address: &AccountAddress) -> Vec<u8> {
    prefix(address, KeySeparator::Module)
}

/// Key of the module `module_name` published at `address`.
/// Fails if `module_name` is not a valid identifier.
pub fn module_key(address: &AccountAddress, module_name: &str) -> Result<Vec<u8>> {
    let identifier = Identifier::new(module_name)?;
    module_key_by_identifier(address, &identifier)
}

pub fn module_key_by_identifier(address: &AccountAddress, name: &Identifier) -> Result<Vec<u8>> {
    let encoded = bcs_ext::to_bytes(name)?;
    Ok(with_qualifier(address, KeySeparator::Module, &encoded))
}

pub fn module_key_by_id(module_id: &ModuleId) -> Result<Vec<u8>> {
    module_key_by_identifier(module_id.address(), module_id.name())
}

/// Prefix of all resources stored at `address`.
pub fn resource_prefix(address: &AccountAddress) -> Vec<u8> {
    prefix(address, KeySeparator::Resource)
}

pub fn resource_key(address: &AccountAddress, struct_tag: &StructTag) -> Result<Vec<u8>> {
    let encoded = bcs_ext::to_bytes(struct_tag)
        .map_err(|e| format_err!("Failed to serialize struct tag {}: {}", struct_tag, e))?;
    Ok(with_qualifier(address, KeySeparator::Resource, &encoded))
}

pub fn table_info_key(handle: &TableHandle) -> Vec<u8> {
    prefix(handle.address(), KeySeparator::TableInfo)
}

pub fn table_entry_prefix(handle: &TableHandle) -> Vec<u8> {
    prefix(handle.address(), KeySeparator::TableEntry)
}

/// `raw_key` is already encoded by the caller according to the table key type.
pub fn table_entry_key(handle: &TableHandle, raw_key: &[u8]) -> Vec<u8> {
    with_qualifier(handle.address(), KeySeparator::TableEntry, raw_key)
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum DataPath {
    Code(Identifier),
    Resource(StructTag),
    TableEntry(Vec<u8>),
    TableInfo,
}

impl DataPath {
    pub fn separator(&self) -> KeySeparator {
        match self {
            DataPath::Code(_) => KeySeparator::Module,
            DataPath::Resource(_) => KeySeparator::Resource,
            DataPath::TableEntry(_) => KeySeparator::TableEntry,
            DataPath::TableInfo => KeySeparator::TableInfo,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, DataPath::Code(_))
    }

    pub fn as_module_name(&self) -> Option<&Identifier> {
        match self {
            DataPath::Code(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_struct_tag(&self) -> Option<&StructTag> {
        match self {
            DataPath::Resource(struct_tag) => Some(struct_tag),
            _ => None,
        }
    }

    pub fn as_table_key(&self) -> Option<&[u8]> {
        match self {
            DataPath::TableEntry(key) => Some(key.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPath::Code(name) => write!(f, "Code({})", name),
            DataPath::Resource(struct_tag) => write!(f, "Resource({})", struct_tag),
            DataPath::TableEntry(key) => write!(f, "TableEntry(0x{})", hex::encode(key)),
            DataPath::TableInfo => write!(f, "TableInfo"),
        }
    }
}

/// A decoded store key.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StateKey {
    pub address: AccountAddress,
    pub path: DataPath,
}

impl StateKey {
    pub fn new(address: AccountAddress, path: DataPath) -> Self {
        Self { address, path }
    }

    pub fn module(address: AccountAddress, name: Identifier) -> Self {
        Self::new(address, DataPath::Code(name))
    }

    pub fn resource(address: AccountAddress, struct_tag: StructTag) -> Self {
        Self::new(address, DataPath::Resource(struct_tag))
    }

    pub fn table_entry(handle: TableHandle, key: Vec<u8>) -> Self {
        Self::new(handle.0, DataPath::TableEntry(key))
    }

    pub fn table_info(handle: TableHandle) -> Self {
        Self::new(handle.0, DataPath::TableInfo)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        match &self.path {
            DataPath::Code(name) => module_key_by_identifier(&self.address, name),
            DataPath::Resource(struct_tag) => resource_key(&self.address, struct_tag),
            DataPath::TableEntry(key) => Ok(table_entry_key(&TableHandle(self.address), key)),
            DataPath::TableInfo => Ok(table_info_key(&TableHandle(self.address))),
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() > AccountAddress::LENGTH,
            "state key too short: {} bytes",
            bytes.len()
        );
        let (address, rest) = bytes.split_at(AccountAddress::LENGTH);
        let address = AccountAddress::from_bytes(address)?;
        let separator = KeySeparator::try_from(rest[0])
            .map_err(|_| format_err!("unknown state key separator: {:#04x}", rest[0]))?;
        let qualifier = &rest[1..];
        let path = match separator {
            KeySeparator::Module => DataPath::Code(bcs_ext::from_bytes(qualifier)?),
            KeySeparator::Resource => DataPath::Resource(bcs_ext::from_bytes(qualifier)?),
            KeySeparator::TableEntry => DataPath::TableEntry(qualifier.to_vec()),
            KeySeparator::TableInfo => {
                if !qualifier.is_empty() {
                    bail!("table info key must not carry a qualifier");
                }
                DataPath::TableInfo
            }
        };
        Ok(Self { address, path })
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.path)
    }
}
