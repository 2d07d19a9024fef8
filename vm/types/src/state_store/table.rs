// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::{AccountAddress, AccountAddressParseError};
use crate::language_storage::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TableHandle(pub AccountAddress);

impl TableHandle {
    pub fn address(&self) -> &AccountAddress {
        &self.0
    }
}

impl FromStr for TableHandle {
    type Err = AccountAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let handle = AccountAddress::from_str(s)?;
        Ok(Self(handle))
    }
}

impl From<AccountAddress> for TableHandle {
    fn from(address: AccountAddress) -> Self {
        Self(address)
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared key and value types of a table, stored under its table info key.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub key_type: TypeTag,
    pub value_type: TypeTag,
}

impl TableInfo {
    pub fn new(key_type: TypeTag, value_type: TypeTag) -> Self {
        Self {
            key_type,
            value_type,
        }
    }
}
