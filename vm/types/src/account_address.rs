// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use bcs_ext::Sample;
use rand::{rngs::OsRng, Rng};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A struct that represents an account address.
/// Also used as the identifier of published modules and of table instances.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AccountAddressParseError {
    #[error("address hex string `{0}` is invalid")]
    InvalidHex(String),
    #[error("address length must be at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("address bytes length must be {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl AccountAddress {
    /// The number of bytes in an address.
    pub const LENGTH: usize = 32;

    /// Hex address: 0x0
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    /// Hex address: 0x1
    pub const ONE: Self = Self::get_hex_address_one();

    /// Hex address: 0x2
    pub const TWO: Self = Self::get_hex_address_two();

    pub const fn new(address: [u8; Self::LENGTH]) -> Self {
        Self(address)
    }

    const fn get_hex_address_one() -> Self {
        let mut addr = [0u8; Self::LENGTH];
        addr[Self::LENGTH - 1] = 1u8;
        Self(addr)
    }

    const fn get_hex_address_two() -> Self {
        let mut addr = [0u8; Self::LENGTH];
        addr[Self::LENGTH - 1] = 2u8;
        Self(addr)
    }

    pub fn random() -> Self {
        let mut rng = OsRng;
        let buf: [u8; Self::LENGTH] = rng.gen();
        Self(buf)
    }

    /// Parse `0x` prefixed hex, shorter literals are left padded with zero.
    pub fn from_hex_literal(literal: &str) -> Result<Self, AccountAddressParseError> {
        let hex = literal
            .strip_prefix("0x")
            .ok_or_else(|| AccountAddressParseError::InvalidHex(literal.to_string()))?;
        Self::from_short_hex(hex)
    }

    /// Parse hex without the `0x` prefix, it must be the full width.
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, AccountAddressParseError> {
        let bytes = hex::decode(hex.as_ref()).map_err(|_| {
            AccountAddressParseError::InvalidHex(String::from_utf8_lossy(hex.as_ref()).into())
        })?;
        Self::from_bytes(bytes)
    }

    fn from_short_hex(hex: &str) -> Result<Self, AccountAddressParseError> {
        if hex.is_empty() {
            return Err(AccountAddressParseError::InvalidHex(hex.to_string()));
        }
        let max = Self::LENGTH * 2;
        if hex.len() > max {
            return Err(AccountAddressParseError::TooLong {
                max: Self::LENGTH,
                actual: (hex.len() + 1) / 2,
            });
        }
        let padded = format!("{:0>width$}", hex, width = max);
        Self::from_hex(padded)
    }

    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Self, AccountAddressParseError> {
        <[u8; Self::LENGTH]>::try_from(bytes.as_ref())
            .map(Self)
            .map_err(|_| AccountAddressParseError::InvalidLength {
                expected: Self::LENGTH,
                actual: bytes.as_ref().len(),
            })
    }

    pub fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Full width lowercase hex, without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Shortest `0x` literal, leading zeros trimmed: `0x1`.
    pub fn short_str_lossless(&self) -> String {
        let hex = self.to_hex();
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_str_lossless())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_str_lossless())
    }
}

impl fmt::LowerHex for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = AccountAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x") {
            Some(hex) => Self::from_short_hex(hex),
            None => Self::from_hex(s),
        }
    }
}

impl TryFrom<&[u8]> for AccountAddress {
    type Error = AccountAddressParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; AccountAddress::LENGTH]> for AccountAddress {
    fn from(bytes: [u8; AccountAddress::LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Sample for AccountAddress {
    fn sample() -> Self {
        Self::ONE
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            self.short_str_lossless().serialize(serializer)
        } else {
            // fixed width, no length prefix
            serializer.serialize_newtype_struct("AccountAddress", &self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String>::deserialize(deserializer)?;
            AccountAddress::from_str(&s).map_err(D::Error::custom)
        } else {
            #[derive(Deserialize)]
            #[serde(rename = "AccountAddress")]
            struct Value([u8; AccountAddress::LENGTH]);

            let value = Value::deserialize(deserializer)?;
            Ok(AccountAddress::new(value.0))
        }
    }
}
