// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical value codec used for both store payloads and entry function arguments.
//! Just a wrap to BCS, with helpers for the primitive values the keeper reads and writes.
use anyhow::Result;
pub use bcs::{Error, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};
use serde::{Deserialize, Serialize};

pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    bcs::to_bytes(value).map_err(|e| e.into())
}

/// Decode `bytes` as `T`. Trailing bytes are rejected.
pub fn from_bytes<'a, T>(bytes: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    bcs::from_bytes(bytes).map_err(|e| e.into())
}

pub fn serialize_bool(value: bool) -> Result<Vec<u8>> {
    to_bytes(&value)
}

pub fn deserialize_bool(bytes: &[u8]) -> Result<bool> {
    from_bytes(bytes)
}

/// Encode a UTF-8 string as a length prefixed byte sequence.
pub fn serialize_str(value: &str) -> Result<Vec<u8>> {
    to_bytes(value)
}

pub fn deserialize_string(bytes: &[u8]) -> Result<String> {
    from_bytes(bytes)
}

pub trait BCSCodec<'a>: Sized {
    fn encode(&self) -> Result<Vec<u8>>;
    fn decode(bytes: &'a [u8]) -> Result<Self>;
}

impl<'a, T> BCSCodec<'a> for T
where
    T: Serialize + Deserialize<'a>,
{
    fn encode(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }

    fn decode(bytes: &'a [u8]) -> Result<Self> {
        from_bytes(bytes)
    }
}

pub trait Sample {
    /// A default construct for generate type Sample data for test or document.
    /// Please ensure return same data when call sample fn.
    fn sample() -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
    struct Flag {
        allow: bool,
    }

    #[test]
    fn test_bool() {
        assert_eq!(serialize_bool(true).unwrap(), vec![1]);
        assert_eq!(serialize_bool(false).unwrap(), vec![0]);
        assert!(deserialize_bool(&[1]).unwrap());
        assert!(!deserialize_bool(&[0]).unwrap());
        // only 0 and 1 are canonical
        assert!(deserialize_bool(&[2]).is_err());
        assert!(deserialize_bool(&[]).is_err());
        assert!(deserialize_bool(&[1, 0]).is_err());
    }

    #[test]
    fn test_single_field_struct_is_its_field() {
        let flag = Flag { allow: true };
        let bytes = flag.encode().unwrap();
        assert_eq!(bytes, serialize_bool(true).unwrap());
        assert_eq!(Flag::decode(bytes.as_slice()).unwrap(), flag);
    }

    #[test]
    fn test_string() {
        let bytes = serialize_str("0x1::code").unwrap();
        assert_eq!(bytes[0] as usize, "0x1::code".len());
        assert_eq!(&bytes[1..], b"0x1::code");
        assert_eq!(deserialize_string(&bytes).unwrap(), "0x1::code");
        // invalid utf8
        assert!(deserialize_string(&[2, 0xff, 0xfe]).is_err());
    }
}
