// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Module, struct and function names.
//!
//! A valid identifier is non-empty, starts with an ASCII letter or `_`, and continues
//! with ASCII alphanumerics or `_`. A lone `_` is reserved and rejected.

use anyhow::{bail, Result};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

pub const fn is_valid_identifier_char(c: char) -> bool {
    matches!(c, '_' | 'a'..='z' | 'A'..='Z' | '0'..='9')
}

pub fn is_valid(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('a'..='z') | Some('A'..='Z') => chars.all(is_valid_identifier_char),
        Some('_') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(is_valid_identifier_char)
        }
        _ => false,
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Identifier(Box<str>);

impl Identifier {
    pub fn new(s: impl Into<Box<str>>) -> Result<Self> {
        let s = s.into();
        if !is_valid(&s) {
            bail!("Invalid identifier '{}'", s);
        }
        Ok(Self(s))
    }

    pub fn is_valid(s: impl AsRef<str>) -> bool {
        is_valid(s.as_ref())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0.into()
    }
}

impl FromStr for Identifier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <String>::deserialize(deserializer)?;
        Identifier::new(s).map_err(D::Error::custom)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0)
    }
}

/// Build an `Identifier` from a literal known to be valid.
#[macro_export]
macro_rules! ident {
    ($s:expr) => {
        $crate::identifier::Identifier::new($s).expect("literal identifier must be valid")
    };
}
