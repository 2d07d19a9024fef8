// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

pub mod mock;
mod prefix;

pub use prefix::PrefixStore;

pub type KeyValue = (Vec<u8>, Vec<u8>);

/// A flat, byte ordered key value store.
/// Absent keys are `Ok(None)`; `Err` is reserved for store failures.
pub trait StateStore: std::marker::Send + std::marker::Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;
    fn remove(&self, key: &[u8]) -> Result<()>;
    /// All entries whose key starts with `prefix`, in ascending key order.
    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>>;

    fn contains_key(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: StateStore + ?Sized> StateStore for &T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &[u8]) -> Result<()> {
        (**self).remove(key)
    }

    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>> {
        (**self).iter_prefix(prefix)
    }
}
