// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{KeyValue, StateStore};
use anyhow::Result;

/// View of the sub-keyspace of `parent` below `prefix`.
/// Keys passed in and returned are relative to the prefix.
pub struct PrefixStore<S> {
    parent: S,
    prefix: Vec<u8>,
}

impl<S: StateStore> PrefixStore<S> {
    pub fn new(parent: S, prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            parent,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full_key = Vec::with_capacity(self.prefix.len() + key.len());
        full_key.extend_from_slice(&self.prefix);
        full_key.extend_from_slice(key);
        full_key
    }
}

impl<S: StateStore> StateStore for PrefixStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.parent.get(&self.full_key(key))
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.parent.set(self.full_key(&key), value)
    }

    fn remove(&self, key: &[u8]) -> Result<()> {
        self.parent.remove(&self.full_key(key))
    }

    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>> {
        let prefix_len = self.prefix.len();
        Ok(self
            .parent
            .iter_prefix(&self.full_key(prefix))?
            .into_iter()
            .map(|(key, value)| (key[prefix_len..].to_vec(), value))
            .collect())
    }
}
