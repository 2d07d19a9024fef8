// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{KeyValue, StateStore};
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In memory store, for tests and tooling.
#[derive(Default)]
pub struct MockStateStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MockStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StateStore for MockStateStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.entries.write().insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &[u8]) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>> {
        Ok(self
            .entries
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
