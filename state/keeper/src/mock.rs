// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::executor::MoveExecutor;
use anyhow::{format_err, Result};
use movekv_state_api::StateStore;
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::transaction::EntryFunction;
use parking_lot::Mutex;

type Handler =
    Box<dyn Fn(&dyn StateStore, &AccountAddress, &EntryFunction) -> Result<()> + Send + Sync>;

/// Records every call, then applies an optional handler standing in for the VM.
pub struct MockExecutor {
    calls: Mutex<Vec<(AccountAddress, EntryFunction)>>,
    handler: Option<Handler>,
}

impl MockExecutor {
    /// Succeeds without touching the store.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            handler: None,
        }
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&dyn StateStore, &AccountAddress, &EntryFunction) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            calls: Mutex::new(vec![]),
            handler: Some(Box::new(handler)),
        }
    }

    /// Fails every call with `msg`.
    pub fn failing(msg: &'static str) -> Self {
        Self::with_handler(move |_, _, _| Err(format_err!(msg)))
    }

    pub fn calls(&self) -> Vec<(AccountAddress, EntryFunction)> {
        self.calls.lock().clone()
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveExecutor for MockExecutor {
    fn execute_entry_function(
        &self,
        ctx: &dyn StateStore,
        sender: AccountAddress,
        entry_function: EntryFunction,
    ) -> Result<()> {
        self.calls.lock().push((sender, entry_function.clone()));
        match &self.handler {
            Some(handler) => handler(ctx, &sender, &entry_function),
            None => Ok(()),
        }
    }
}
