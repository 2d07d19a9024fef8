// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use movekv_state_api::StateStore;
use movekv_vm_types::account_address::AccountAddress;
use movekv_vm_types::transaction::EntryFunction;

/// Runs entry functions against the chain store and commits their write set to it.
pub trait MoveExecutor: std::marker::Send + std::marker::Sync {
    fn execute_entry_function(
        &self,
        ctx: &dyn StateStore,
        sender: AccountAddress,
        entry_function: EntryFunction,
    ) -> Result<()>;
}

impl<T: MoveExecutor + ?Sized> MoveExecutor for std::sync::Arc<T> {
    fn execute_entry_function(
        &self,
        ctx: &dyn StateStore,
        sender: AccountAddress,
        entry_function: EntryFunction,
    ) -> Result<()> {
        (**self).execute_entry_function(ctx, sender, entry_function)
    }
}
