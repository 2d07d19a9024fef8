// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod account_address;
pub mod code;
pub mod identifier;
pub mod language_storage;
pub mod state_store;
pub mod store_keys;
pub mod transaction;

#[cfg(test)]
mod unit_tests;
