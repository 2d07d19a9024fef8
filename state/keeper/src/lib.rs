// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

mod code;
mod errors;
mod executor;
pub mod mock;
mod move_keeper;

pub use code::{CodeKeeper, CodeNames, PolicyResolution};
pub use errors::{KeeperError, KeeperResult};
pub use executor::MoveExecutor;
pub use move_keeper::{MoveKeeper, TableEntry};

#[cfg(test)]
mod unit_tests;
