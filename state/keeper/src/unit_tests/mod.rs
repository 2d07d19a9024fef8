// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::mock::MockExecutor;
use crate::MoveKeeper;
use std::sync::Arc;

mod move_keeper_test;

fn mock_keeper() -> Arc<MoveKeeper<MockExecutor>> {
    Arc::new(MoveKeeper::new(MockExecutor::new()))
}
