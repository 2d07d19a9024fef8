// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod state_key;
pub mod table;
