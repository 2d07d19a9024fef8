// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

mod identifier_test;
mod store_keys_test;
