// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod helper;
mod keeper_config;
mod logger_config;

pub use keeper_config::KeeperConfig;
pub use logger_config::LoggerConfig;

pub static CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveConfig {
    pub logger: LoggerConfig,
    pub keeper: KeeperConfig,
}

impl MoveConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        helper::load_config(path)
    }

    /// Load `path` if it exists, otherwise write the default config there.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        helper::save_config(self, path)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        helper::parse(s)
    }

    pub fn to_toml(&self) -> Result<String> {
        helper::to_toml(self)
    }
}
