// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{format_err, Result};
use movekv_logger::prelude::LevelFilter;
use movekv_logger::LoggerHandle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub enable_stderr: bool,
    pub log_path: Option<PathBuf>,
    pub max_file_size: u64,
    pub max_backup: u32,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_stderr: true,
            log_path: None,
            max_file_size: 10 * 1024 * 1024,
            max_backup: 2,
        }
    }
}

impl LoggerConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| format_err!("invalid log level: {}", self.level))
    }

    /// Init the global logger and make its appenders match this config.
    pub fn init_logger(&self) -> Result<Arc<LoggerHandle>> {
        self.level_filter()?;
        let handle = movekv_logger::init_with_default_level(&self.level)?;
        if self.enable_stderr {
            handle.enable_stderr()?;
        } else {
            handle.disable_stderr()?;
        }
        match &self.log_path {
            Some(log_path) => {
                handle.enable_file(log_path.clone(), self.max_file_size, self.max_backup)?
            }
            None => handle.disable_file()?,
        }
        Ok(handle)
    }
}
