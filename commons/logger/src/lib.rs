// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{format_err, Result};
use lazy_static::lazy_static;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::policy::compound::{
            roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
        },
        rolling_file::RollingFileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    Handle,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};

/// Logger prelude which includes all logging macros.
pub mod prelude {
    pub use log::{debug, error, info, log_enabled, trace, warn, Level, LevelFilter};
}


#[derive(Debug, Clone, PartialEq, Eq)]
struct LoggerConfigArg {
    enable_stderr: bool,
    level: LevelFilter,
    log_path: Option<PathBuf>,
    max_file_size: u64,
    max_backup: u32,
}

impl LoggerConfigArg {
    fn new(enable_stderr: bool, level: LevelFilter) -> Self {
        Self {
            enable_stderr,
            level,
            log_path: None,
            max_file_size: 0,
            max_backup: 0,
        }
    }
}

/// Runtime handle of the global logger, the appenders and level can be changed after init.
pub struct LoggerHandle {
    arg: Mutex<LoggerConfigArg>,
    handle: Handle,
}

impl LoggerHandle {
    fn new(arg: LoggerConfigArg, handle: Handle) -> Self {
        Self {
            arg: Mutex::new(arg),
            handle,
        }
    }

    fn current(&self) -> LoggerConfigArg {
        self.arg
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn enable_stderr(&self) -> Result<()> {
        let mut arg = self.current();
        arg.enable_stderr = true;
        self.update_logger(arg)
    }

    pub fn disable_stderr(&self) -> Result<()> {
        let mut arg = self.current();
        arg.enable_stderr = false;
        self.update_logger(arg)
    }

    pub fn enable_file(
        &self,
        log_path: PathBuf,
        max_file_size: u64,
        max_backup: u32,
    ) -> Result<()> {
        let mut arg = self.current();
        arg.log_path = Some(log_path);
        arg.max_file_size = max_file_size;
        arg.max_backup = max_backup;
        self.update_logger(arg)
    }

    pub fn disable_file(&self) -> Result<()> {
        let mut arg = self.current();
        arg.log_path = None;
        self.update_logger(arg)
    }

    pub fn update_level(&self, level: LevelFilter) -> Result<()> {
        let mut arg = self.current();
        arg.level = level;
        self.update_logger(arg)
    }

    fn update_logger(&self, arg: LoggerConfigArg) -> Result<()> {
        let mut origin_arg = self
            .arg
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *origin_arg != arg {
            let config = build_config(arg.clone())?;
            *origin_arg = arg;
            self.handle.set_config(config);
        }
        Ok(())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.current().log_path
    }

    pub fn stderr(&self) -> bool {
        self.current().enable_stderr
    }

    pub fn level(&self) -> LevelFilter {
        self.current().level
    }
}

const LOG_PATTERN: &str = "{d} {l} {M}::{f}::{L} - {m}{n}";

fn build_config(arg: LoggerConfigArg) -> Result<Config> {
    let LoggerConfigArg {
        enable_stderr,
        level,
        log_path,
        max_file_size,
        max_backup,
    } = arg;
    let mut builder = Config::builder();
    let mut root_builder = Root::builder();
    if enable_stderr {
        let stderr = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .target(Target::Stderr)
            .build();
        builder = builder.appender(Appender::builder().build("stderr", Box::new(stderr)));
        root_builder = root_builder.appender("stderr");
    }
    if let Some(log_path) = log_path {
        let log_file_backup_pattern = format!(
            "{}.{{}}.gz",
            log_path
                .to_str()
                .ok_or_else(|| format_err!("invalid log path: {:?}", log_path))?
        );
        let file_appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(
                log_path,
                Box::new(CompoundPolicy::new(
                    Box::new(SizeTrigger::new(max_file_size)),
                    Box::new(
                        FixedWindowRoller::builder()
                            .build(log_file_backup_pattern.as_str(), max_backup)
                            .map_err(|e| format_err!("{:?}", e))?,
                    ),
                )),
            )?;

        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root_builder = root_builder.appender("file");
    }

    builder
        .build(root_builder.build(level))
        .map_err(|e| e.into())
}

/// Resolve the level from `RUST_LOG`, falling back to `default_level` when unset or unparsable.
pub fn env_log_level(default_level: &str) -> LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .or_else(|| default_level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

lazy_static! {
    static ref LOGGER_HANDLE: Mutex<Option<Arc<LoggerHandle>>> = Mutex::new(None);
}

static LOG_INIT: Once = Once::new();

pub fn init() -> Result<Arc<LoggerHandle>> {
    init_with_default_level("info")
}

pub fn init_with_default_level(default_level: &str) -> Result<Arc<LoggerHandle>> {
    let level = env_log_level(default_level);
    let mut init_result = Ok(());
    LOG_INIT.call_once(|| {
        init_result = (|| -> Result<()> {
            let arg = LoggerConfigArg::new(true, level);
            let config = build_config(arg.clone())?;
            let handle = log4rs::init_config(config)?;
            *LOGGER_HANDLE
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) =
                Some(Arc::new(LoggerHandle::new(arg, handle)));
            Ok(())
        })();
    });
    init_result?;

    let logger_handle = LOGGER_HANDLE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .as_ref()
        .cloned()
        .ok_or_else(|| format_err!("logger handle must has been set."))?;
    if logger_handle.level() != level {
        logger_handle.update_level(level)?;
    }
    Ok(logger_handle)
}

pub fn init_for_test() -> Arc<LoggerHandle> {
    init_with_default_level("debug").expect("init test logger should success.")
}
