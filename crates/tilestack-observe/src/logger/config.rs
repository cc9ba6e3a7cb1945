use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use tilestack_model::Env;

use crate::logger::{
    error::LoggerResult,
    object::{LoggerFormat, LoggerLevel, LoggerTimeZone},
};

/// Filter expression, e.g. `debug` or `tilestack_synth=trace,info`.
pub const LOG_FILTER: &str = "TILESTACK_LOG";
/// `text`, `json` or `journald`.
pub const LOG_FORMAT: &str = "TILESTACK_LOG_FORMAT";
/// `utc` or `local`.
pub const LOG_TZ: &str = "TILESTACK_LOG_TZ";
/// Any non-empty value disables ANSI colors (<https://no-color.org>).
pub const LOG_COLOR_DISABLE: &str = "NO_COLOR";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "info", "tilestack_synth=debug,info").
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by the `TILESTACK_LOG*` and `NO_COLOR` variables.
    pub fn from_env(env: &Env) -> LoggerResult<Self> {
        let mut cfg = Self::default();
        if let Some(level) = env.optional(LOG_FILTER) {
            cfg.level = level.parse()?;
        }
        if let Some(format) = env.optional(LOG_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(tz) = env.optional(LOG_TZ) {
            cfg.tz = tz.parse()?;
        }
        if env.optional(LOG_COLOR_DISABLE).is_some() {
            cfg.use_color = false;
        }
        Ok(cfg)
    }

    /// Color is used only when enabled in config and stderr is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
