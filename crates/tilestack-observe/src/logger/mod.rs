mod config;
mod error;
mod logger;
mod object;

pub use config::{LOG_COLOR_DISABLE, LOG_FILTER, LOG_FORMAT, LOG_TZ, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Initializes the global tracing subscriber with the given configuration.
///
/// All output goes to stderr: stdout is reserved for the synthesized template.
///
/// # Important: Local Timezone
/// For using `LoggerTimeZone::Local`, call [`init_local_offset`] at the top of
/// `main()` before any other thread exists.
///
/// # Examples
/// ```rust
/// use tilestack_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::info!("Logger initialized successfully");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => logger::logger_text(cfg),
        LoggerFormat::Json => logger::logger_json(cfg),
        LoggerFormat::Journald => logger::logger_journald(cfg),
    }
}
