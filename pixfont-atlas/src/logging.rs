use std::path::PathBuf;

use color_eyre::Report;
use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for file output
    pub file_level: Level,
    /// Log level for console output
    pub console_level: Level,
    /// Directory where log files should be written; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    /// Whether the file layer writes JSON records
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_level: Level::DEBUG,
            console_level: Level::WARN,
            log_dir: Some(Self::default_log_dir()),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        match ProjectDirs::from("", "", "pixfont") {
            // ~/.cache/pixfont, ~/Library/Caches/pixfont, %LOCALAPPDATA%\pixfont\cache
            Some(proj_dirs) => proj_dirs.cache_dir().to_path_buf(),
            None => PathBuf::from("pixfont-logs"),
        }
    }

    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let level = |key: &str| var(key).and_then(|v| v.parse::<Level>().ok());

        if let Some(level) = level("PIXFONT_LOG_LEVEL") {
            config.file_level = level;
            config.console_level = level;
        }

        if let Some(level) = level("PIXFONT_FILE_LOG_LEVEL") {
            config.file_level = level;
        }

        if let Some(level) = level("PIXFONT_CONSOLE_LOG_LEVEL") {
            config.console_level = level;
        }

        if let Some(log_dir) = var("PIXFONT_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        if var("PIXFONT_NO_FILE_LOGS").is_some() {
            config.log_dir = None;
        }

        if var("PIXFONT_JSON_LOGS").is_some() {
            config.json_format = true;
        }

        config
    }
}

/// Initialize the logging system with the given configuration.
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, Report> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "pixfont-atlas.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_filter = EnvFilter::builder()
            .with_default_directive(config.file_level.into())
            .from_env_lossy();

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(file_filter)
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(file_filter)
                .boxed()
        };

        layers.push(file_layer);
    }

    let console_filter = EnvFilter::builder()
        .with_default_directive(config.console_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter)
        .boxed();
    layers.push(console_layer);

    tracing_subscriber::registry().with(layers).init();

    Ok(guard)
}
