use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset, e.g. `"info"` or `"splitbbox=debug"`.
    pub base_level: String,
    /// Daily-rotated log files `<dir>/<prefix>.<date>.log`. `None` logs to the console only.
    pub file: Option<(PathBuf, String)>,
}

impl LogSettings {
    pub fn console(base_level: &str) -> Self {
        Self {
            base_level: base_level.to_string(),
            file: None,
        }
    }

    pub fn with_file(mut self, dir: impl AsRef<Path>, prefix: &str) -> Self {
        self.file = Some((dir.as_ref().to_path_buf(), prefix.to_string()));
        self
    }
}

/// `RUST_LOG` if set and valid, otherwise `base_level`.
fn env_filter(base_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base_level))
        .unwrap_or_else(|e| panic!("Invalid log filter '{}': {}", base_level, e))
}

/// Installs the global subscriber. Warnings and errors go to stderr, the rest
/// to stdout. Panics if called twice or if the log directory cannot be created.
pub fn setup_logging(settings: &LogSettings) {
    let console_writer = std::io::stdout.and(std::io::stderr.with_min_level(Level::WARN));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(console_writer);

    let file_layer = settings.file.as_ref().map(|(dir, prefix)| {
        std::fs::create_dir_all(dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
        let appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(5)
            .build(dir)
            .unwrap_or_else(|e| panic!("Failed to create log file appender: {}", e));

        let (writer, guard) = tracing_appender::non_blocking(appender);
        LOG_GUARD.set(guard).expect("Logging already initialized");

        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(env_filter(&settings.base_level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .unwrap_or_else(|e| panic!("Logger initialization failed: {}", e));
}

/// Routes `tracing` output through the libtest capture. Safe to call from every test.
/// Respects `RUST_LOG`, defaults to "info".
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_test_writer()
        .try_init();
}
