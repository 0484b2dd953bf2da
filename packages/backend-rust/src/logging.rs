use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "adaptive-quiz.log";

/// Keeps the non-blocking file writer alive; drop it last.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Where daily-rotated log files go, when file output is switched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogSettings {
    pub dir: PathBuf,
}

impl FileLogSettings {
    /// `ENABLE_FILE_LOGS=true|1` turns file output on; `LOG_DIR` defaults to `./logs`.
    pub fn from_env() -> Option<Self> {
        Self::parse(
            std::env::var("ENABLE_FILE_LOGS").ok().as_deref(),
            std::env::var("LOG_DIR").ok().as_deref(),
        )
    }

    fn parse(enabled: Option<&str>, dir: Option<&str>) -> Option<Self> {
        let enabled = matches!(enabled.map(str::trim), Some("true") | Some("1"));
        if !enabled {
            return None;
        }
        let dir = dir
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("./logs");
        Some(Self {
            dir: PathBuf::from(dir),
        })
    }
}

pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    let file_output = FileLogSettings::from_env().and_then(|settings| {
        match std::fs::create_dir_all(&settings.dir) {
            Ok(()) => Some(settings),
            Err(err) => {
                eprintln!("failed to create log directory {}: {err}", settings.dir.display());
                None
            }
        }
    });

    let Some(settings) = file_output else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_layer)
            .init();
        return None;
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &settings.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::info!(dir = %settings.dir.display(), "file logging enabled");
    Some(FileLogGuard { _guard: guard })
}
