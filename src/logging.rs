//! Logging configuration using the tracing framework
//!
//! Logs are filtered with the `RUST_LOG` environment variable and default to
//! `cssd_roster=info,warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "cssd_roster=info,warn";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize console logging for the command-line commands
///
/// # Environment Variables
///
/// - `RUST_LOG`: log level filter, e.g.
///   - `RUST_LOG=debug` - all debug logs
///   - `RUST_LOG=cssd_roster::api=debug` - backend requests only
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Initialize logging to a daily rolling file only.
///
/// The interactive UI owns the terminal, so nothing may be written to stdout
/// or stderr while it runs. The returned guard must be held until exit so
/// buffered lines get flushed.
pub fn init_with_file(
    log_file_name: &str,
) -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn std::error::Error>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = if let Some(proj_dirs) = crate::config::project_dirs() {
        let log_path = proj_dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_path)?;
        log_path
    } else {
        std::env::current_dir()?
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}

/// Initialize logging for tests. Only errors are shown by default.
#[allow(dead_code)]
pub fn init_test() {
    tracing_subscriber::registry()
        .with(env_filter("error"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .ok();
}
