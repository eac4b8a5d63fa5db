//! Logger initialization.
//!
//! Plain output is colored and prefixed with an emoji per level; JSON output
//! writes one object per line with `ts`, `level`, `target` and `msg` keys.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides it for the crate itself and
/// as the default for everything else. Noisy dependencies (HTML parsing, the
/// HTTP stack, the DevTools client) are capped independently.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=flight_scan=debug,chromiumoxide=info flight_scan MHD THR 1404-08-14 --backend chromium
/// flight_scan MHD THR 1404-08-14 --log-level debug --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    // The DevTools client logs every unrecognized protocol event at error level
    builder.filter_module("chromiumoxide", LevelFilter::Off);
    builder.filter_module("flight_scan", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    level_emoji(level),
                    record.target().cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    // try_init so repeated initialization (tests) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        ts_millis,
        level,
        target,
        serde_json::to_string(msg).unwrap_or_else(|_| "\"\"".into())
    )
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✈️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}
