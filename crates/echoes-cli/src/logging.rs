//! Process-wide logger bootstrap.
//!
//! The binary starts `flexi_logger` once, writing to stderr so stdout stays
//! clean for `--json` output. Library crates only use the `log` facade.

use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::info;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Starts logging at `level`.
///
/// Calling again with the same level is a no-op; switching levels after
/// start is rejected.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                state.level, level
            ));
        }
        return Ok(());
    }

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let _ = LOGGING_STATE.set(LoggingState {
        level,
        _logger: logger,
    });

    info!(
        "event=app_start status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

/// Level the logger was started with, if any.
pub fn active_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}
