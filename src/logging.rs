// src/logging.rs

use crate::errors::{MurmurError, MurmurResult};
use crate::models::ApiCallLog;
use flexi_logger::{detailed_format, Duplicate, FileSpec, Logger, LoggerHandle};
use log::info;
use std::path::PathBuf;

/// Starts the file logger. The chat UI owns the terminal, so only the relay
/// echoes to stderr.
pub fn init_logging(level: &str, echo_stderr: bool) -> MurmurResult<LoggerHandle> {
    let directory = log_dir()?;
    let duplicate = if echo_stderr {
        Duplicate::Info
    } else {
        Duplicate::None
    };

    Logger::try_with_env_or_str(level)
        .map_err(|e| MurmurError::config_error(format!("Invalid log level '{}': {}", level, e)))?
        .log_to_file(FileSpec::default().directory(directory).basename("murmur"))
        .duplicate_to_stderr(duplicate)
        .format(detailed_format)
        .start()
        .map_err(|e| MurmurError::config_error(format!("Failed to start logger: {}", e)))
}

fn log_dir() -> MurmurResult<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| MurmurError::config_error("Could not determine a log directory"))?;
    Ok(base.join("murmur").join("logs"))
}

/// Logs an outbound call.
pub fn log_api_call(log: &ApiCallLog) {
    let status = log
        .response_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    info!(
        target: "murmur::api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        status,
        log.response_time_ms
    );
}

/// Shortens a message for log lines.
pub fn summarize(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
