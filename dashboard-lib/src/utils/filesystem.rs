use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ERRORS_LOG_FILE;
use crate::utils::get_utc_iso_datetime;

/// Centralized function to write error messages to the errors log file
///
/// # Arguments
/// * `error_type` - A description of the error type/category (e.g., "Header Detection Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(error_type: &str, error_message: &str) {
    write_error_to_log_file(Path::new(ERRORS_LOG_FILE), error_type, error_message);
}

pub fn write_error_to_log_file(log_path: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            if let Err(e) = writeln!(file, "{}", log_entry) {
                tracing::warn!(path = %log_path.display(), error = %e, "could not write error log");
            }
        }
        Err(e) => {
            tracing::warn!(path = %log_path.display(), error = %e, "could not open error log");
        }
    }
}

/// Resolve the spreadsheet path.
///
/// Absolute paths and paths that exist relative to the working directory are
/// returned unchanged. Other relative paths are resolved against the directory
/// holding the running executable, so the default `dashboard.xlsx` can sit
/// next to the binary.
pub fn resolve_input_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }

    let beside_executable = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)));

    match beside_executable {
        Some(candidate) if candidate.exists() => candidate,
        _ => path.to_path_buf(),
    }
}
