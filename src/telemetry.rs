//! Tracing setup.
//!
//! STUDYQUIZ_LOG sets the filter (default "info"); STUDYQUIZ_LOG_FORMAT=json
//! switches to JSON lines. The terminal belongs to the TUI, so output goes to
//! a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "studyquiz")
        .map(|dirs| dirs.data_local_dir().join("studyquiz.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("studyquiz.log"))
}

pub fn init_tracing(log_file: &Path) -> Result<(), String> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create log dir {}: {}", parent.display(), e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| format!("Cannot open log file {}: {}", log_file.display(), e))?;

    let filter =
        EnvFilter::try_from_env("STUDYQUIZ_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let installed = match std::env::var("STUDYQUIZ_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| format!("Cannot install log subscriber: {}", e))
}
