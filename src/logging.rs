use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Local;

static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

pub fn timestamp_prefix() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Picks the log destination once per process. Without a configured path the
/// log stays off unless `QUILL_LOG=1`.
pub fn init(configured: Option<&Path>) {
    let path = configured.map(Path::to_path_buf).or_else(default_log_path);
    let _ = LOG_PATH.set(path);
}

fn default_log_path() -> Option<PathBuf> {
    if std::env::var("QUILL_LOG").ok().as_deref() != Some("1") {
        return None;
    }
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/quill/quill.log"))
}

pub fn info(message: impl AsRef<str>) {
    write_entry("INFO", message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    write_entry("WARN", message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    write_entry("ERROR", message.as_ref());
}

fn write_entry(level: &str, message: &str) {
    let Some(Some(path)) = LOG_PATH.get() else {
        return;
    };
    append_entry(path, level, message);
}

fn append_entry(path: &Path, level: &str, message: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{} {level} {message}", timestamp_prefix());
    }
}
