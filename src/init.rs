//! 日誌初始化

use crate::config::UserSettings;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "pdf_renamer.log";

#[must_use]
pub fn log_file_path() -> PathBuf {
    Path::new(LOG_DIR).join(LOG_FILE_NAME)
}

/// 依設定初始化 env_logger
///
/// `RUST_LOG` 優先於設定檔中的 `log_level`
pub fn init(settings: &UserSettings) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(settings.log_level.as_filter()));
    builder.format_timestamp_secs();

    if settings.log_to_file {
        let path = log_file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log folder {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}
