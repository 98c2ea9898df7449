//! Read/write the ranking settings file.
//!
//! A missing file means defaults. The parent directory is created on save.

use std::fs::{self, File};
use std::path::Path;

use crate::error::{AppError, EXIT_LOCAL};
use crate::views::settings::RankingSettings;

pub fn read_settings(path: &Path) -> Result<RankingSettings, AppError> {
    if !path.exists() {
        return Ok(RankingSettings::default());
    }
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to open settings '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Invalid settings JSON '{}': {e}", path.display())))
}

/// Write settings. Callers validate first; this only persists.
pub fn write_settings(path: &Path, settings: &RankingSettings) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::new(EXIT_LOCAL, format!("Failed to create '{}': {e}", parent.display()))
        })?;
    }
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to create settings '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, settings)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to write settings JSON: {e}")))?;
    Ok(())
}
