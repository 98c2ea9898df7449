//! Save downloaded exports to disk.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::Download;
use crate::error::{AppError, EXIT_LOCAL};

/// Where an export lands: the explicit path, or `default_name` in the
/// current directory. A server-suggested file name wins over the default.
pub fn export_target(explicit: Option<&Path>, download: &Download, default_name: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(download.file_name.as_deref().unwrap_or(default_name)),
    }
}

/// Write an export blob to `path`, returning the byte count.
pub fn write_download(path: &Path, download: &Download) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(AppError::new(
                EXIT_LOCAL,
                format!("Export directory does not exist: {}", parent.display()),
            ));
        }
    }
    let mut file = File::create(path)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to create export '{}': {e}", path.display())))?;
    file.write_all(&download.bytes)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to write export '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = download.bytes.len(), "export saved");
    Ok(download.bytes.len())
}

/// `export_target` + `write_download`.
pub fn save_download(
    explicit: Option<&Path>,
    download: &Download,
    default_name: &str,
) -> Result<PathBuf, AppError> {
    let path = export_target(explicit, download, default_name);
    write_download(&path, download)?;
    Ok(path)
}
