use crate::core::error::{GhostEnvError, Result};
use std::path::{Path, PathBuf};

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Resolve a user-supplied file argument to an absolute path, failing when it
/// is missing or not a regular file.
pub fn require_file(path: &Path, what: &str) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(GhostEnvError::FileNotFound(format!(
            "{} not found or not a file: {}",
            what,
            path.display()
        )));
    }
    Ok(std::fs::canonicalize(path)?)
}

pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
