use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a whole file, naming the path in the error.
pub(crate) fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path exists but is not a file: {}", path.display());
    }
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Create the parent directory of `path` if it doesn't exist.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
