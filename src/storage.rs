use std::fs;
use std::path::Path;

use crate::error::{AssistantError, Result};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AssistantError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to `path`, creating missing parent directories first.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let to_error = |source: std::io::Error| AssistantError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)
}
