// ABOUTME: Utility functions for the lesson-slides application
// ABOUTME: Provides path validation and safe asset path resolution

use crate::errors::{DeckError, Result};
use std::path::{Component, Path, PathBuf};

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Join a relative asset name onto a base directory, refusing absolute
/// paths and `..` segments so lookups stay inside the base.
pub fn resolve_asset_path(base: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if name.is_empty() || escapes {
        return Err(DeckError::ValidationError(format!(
            "Asset name must be a relative path inside {:?}: {:?}",
            base, name
        )));
    }
    Ok(base.join(relative))
}
