use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_entry::DecryptEntry;
use crate::core::traits::logger::Logger;

/// Verify that the entry's source exists.
pub fn check_source(entry: &DecryptEntry) -> Result<()> {
    if entry.source.exists() {
        Ok(())
    } else {
        Err(DotageError::SourceNotFound {
            path: entry.source.clone(),
        })
    }
}

/// Directory that must exist before `target` can be written.
///
/// Returns `None` for degenerate paths (root, empty) that never need creating.
pub fn target_dir(target: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(target).ok()?;
    let parent = absolute.parent()?;
    if parent.as_os_str().is_empty() || parent.parent().is_none() {
        return None;
    }
    Some(parent.to_path_buf())
}

/// Make sure the directory holding `target` exists, creating it and all
/// missing ancestors.
pub fn ensure_target_dir(target: &Path, log: &dyn Logger) -> Result<()> {
    let Some(dir) = target_dir(target) else {
        return Ok(());
    };
    if dir.is_dir() {
        return Ok(());
    }

    log.lowinfo(&format!("Creating directory: {}", dir.display()));
    create_dir_all(&dir)?;
    log.lowinfo(&format!("Successfully created directory: {}", dir.display()));
    Ok(())
}

/// `fs::create_dir_all` that treats a concurrently created directory as success.
pub fn create_dir_all(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.parent().is_none() {
        return Ok(());
    }

    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(_) if dir.is_dir() => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(DotageError::DirectoryPermission {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => Err(DotageError::DirectoryCreation {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
