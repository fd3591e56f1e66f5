use std::fs;
use std::path::Path;

use crate::core::errors::{DotageError, Result};
use crate::core::traits::permissions::{OWNER_WRITE, PermissionSetter};

/// Approximates a mask with the read-only flag for filesystems without
/// Unix permission bits: read-only iff the owner-write bit is clear.
#[derive(Debug, Default)]
pub struct ReadOnlyAttributeSetter;

impl PermissionSetter for ReadOnlyAttributeSetter {
    fn apply(&self, path: &Path, mask: u32) -> Result<()> {
        let failed = |e: std::io::Error| DotageError::PermissionFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut permissions = fs::metadata(path).map_err(failed)?.permissions();
        permissions.set_readonly(mask & OWNER_WRITE == 0);
        fs::set_permissions(path, permissions).map_err(failed)
    }

    fn describe(&self, path: &Path, mask: u32) -> String {
        if mask & OWNER_WRITE == 0 {
            format!("Set read-only attribute on {}", path.display())
        } else {
            format!("Removed read-only attribute from {}", path.display())
        }
    }
}
