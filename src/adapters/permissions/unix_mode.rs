use std::path::Path;

use crate::core::errors::{DotageError, Result};
use crate::core::traits::permissions::PermissionSetter;

/// Applies the mask verbatim with `chmod`.
#[derive(Debug, Default)]
pub struct UnixModeSetter;

impl PermissionSetter for UnixModeSetter {
    #[cfg(unix)]
    fn apply(&self, path: &Path, mask: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mask)).map_err(|e| {
            DotageError::PermissionFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    #[cfg(not(unix))]
    fn apply(&self, path: &Path, _mask: u32) -> Result<()> {
        Err(DotageError::PermissionFailed {
            path: path.to_path_buf(),
            reason: "native permission bits are not available on this platform".into(),
        })
    }

    fn describe(&self, path: &Path, mask: u32) -> String {
        format!("Set Unix permissions on {} to {mask:#o}", path.display())
    }
}
