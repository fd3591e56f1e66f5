use std::path::Path;

use crate::core::errors::Result;

/// Owner-write bit of a Unix permission mask.
pub const OWNER_WRITE: u32 = 0o200;

/// Strategy for applying a permission mask to a decrypted file.
pub trait PermissionSetter {
    /// Apply `mask` to `path`. Callers treat failures as warnings.
    fn apply(&self, path: &Path, mask: u32) -> Result<()>;

    /// Short description used in log messages.
    fn describe(&self, path: &Path, mask: u32) -> String;
}

/// Whether the host filesystem carries native Unix permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    ReadOnlyAttribute,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(unix) {
            Platform::Unix
        } else {
            Platform::ReadOnlyAttribute
        }
    }
}
