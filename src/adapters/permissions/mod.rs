pub mod readonly_attribute;
pub mod unix_mode;

use crate::core::traits::permissions::{PermissionSetter, Platform};

use readonly_attribute::ReadOnlyAttributeSetter;
use unix_mode::UnixModeSetter;

/// Pick the permission strategy for `platform`.
pub fn for_platform(platform: Platform) -> Box<dyn PermissionSetter> {
    match platform {
        Platform::Unix => Box::new(UnixModeSetter),
        Platform::ReadOnlyAttribute => Box::new(ReadOnlyAttributeSetter),
    }
}
