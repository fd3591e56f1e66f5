use std::path::PathBuf;

use crate::core::errors::Result;
use crate::core::models::decrypt_command::DecryptCommand;

/// Port for the external decrypt tool.
///
/// Implementations live in `adapters::cipher`. The core only builds the
/// argument vector and interprets the outcome.
pub trait Decryptor {
    /// Locate `binary` on the search path.
    fn locate(&self, binary: &str) -> Result<PathBuf>;

    /// Run the command to completion. A non-zero exit is an error carrying
    /// the tool's standard error.
    fn run(&self, command: &DecryptCommand) -> Result<()>;
}
