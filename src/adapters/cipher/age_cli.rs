use std::path::PathBuf;
use std::process::Command;

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_command::DecryptCommand;
use crate::core::traits::decryptor::Decryptor;

/// Decrypt backend that shells out to an age-compatible binary
/// (`age`, `rage`, ...).
///
/// The child runs in the current working directory with stdout and stderr
/// captured. Passphrase prompts go through the terminal, not stdin.
#[derive(Debug, Default)]
pub struct AgeCli;

impl Decryptor for AgeCli {
    fn locate(&self, binary: &str) -> Result<PathBuf> {
        which::which(binary).map_err(|_| DotageError::BinaryNotFound {
            binary: binary.to_string(),
        })
    }

    fn run(&self, command: &DecryptCommand) -> Result<()> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|e| DotageError::SpawnFailed {
                source_path: command.source.clone(),
                reason: format!("failed to run {}: {e}", command.program.display()),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(stdout = %stdout.trim(), "decrypt tool output");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = match stderr.trim() {
                "" => format!("{} exited with {}", command.program.display(), output.status),
                text => text.to_string(),
            };
            return Err(DotageError::DecryptionFailed {
                source_path: command.source.clone(),
                stderr,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::decrypt_command::KeySelection;
    use std::path::Path;

    #[test]
    fn unknown_binary_is_not_found() {
        let err = AgeCli.locate("dotage-no-such-age-binary").unwrap_err();
        assert!(matches!(err, DotageError::BinaryNotFound { ref binary } if binary == "dotage-no-such-age-binary"));
    }

    #[test]
    fn vanished_binary_is_a_spawn_failure() {
        let command = DecryptCommand::new(
            PathBuf::from("/nonexistent/dotage/age"),
            Path::new("out"),
            &KeySelection::ToolDefault,
            Path::new("in.age"),
        );

        let err = AgeCli.run(&command).unwrap_err();
        assert!(matches!(err, DotageError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_surfaces_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("age");
        std::fs::write(&script, "#!/bin/sh\necho 'age: error: bad header' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let program = AgeCli.locate(script.to_str().unwrap()).unwrap();
        let command = DecryptCommand::new(
            program,
            &dir.path().join("out"),
            &KeySelection::ToolDefault,
            &dir.path().join("in.age"),
        );

        let err = AgeCli.run(&command).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to decrypt {}: age: error: bad header", dir.path().join("in.age").display())
        );
    }
}
