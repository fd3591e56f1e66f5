use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_command::DecryptCommand;
use crate::core::traits::decryptor::Decryptor;

/// In-process stand-in for the age binary.
///
/// "Decrypts" by copying the source to the `-o` path with every `ENC:`
/// marker removed, and records each command it is asked to run. With
/// `partial_output` a failing run leaves half-written output behind first.
#[derive(Debug, Default)]
pub struct FakeAge {
    pub calls: RefCell<Vec<DecryptCommand>>,
    pub fail_with: Option<String>,
    pub partial_output: bool,
    pub missing: bool,
}

impl Decryptor for FakeAge {
    fn locate(&self, binary: &str) -> Result<PathBuf> {
        if self.missing {
            return Err(DotageError::BinaryNotFound {
                binary: binary.to_string(),
            });
        }
        Ok(PathBuf::from("/usr/bin").join(binary))
    }

    fn run(&self, command: &DecryptCommand) -> Result<()> {
        self.calls.borrow_mut().push(command.clone());
        if let Some(stderr) = &self.fail_with {
            if self.partial_output {
                fs::write(&command.target, "partial plaintext\n")?;
            }
            return Err(DotageError::DecryptionFailed {
                source_path: command.source.clone(),
                stderr: stderr.clone(),
            });
        }
        let plaintext = fs::read_to_string(&command.source)?.replace("ENC:", "");
        fs::write(&command.target, plaintext)?;
        Ok(())
    }
}
