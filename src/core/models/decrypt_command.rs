use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A fully-built invocation of the external decrypt tool.
///
/// The argument vector follows age's CLI:
/// `--decrypt -o <target> [-i <identity> | -r <recipient>...] <source>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// How the command authorizes decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySelection {
    Identity(PathBuf),
    Recipients(Vec<String>),
    /// No identity or recipient flag; the tool's own defaults apply.
    ToolDefault,
}

impl DecryptCommand {
    pub fn new(program: PathBuf, target: &Path, keys: &KeySelection, source: &Path) -> Self {
        let mut args: Vec<OsString> = vec!["--decrypt".into(), "-o".into(), target.into()];

        match keys {
            KeySelection::Identity(identity) => {
                args.push("-i".into());
                args.push(identity.into());
            }
            KeySelection::Recipients(recipients) => {
                for recipient in recipients {
                    args.push("-r".into());
                    args.push(recipient.into());
                }
            }
            KeySelection::ToolDefault => {}
        }

        args.push(source.into());
        Self {
            program,
            args,
            source: source.to_path_buf(),
            target: target.to_path_buf(),
        }
    }
}

impl fmt::Display for DecryptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
