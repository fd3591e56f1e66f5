use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::core::errors::{DotageError, Result};

/// Suffix carried by age-encrypted files in a dotfiles repository.
pub const AGE_EXTENSION: &str = ".age";

/// Executable used when an entry does not name one.
pub const DEFAULT_BINARY: &str = "age";

/// One normalized decrypt task: decrypt `source` into `target`.
///
/// Paths are already home-expanded. `identity` wins over `recipients`
/// when both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub identity: Option<PathBuf>,
    pub recipients: Option<Vec<String>>,
    pub binary: Option<String>,
    pub mode: Option<Mode>,
}

impl DecryptEntry {
    /// Build an entry with only a source, inferring the target.
    pub fn from_source(source: &str) -> Self {
        let source = expand_home(source);
        let target = infer_target(&source);
        Self {
            source,
            target,
            identity: None,
            recipients: None,
            binary: None,
            mode: None,
        }
    }

    /// Executable name for this entry.
    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(DEFAULT_BINARY)
    }

    /// True when source and target resolve to the same file, however
    /// they are spelled.
    pub fn is_in_place(&self) -> bool {
        if self.source == self.target {
            return true;
        }
        match (fs::canonicalize(&self.source), fs::canonicalize(&self.target)) {
            (Ok(source), Ok(target)) => source == target,
            _ => false,
        }
    }
}

/// Permission specification: an octal string (`"600"`) or a raw mask.
///
/// Anything else is kept as written and rejected only when the mask is
/// applied, after the file has been decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Mode {
    Bits(u32),
    Octal(String),
    Other(Value),
}

impl Mode {
    /// Resolve to a permission mask.
    ///
    /// Integers are taken literally; strings are parsed as base-8.
    pub fn mask(&self) -> Result<u32> {
        match self {
            Mode::Bits(bits) => Ok(*bits),
            Mode::Octal(text) => {
                let digits = text.trim();
                let digits = digits
                    .strip_prefix("0o")
                    .or_else(|| digits.strip_prefix("0O"))
                    .unwrap_or(digits);
                u32::from_str_radix(digits, 8).map_err(|_| DotageError::InvalidMode {
                    mode: text.clone(),
                })
            }
            Mode::Other(_) => Err(DotageError::InvalidMode {
                mode: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Bits(bits) => write!(f, "{bits:#o}"),
            Mode::Octal(text) => write!(f, "{text}"),
            Mode::Other(value) => match serde_yaml::to_string(value) {
                Ok(text) => write!(f, "{}", text.trim_end()),
                Err(_) => write!(f, "{value:?}"),
            },
        }
    }
}

/// One recipient or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Recipients::One(r) => vec![r],
            Recipients::Many(rs) => rs,
        }
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are expanded. If the home directory cannot be
/// determined the path is returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home;
    }

    match path.strip_prefix("~/").or_else(|| strip_windows_tilde(path)) {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(windows)]
fn strip_windows_tilde(path: &str) -> Option<&str> {
    path.strip_prefix("~\\")
}

#[cfg(not(windows))]
fn strip_windows_tilde(_path: &str) -> Option<&str> {
    None
}

/// Default target for a source: one trailing `.age` removed.
///
/// Sources without the suffix (or consisting only of it) map to themselves.
pub fn infer_target(source: &Path) -> PathBuf {
    source
        .to_str()
        .and_then(|s| s.strip_suffix(AGE_EXTENSION))
        .filter(|stripped| !stripped.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| source.to_path_buf())
}
