use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::core::errors::{DotageError, Result};
use crate::core::services::normalizer::kind;

/// Install file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "install.conf.yaml";

/// A dotbot-style install file: an ordered list of tasks, each a mapping
/// of directive name to directive data.
///
/// ```yaml
/// - defaults:
///     age: { mode: "600" }
/// - age:
///     ~/.ssh/config: ssh/config.age
/// ```
///
/// JSON files are accepted too since JSON is valid YAML.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub path: PathBuf,
    pub tasks: Vec<Mapping>,
}

impl InstallConfig {
    /// Read and validate the install file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DotageError::InvalidConfig {
                path: path.to_path_buf(),
                detail: "file not found. Pass --config <file> or create install.conf.yaml."
                    .into(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse install-file text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |detail: String| DotageError::InvalidConfig {
            path: path.to_path_buf(),
            detail,
        };

        let value: Value =
            serde_yaml::from_str(content).map_err(|e| invalid(format!("failed to parse: {e}")))?;

        let items = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            other => {
                return Err(invalid(format!(
                    "expected a list of tasks, got {}",
                    kind(&other)
                )));
            }
        };

        let tasks = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Mapping(task) => Ok(task),
                other => Err(invalid(format!(
                    "task #{} must be a dictionary, got {}",
                    index + 1,
                    kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            tasks,
        })
    }
}
