use std::path::PathBuf;

/// All domain errors for dotage.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum DotageError {
    #[error(
        "Age configuration must be a dictionary, got {found}\n\n  \
         Expected one of:\n    \
         → age: {{ ~/.ssh/config: ssh/config.age }}\n    \
         → age: {{ ~/.ssh/config: {{ source: ssh/config.age, mode: \"600\" }} }}"
    )]
    InvalidShape { found: String },

    #[error("Age configuration for {target} missing 'source' field")]
    MissingSource { target: String },

    #[error("Invalid age configuration for {target}: {detail}")]
    InvalidEntry { target: String, detail: String },

    #[error("Invalid install file {path}: {detail}")]
    InvalidConfig { path: PathBuf, detail: String },

    #[error("Source file does not exist: {path}")]
    SourceNotFound { path: PathBuf },

    #[error(
        "Permission denied when creating directory {path}\n\n  \
         Check that you own the parent directory or pick a different target."
    )]
    DirectoryPermission { path: PathBuf },

    #[error("Failed to create directory {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error(
        "age command not found: {binary}\n\n  \
         Solutions:\n    \
         → Install age: https://github.com/FiloSottile/age#installation\n    \
         → Or point 'binary' at another implementation (e.g. rage)"
    )]
    BinaryNotFound { binary: String },

    #[error("Identity file does not exist: {path}")]
    IdentityNotFound { path: PathBuf },

    #[error("Failed to decrypt {source_path}: {stderr}")]
    DecryptionFailed { source_path: PathBuf, stderr: String },

    #[error("Error decrypting {source_path}: {reason}")]
    SpawnFailed { source_path: PathBuf, reason: String },

    #[error("Invalid mode format: {mode}")]
    InvalidMode { mode: String },

    #[error("Failed to set permissions on {path}: {reason}")]
    PermissionFailed { path: PathBuf, reason: String },

    #[error("No plugin can handle directive '{directive}'")]
    UnhandledDirective { directive: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DotageError>;
