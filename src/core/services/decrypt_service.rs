use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_command::{DecryptCommand, KeySelection};
use crate::core::models::decrypt_entry::{DecryptEntry, Mode, expand_home};
use crate::core::services::preconditions;
use crate::core::traits::decryptor::Decryptor;
use crate::core::traits::logger::Logger;
use crate::core::traits::permissions::PermissionSetter;

/// Identity files probed, in order, when an entry names no key material.
const DEFAULT_IDENTITIES: [&str; 3] = [
    "~/.age/identities/default",
    "~/.config/age/identities/default",
    "~/.ssh/id_ed25519",
];

/// Suffix of the scratch file used when an entry decrypts onto its own source.
const IN_PLACE_SUFFIX: &str = ".dotage-partial";

/// Home-expanded default identity locations.
pub fn default_identity_candidates() -> Vec<PathBuf> {
    DEFAULT_IDENTITIES.iter().map(|p| expand_home(p)).collect()
}

/// Runs one `DecryptEntry` through validation, the external tool and the
/// optional permission change.
pub struct DecryptService<D: Decryptor> {
    pub decryptor: D,
    pub permissions: Box<dyn PermissionSetter>,
    pub default_identities: Vec<PathBuf>,
    /// Build and report commands without touching the filesystem.
    pub dry_run: bool,
}

impl<D: Decryptor> DecryptService<D> {
    pub fn new(decryptor: D, permissions: Box<dyn PermissionSetter>) -> Self {
        Self {
            decryptor,
            permissions,
            default_identities: default_identity_candidates(),
            dry_run: false,
        }
    }

    /// Decide which identity or recipient flags the command carries.
    ///
    /// An explicit identity must exist. Without identity or recipients the
    /// first existing default identity is used; if there is none the tool
    /// runs with its own defaults and a warning is logged.
    pub fn select_keys(&self, entry: &DecryptEntry, log: &dyn Logger) -> Result<KeySelection> {
        if let Some(identity) = &entry.identity {
            if !identity.exists() {
                return Err(DotageError::IdentityNotFound {
                    path: identity.clone(),
                });
            }
            return Ok(KeySelection::Identity(identity.clone()));
        }

        if let Some(recipients) = &entry.recipients {
            return Ok(KeySelection::Recipients(recipients.clone()));
        }

        match self.default_identities.iter().find(|p| p.exists()) {
            Some(found) => Ok(KeySelection::Identity(found.clone())),
            None => {
                log.warning(
                    "No identity file specified and no default identity found. \
                     You may need to provide an identity file or recipients.",
                );
                Ok(KeySelection::ToolDefault)
            }
        }
    }

    /// Resolve the binary and build the argument vector for `entry`,
    /// writing to `output`.
    pub fn build_command(
        &self,
        entry: &DecryptEntry,
        output: &Path,
        log: &dyn Logger,
    ) -> Result<DecryptCommand> {
        let program = self.decryptor.locate(entry.binary())?;
        let keys = self.select_keys(entry, log)?;
        Ok(DecryptCommand::new(program, output, &keys, &entry.source))
    }

    /// Decrypt one entry. Permission problems are logged, never returned.
    pub fn decrypt(&self, entry: &DecryptEntry, log: &dyn Logger) -> Result<()> {
        preconditions::check_source(entry)?;

        if !self.dry_run {
            preconditions::ensure_target_dir(&entry.target, log)?;
        }

        let output = if entry.is_in_place() {
            log.warning(&format!(
                "{} decrypts onto itself; writing through {IN_PLACE_SUFFIX} first",
                entry.source.display()
            ));
            in_place_scratch(&entry.target)
        } else {
            entry.target.clone()
        };

        let command = self.build_command(entry, &output, log)?;
        tracing::debug!(%command, "built decrypt command");

        if self.dry_run {
            log.info(&format!("Would run: {command}"));
            return Ok(());
        }

        log.lowinfo(&format!(
            "Decrypting {} to {}",
            entry.source.display(),
            entry.target.display()
        ));
        if let Err(e) = self.finish(&command, &entry.target) {
            if output != entry.target {
                let _ = fs::remove_file(&output);
            }
            return Err(e);
        }

        log.info(&format!(
            "Successfully decrypted {} to {}",
            entry.source.display(),
            entry.target.display()
        ));

        if let Some(mode) = &entry.mode {
            self.apply_mode(&entry.target, mode, log);
        }

        Ok(())
    }

    /// Run the tool and move a scratch output into place.
    fn finish(&self, command: &DecryptCommand, target: &Path) -> Result<()> {
        self.decryptor.run(command)?;
        if command.target != target {
            fs::rename(&command.target, target)?;
        }
        Ok(())
    }

    /// Best-effort permission change; every failure becomes a warning.
    pub fn apply_mode(&self, path: &Path, mode: &Mode, log: &dyn Logger) {
        let mask = match mode.mask() {
            Ok(mask) => mask,
            Err(e) => {
                log.warning(&format!("{e}, skipping permission set"));
                return;
            }
        };

        match self.permissions.apply(path, mask) {
            Ok(()) => log.lowinfo(&self.permissions.describe(path, mask)),
            Err(e) => log.warning(&e.to_string()),
        }
    }
}

fn in_place_scratch(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(IN_PLACE_SUFFIX);
    PathBuf::from(name)
}
