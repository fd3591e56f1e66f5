use serde::Deserialize;

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_entry::{
    DecryptEntry, Mode, Recipients, expand_home, infer_target,
};

/// A decrypt entry as written in the install file, before normalization.
///
/// Unknown keys are ignored so configurations written for newer releases
/// keep working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryRecord {
    pub source: Option<String>,
    pub target: Option<String>,
    pub identity: Option<String>,
    pub recipients: Option<Recipients>,
    pub binary: Option<String>,
    pub mode: Option<Mode>,
}

impl EntryRecord {
    /// Fill unset optional fields from directive-level defaults.
    ///
    /// Key material is taken from the defaults only when the record names
    /// neither an identity nor recipients, so a per-entry recipient list is
    /// never shadowed by a default identity.
    pub fn with_defaults(mut self, defaults: &EntryRecord) -> Self {
        if self.identity.is_none() && self.recipients.is_none() {
            self.identity = defaults.identity.clone();
            self.recipients = defaults.recipients.clone();
        }
        if self.binary.is_none() {
            self.binary = defaults.binary.clone();
        }
        if self.mode.is_none() {
            self.mode = defaults.mode.clone();
        }
        self
    }

    /// Turn the record into a `DecryptEntry`, expanding `~` and inferring
    /// the target when it is absent.
    ///
    /// `label` names the entry in error messages.
    pub fn into_entry(self, label: &str) -> Result<DecryptEntry> {
        let source = self.source.ok_or_else(|| DotageError::MissingSource {
            target: label.to_string(),
        })?;
        let source = expand_home(&source);

        let target = match self.target {
            Some(t) => expand_home(&t),
            None => infer_target(&source),
        };

        Ok(DecryptEntry {
            source,
            target,
            identity: self.identity.as_deref().map(expand_home),
            recipients: self.recipients.map(Recipients::into_vec),
            binary: self.binary,
            mode: self.mode,
        })
    }
}
