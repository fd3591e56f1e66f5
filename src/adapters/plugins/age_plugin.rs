use serde_yaml::Value;

use crate::adapters::cipher::age_cli::AgeCli;
use crate::adapters::permissions;
use crate::core::errors::DotageError;
use crate::core::models::decrypt_entry::DecryptEntry;
use crate::core::models::entry_record::EntryRecord;
use crate::core::services::decrypt_service::DecryptService;
use crate::core::services::normalizer::{NormalizedEntry, normalize};
use crate::core::traits::decryptor::Decryptor;
use crate::core::traits::logger::Logger;
use crate::core::traits::permissions::Platform;
use crate::core::traits::plugin::Plugin;

/// Directive name routed to this plugin.
pub const DIRECTIVE: &str = "age";

/// Decrypts age-encrypted files listed under an `age` directive.
pub struct AgePlugin<D: Decryptor = AgeCli> {
    service: DecryptService<D>,
}

impl AgePlugin<AgeCli> {
    /// Plugin backed by the system age binary, with the permission
    /// strategy chosen for the current platform.
    pub fn system(dry_run: bool) -> Self {
        let mut service =
            DecryptService::new(AgeCli, permissions::for_platform(Platform::current()));
        service.dry_run = dry_run;
        Self::with_service(service)
    }
}

impl<D: Decryptor> AgePlugin<D> {
    pub fn with_service(service: DecryptService<D>) -> Self {
        Self { service }
    }

    /// Decrypt a single entry, logging any failure.
    pub fn process_entry(&self, entry: &DecryptEntry, log: &dyn Logger) -> bool {
        match self.service.decrypt(entry, log) {
            Ok(()) => true,
            Err(e) => {
                log.error(&e.to_string());
                false
            }
        }
    }

    fn parse_defaults(defaults: Option<&Value>) -> Result<EntryRecord, DotageError> {
        match defaults {
            None | Some(Value::Null) => Ok(EntryRecord::default()),
            Some(value) => {
                serde_yaml::from_value(value.clone()).map_err(|e| DotageError::InvalidEntry {
                    target: "defaults".into(),
                    detail: e.to_string(),
                })
            }
        }
    }
}

impl<D: Decryptor> Plugin for AgePlugin<D> {
    fn directive(&self) -> &str {
        DIRECTIVE
    }

    fn handle(
        &self,
        directive: &str,
        data: &Value,
        defaults: Option<&Value>,
        log: &dyn Logger,
    ) -> bool {
        if !self.can_handle(directive) {
            log.error(
                &DotageError::UnhandledDirective {
                    directive: directive.to_string(),
                }
                .to_string(),
            );
            return false;
        }

        let defaults = match Self::parse_defaults(defaults) {
            Ok(defaults) => defaults,
            Err(e) => {
                log.error(&e.to_string());
                return false;
            }
        };

        let entries = match normalize(data, &defaults, log) {
            Ok(entries) => entries,
            Err(e) => {
                log.error(&e.to_string());
                return false;
            }
        };

        let mut success = true;
        for NormalizedEntry { label, entry } in entries {
            let _span = tracing::debug_span!("entry", %label).entered();
            let ok = match entry {
                Ok(entry) => self.process_entry(&entry, log),
                Err(e) => {
                    log.error(&e.to_string());
                    false
                }
            };
            success &= ok;
        }
        success
    }
}
