use crate::adapters::plugins::age_plugin::AgePlugin;
use crate::core::models::decrypt_entry::{DecryptEntry, Mode, expand_home};
use crate::core::traits::logger::Logger;

/// Options for a one-off `dotage decrypt`.
#[derive(Debug, Default)]
pub struct DecryptArgs<'a> {
    pub source: &'a str,
    pub output: Option<&'a str>,
    pub identity: Option<&'a str>,
    pub recipients: &'a [String],
    pub binary: Option<&'a str>,
    pub mode: Option<&'a str>,
}

impl DecryptArgs<'_> {
    fn into_entry(self) -> DecryptEntry {
        let mut entry = DecryptEntry::from_source(self.source);
        if let Some(output) = self.output {
            entry.target = expand_home(output);
        }
        entry.identity = self.identity.map(expand_home);
        if !self.recipients.is_empty() {
            entry.recipients = Some(self.recipients.to_vec());
        }
        entry.binary = self.binary.map(str::to_string);
        entry.mode = self.mode.map(|m| Mode::Octal(m.to_string()));
        entry
    }
}

/// Execute the `dotage decrypt` command through the same pipeline as an
/// `age` directive entry.
pub fn execute(args: DecryptArgs<'_>, log: &dyn Logger) -> bool {
    let plugin = AgePlugin::system(false);
    plugin.process_entry(&args.into_entry(), log)
}
