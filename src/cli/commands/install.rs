use std::path::Path;

use crate::adapters::plugins::age_plugin::AgePlugin;
use crate::cli::output;
use crate::config::install_config::InstallConfig;
use crate::core::errors::Result;
use crate::core::services::dispatcher::{DirectiveFilter, Dispatcher};
use crate::core::traits::logger::Logger;

/// Execute the `dotage install` command.
///
/// Returns `Ok(false)` when the file was read but at least one task failed.
pub fn execute(
    config_path: &str,
    filter: DirectiveFilter,
    dry_run: bool,
    log: &dyn Logger,
) -> Result<bool> {
    let config = InstallConfig::load(Path::new(config_path))?;
    tracing::debug!(path = %config.path.display(), tasks = config.tasks.len(), "loaded install file");

    if dry_run {
        output::header(&format!("Dry run of {}", config.path.display()));
    }

    let mut dispatcher = Dispatcher::new(filter);
    dispatcher.register(Box::new(AgePlugin::system(dry_run)));

    Ok(dispatcher.run(&config.tasks, log))
}
