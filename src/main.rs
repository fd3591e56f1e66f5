mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use adapters::logging::console::{ConsoleLogger, Verbosity};
use cli::commands::decrypt::DecryptArgs;
use cli::{Cli, Commands};
use crate::core::services::dispatcher::DirectiveFilter;

/// Route developer diagnostics to stderr. `DOTAGE_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "dotage=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("DOTAGE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = Cli::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    init_tracing(args.verbose);

    let log = ConsoleLogger::new(Verbosity::from_flags(args.verbose, args.quiet));

    let result = match &args.command {
        Commands::Install {
            config,
            only,
            except,
            dry_run,
        } => {
            let filter = DirectiveFilter {
                only: only.clone(),
                except: except.clone(),
            };
            cli::commands::install::execute(config, filter, *dry_run, &log)
        }
        Commands::Decrypt {
            source,
            output,
            identity,
            recipients,
            binary,
            mode,
        } => Ok(cli::commands::decrypt::execute(
            DecryptArgs {
                source,
                output: output.as_deref(),
                identity: identity.as_deref(),
                recipients,
                binary: binary.as_deref(),
                mode: mode.as_deref(),
            },
            &log,
        )),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    }
}
