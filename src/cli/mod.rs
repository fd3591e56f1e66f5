pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::config::install_config::DEFAULT_CONFIG_FILE;

/// Decrypt age-encrypted dotfiles during an install run.
#[derive(Parser, Debug)]
#[command(name = "dotage", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show low-priority progress messages and debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every directive in an install file
    Install {
        /// Install file (YAML or JSON)
        #[arg(short, long, env = "DOTAGE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: String,

        /// Only run these directives (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Skip these directives (repeatable)
        #[arg(long)]
        except: Vec<String>,

        /// Print the decrypt commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Decrypt a single file
    Decrypt {
        /// Encrypted source file
        source: String,

        /// Output path (default: source without .age)
        #[arg(short, long)]
        output: Option<String>,

        /// Identity file
        #[arg(short, long)]
        identity: Option<String>,

        /// Recipient (repeatable)
        #[arg(short, long = "recipient")]
        recipients: Vec<String>,

        /// age-compatible binary to run
        #[arg(long)]
        binary: Option<String>,

        /// Permissions for the output file, in octal (e.g. 600)
        #[arg(long)]
        mode: Option<String>,
    },
}
