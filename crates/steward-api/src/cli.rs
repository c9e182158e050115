//! CLI command definitions for the `steward` binary.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Administer your chat-platform guilds.
#[derive(Parser)]
#[command(name = "steward", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactions endpoint.
    Serve {
        /// Override the configured listen address.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve() {
        let cli = Cli::try_parse_from(["steward", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { addr: None }));
    }

    #[test]
    fn cli_parses_serve_with_addr() {
        let cli = Cli::try_parse_from(["steward", "serve", "--addr", "0.0.0.0:9000"]).unwrap();
        let Commands::Serve { addr } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(addr.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn cli_counts_verbosity() {
        let cli = Cli::try_parse_from(["steward", "-vv", "serve"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
