//! Framer CLI - interactive batch image filter and exact-ratio cropper.
//!
//! Framer scans a folder for images, keeps the ones that match a resolution
//! filter, crops them to an exact aspect ratio and writes the results to an
//! output folder.
//!
//! # Usage
//!
//! ```bash
//! # Guided run: asks for folders, filter and ratio
//! framer
//!
//! # View configuration
//! framer config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Framer - interactive batch image filter and exact-ratio cropper.
#[derive(Parser, Debug)]
#[command(name = "framer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands. Without one, Framer starts a guided run.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match framer_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `framer config path`."
            );
            framer_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Framer v{}", framer_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None => cli::run::execute(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["framer", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["framer", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(cli::config::ConfigArgs {
                command: cli::config::ConfigCommand::Init { force: true }
            }))
        ));
    }
}
