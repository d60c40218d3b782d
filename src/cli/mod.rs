//! CLI module for Keygate
//!
//! Provides commands:
//! - `serve`: run the HTTP gate
//! - `keys`: administer the durable `auth_keys` table

use clap::{Parser, Subcommand};

pub mod keys;

/// Keygate credential registry CLI
#[derive(Parser, Debug)]
#[command(name = "keygate")]
#[command(about = "Query-parameter credential gate backed by a durable key table")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gate
    Serve,
    /// Manage stored auth keys
    Keys {
        #[command(subcommand)]
        command: keys::KeysCommand,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Keys { command }) => keys::run(command).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_upsert() {
        let cli = Cli::try_parse_from(["keygate", "keys", "upsert", "team-a", "alpha"]).unwrap();
        match cli.command {
            Some(Commands::Keys {
                command: keys::KeysCommand::Upsert { key, value },
            }) => {
                assert_eq!(key, "team-a");
                assert_eq!(value, "alpha");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["keygate"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_verify_cli_definition() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
