//! Storekeep CLI - Database maintenance and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Wipe shop data from a debug deployment
//! sk-cli cleardb
//!
//! # Also delete staff accounts (superusers are kept)
//! sk-cli cleardb --delete-staff
//!
//! # Run against a deployment not in debug mode
//! sk-cli cleardb --force
//!
//! # Verify the binary starts and dispatches commands
//! sk-cli check
//! ```
//!
//! # Commands
//!
//! - `cleardb` - Remove shop data while keeping configuration and staff
//! - `check` - Print a marker line to verify command dispatch

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use storekeep_cli::commands;

#[derive(Parser)]
#[command(name = "sk-cli")]
#[command(author, version, about = "Storekeep CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove shop data while keeping configuration and staff
    Cleardb {
        /// Delete staff accounts as well (superusers are kept)
        #[arg(long)]
        delete_staff: bool,

        /// Allow running outside debug mode
        #[arg(long)]
        force: bool,
    },
    /// Print a marker line to verify command dispatch
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cleardb {
            delete_staff,
            force,
        } => {
            commands::cleardb::clear_database(delete_staff, force).await?;
        }
        Commands::Check => {
            let mut stdout = std::io::stdout().lock();
            commands::check::print_marker(&mut stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cleardb_defaults() {
        let cli = Cli::try_parse_from(["sk-cli", "cleardb"]).unwrap();
        match cli.command {
            Commands::Cleardb {
                delete_staff,
                force,
            } => {
                assert!(!delete_staff);
                assert!(!force);
            }
            Commands::Check => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn test_parse_cleardb_flags() {
        let cli = Cli::try_parse_from(["sk-cli", "cleardb", "--delete-staff", "--force"]).unwrap();
        match cli.command {
            Commands::Cleardb {
                delete_staff,
                force,
            } => {
                assert!(delete_staff);
                assert!(force);
            }
            Commands::Check => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["sk-cli", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["sk-cli", "dropdb"]).is_err());
    }
}
