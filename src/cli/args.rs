//! CLI argument definitions using clap
//!
//! Commands:
//! - zippy serve
//! - zippy list
//! - zippy create < submission.json
//! - zippy show --id <id>
//! - zippy delete --id <id>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// zippy - delivery package records
#[derive(Parser, Debug)]
#[command(name = "zippy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./zippy.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP API
    Serve,

    /// Print every stored package
    List,

    /// Validate a JSON submission read from stdin and store it
    Create,

    /// Print one package
    Show {
        #[arg(long)]
        id: String,
    },

    /// Delete one package
    Delete {
        #[arg(long)]
        id: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["zippy", "list"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("./zippy.json"));
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["zippy", "show", "--id", "abc", "--config", "/etc/zippy.json"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/zippy.json"));
        assert_eq!(cli.command, Command::Show { id: "abc".into() });
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["zippy", "delete"]).is_err());
    }
}
