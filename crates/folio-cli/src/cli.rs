//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::collection::CollectionCommand;
use crate::commands::contacts::ContactsCommand;
use crate::commands::profile::ProfileCommand;

/// Administer a folio portfolio site from the terminal.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the portfolio API
    #[arg(long, env = "FOLIO_API_URL", global = true, default_value = folio_core::ApiUrl::DEFAULT)]
    pub api_url: String,

    /// Directory holding the persisted session (defaults to the platform data dir)
    #[arg(long, env = "FOLIO_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Mark the session cookie secure, as in production deployments
    #[arg(long, env = "FOLIO_PRODUCTION", global = true)]
    pub production: bool,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "FOLIO_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and inspect the session
    Auth(AuthCommand),

    /// Show or update the profile
    Profile(ProfileCommand),

    /// Manage education entries
    Education(CollectionCommand),

    /// Manage skills
    Skills(CollectionCommand),

    /// Manage experience entries
    Experiences(CollectionCommand),

    /// Manage projects
    Projects(CollectionCommand),

    /// Read messages from the contact form
    Contacts(ContactsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "folio",
            "skills",
            "list",
            "--api-url",
            "https://api.example.com",
            "--production",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.api_url, "https://api.example.com");
        assert!(cli.global.production);
        assert_eq!(cli.verbose, 2);
    }
}
