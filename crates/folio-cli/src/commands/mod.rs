//! Subcommand implementations.

pub mod auth;
pub mod collection;
pub mod contacts;
mod input;
pub mod profile;

use anyhow::{Context, Result};

use folio_core::Identity;
use folio_core::resources::{Education, Experience, Project, Skill};
use folio_http::AdminContext;

use crate::cli::Commands;

pub async fn handle(command: Commands, ctx: &AdminContext) -> Result<()> {
    match command {
        Commands::Auth(cmd) => auth::handle(cmd, ctx).await,
        Commands::Profile(cmd) => profile::handle(cmd, ctx).await,
        Commands::Education(cmd) => collection::handle::<Education>(cmd, ctx).await,
        Commands::Skills(cmd) => collection::handle::<Skill>(cmd, ctx).await,
        Commands::Experiences(cmd) => collection::handle::<Experience>(cmd, ctx).await,
        Commands::Projects(cmd) => collection::handle::<Project>(cmd, ctx).await,
        Commands::Contacts(cmd) => contacts::handle(cmd, ctx).await,
    }
}

/// The logged-in admin, or an error telling the user to log in.
fn require_login(ctx: &AdminContext) -> Result<Identity> {
    ctx.admin()
        .whoami()
        .context("No active session. Run 'folio auth login' first.")
}
