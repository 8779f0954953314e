//! Profile subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use folio_core::resources::ProfileInput;
use folio_http::AdminContext;

use super::input::read_json;
use super::require_login;
use crate::output;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Show the saved profile
    Show {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save the profile from a JSON object
    Update {
        /// JSON object with the profile fields (use - for stdin)
        #[arg(long)]
        json: String,
    },
}

pub async fn handle(cmd: ProfileCommand, ctx: &AdminContext) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Show { json } => {
            let profile = ctx
                .portfolio()
                .profile()
                .await
                .context("Failed to load profile")?;
            let Some(profile) = profile else {
                output::hint("No profile saved yet.");
                return Ok(());
            };

            if json {
                return output::json_pretty(&profile);
            }
            output::field("Name", &profile.name);
            output::field("Email", &profile.email);
            output::optional_field("Phone", profile.phone_number.as_deref());
            output::optional_field("Location", profile.location.as_deref());
            output::optional_field("Website", profile.website.as_deref());
            output::optional_field("LinkedIn", profile.linkedin_url.as_deref());
            output::optional_field("GitHub", profile.github_url.as_deref());
            output::optional_field("Twitter", profile.twitter_url.as_deref());
            output::optional_field("Bio", profile.bio.as_deref());
            Ok(())
        }
        ProfileSubcommand::Update { json } => {
            let input: ProfileInput = read_json(&json)?;
            require_login(ctx)?;
            ctx.portfolio()
                .save_profile(input)
                .await
                .context("Failed to save profile")?;
            output::success("Profile saved");
            Ok(())
        }
    }
}
