//! Subcommands shared by the list-edited collections.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use folio_core::{Entry, Resource, ResourceId, SyncPlan};
use folio_http::AdminContext;

use super::input::read_json;
use super::require_login;
use crate::output;

#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// List every record
    List {
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Submit an edited list: missing ids are deleted, rows with an id are
    /// updated and rows without one are created
    Sync {
        /// JSON array of rows (use - for stdin)
        #[arg(long)]
        json: String,

        /// Show the requests without sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Create one record
    Create {
        /// JSON object with the record fields (use - for stdin)
        #[arg(long)]
        json: String,
    },

    /// Replace the fields of one record
    Update {
        /// Record id
        #[arg(long)]
        id: ResourceId,

        /// JSON object with the record fields (use - for stdin)
        #[arg(long)]
        json: String,
    },

    /// Delete one record
    Delete {
        /// Record id
        #[arg(long)]
        id: ResourceId,
    },
}

pub async fn handle<R: Resource>(cmd: CollectionCommand, ctx: &AdminContext) -> Result<()> {
    let api = ctx.resource::<R>();

    match cmd.command {
        CollectionSubcommand::List { pretty } => {
            let items = api
                .list()
                .await
                .with_context(|| format!("Failed to list {}", R::COLLECTION))?;
            output::records(&items, pretty)
        }
        CollectionSubcommand::Sync { json, dry_run } => {
            let edited: Vec<Entry<R::Input>> = read_json(&json)?;
            if !dry_run {
                require_login(ctx)?;
            }
            let original = api
                .list()
                .await
                .with_context(|| format!("Failed to load current {}", R::COLLECTION))?;

            if dry_run {
                let plan = SyncPlan::compute(&original, edited)?;
                output::field("Delete", &plan.deletes.len().to_string());
                output::field("Update", &plan.updates.len().to_string());
                output::field("Create", &plan.creates.len().to_string());
                return Ok(());
            }

            let report = api
                .sync(&original, edited)
                .await
                .with_context(|| format!("Failed to sync {}", R::COLLECTION))?;
            output::success(&format!("Synced {}: {}", R::COLLECTION, report));
            Ok(())
        }
        CollectionSubcommand::Create { json } => {
            let input: R::Input = read_json(&json)?;
            require_login(ctx)?;
            let created = api
                .create(&input)
                .await
                .with_context(|| format!("Failed to create in {}", R::COLLECTION))?;
            if let Some(record) = created {
                output::json(&record)?;
            }
            output::success("Created");
            Ok(())
        }
        CollectionSubcommand::Update { id, json } => {
            let input: R::Input = read_json(&json)?;
            require_login(ctx)?;
            let updated = api
                .update(id, &input)
                .await
                .with_context(|| format!("Failed to update {}/{}", R::COLLECTION, id))?;
            if let Some(record) = updated {
                output::json(&record)?;
            }
            output::success(&format!("Updated {}", id));
            Ok(())
        }
        CollectionSubcommand::Delete { id } => {
            require_login(ctx)?;
            api.delete(id)
                .await
                .with_context(|| format!("Failed to delete {}/{}", R::COLLECTION, id))?;
            output::success(&format!("Deleted {}", id));
            Ok(())
        }
    }
}
