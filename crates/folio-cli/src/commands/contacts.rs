//! Contact message subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use folio_http::AdminContext;

use crate::output;

#[derive(Args, Debug)]
pub struct ContactsCommand {
    #[command(subcommand)]
    pub command: ContactsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContactsSubcommand {
    /// List received messages
    List {
        /// Only messages not yet marked read
        #[arg(long)]
        unread: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub async fn handle(cmd: ContactsCommand, ctx: &AdminContext) -> Result<()> {
    match cmd.command {
        ContactsSubcommand::List { unread, pretty } => {
            let mut contacts = ctx
                .portfolio()
                .contacts()
                .await
                .context("Failed to list contacts")?;
            if unread {
                contacts.retain(|c| !c.is_read);
            }
            output::records(&contacts, pretty)
        }
    }
}
