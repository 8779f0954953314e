//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use folio_http::AdminContext;

use crate::commands::require_login;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the identity as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WhoamiArgs, ctx: &AdminContext) -> Result<()> {
    let identity = require_login(ctx)?;

    if args.json {
        return output::json(&identity);
    }

    output::field("Email", &identity.email);
    output::field("Role", identity.role.as_str());
    output::optional_field("ID", identity.id.map(|id| id.to_string()).as_deref());
    output::field("API", ctx.dispatcher().api_url().as_str());

    Ok(())
}
