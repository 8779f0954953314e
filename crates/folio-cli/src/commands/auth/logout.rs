//! Logout command implementation.

use anyhow::Result;

use folio_http::AdminContext;

use crate::output;

pub fn run(ctx: &AdminContext) -> Result<()> {
    let was_authenticated = ctx.session().is_authenticated();
    ctx.admin().logout();

    if was_authenticated {
        output::success("Logged out");
    } else {
        output::hint("No active session.");
    }
    Ok(())
}
