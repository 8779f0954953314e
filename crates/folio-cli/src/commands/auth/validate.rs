//! Validate command implementation.

use anyhow::{Context, Result, bail};

use folio_http::AdminContext;

use crate::commands::require_login;
use crate::output;

pub async fn run(ctx: &AdminContext) -> Result<()> {
    require_login(ctx)?;

    let valid = ctx
        .admin()
        .validate_session()
        .await
        .context("Failed to validate session")?;

    if !valid {
        bail!("Session is no longer valid. Run 'folio auth login' to sign in again.");
    }
    output::success("Session is valid");
    Ok(())
}
