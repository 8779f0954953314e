//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::LoginCredentials;
use folio_http::AdminContext;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Admin email address
    #[arg(long, env = "FOLIO_EMAIL")]
    pub email: String,

    /// Admin password
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, ctx: &AdminContext) -> Result<()> {
    let credentials = LoginCredentials::new(args.email, args.password);

    output::hint("Logging in...");

    let credential = ctx
        .admin()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    let identity = credential.identity();
    output::field("Email", &identity.email);
    output::field("Role", identity.role.as_str());
    output::field("API", ctx.dispatcher().api_url().as_str());

    Ok(())
}
