//! Session subcommands.

mod login;
mod logout;
mod validate;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use folio_http::AdminContext;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with an admin email and password
    Login(login::LoginArgs),

    /// Forget the stored session
    Logout,

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Ask the API whether the stored session is still valid
    Validate,
}

pub async fn handle(cmd: AuthCommand, ctx: &AdminContext) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, ctx).await,
        AuthSubcommand::Logout => logout::run(ctx),
        AuthSubcommand::Whoami(args) => whoami::run(args, ctx),
        AuthSubcommand::Validate => validate::run(ctx).await,
    }
}
