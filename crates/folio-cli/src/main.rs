//! folio - administer a portfolio site from the terminal.
//!
//! A thin wrapper over `folio-http`: the session is rehydrated from the
//! data directory on start, and every transition is written back to it.

mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_args(&cli.global)?;
    let ctx = config.open()?;
    let result = commands::handle(cli.command, &ctx).await;
    ctx.teardown();
    result
}

/// Print the error, with a dedicated hint when the API dropped the session.
///
/// API failures show the server's message under the outermost context.
fn report(err: &anyhow::Error) {
    let api_error = err
        .chain()
        .find_map(|e| e.downcast_ref::<folio_core::Error>());

    match api_error {
        Some(e) if e.is_unauthorized() => {
            output::error("Session expired. Run 'folio auth login' to sign in again.");
        }
        Some(e) if is_api(e) && err.is::<folio_core::Error>() => {
            output::error(&e.user_message());
        }
        Some(e) if is_api(e) => {
            output::error(&format!("{}: {}", err, e.user_message()));
        }
        _ => output::error(&format!("{:#}", err)),
    }
}

fn is_api(err: &folio_core::Error) -> bool {
    matches!(err, folio_core::Error::Api(_))
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
