use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use wiremock::MockServer;

/// Run the CLI against `server`, keeping the session in `data_dir`.
pub async fn run_cli(args: &[&str], data_dir: &Path, server: &MockServer) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.args(args);
    cmd.env("FOLIO_API_URL", server.uri());
    cmd.env("FOLIO_DATA_DIR", data_dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("FOLIO_EMAIL");
    cmd.env_remove("FOLIO_PASSWORD");
    cmd.env_remove("FOLIO_PRODUCTION");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success. Returns stdout.
pub async fn run_cli_success(args: &[&str], data_dir: &Path, server: &MockServer) -> String {
    let output = run_cli(args, data_dir, server).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure. Returns stderr.
pub async fn run_cli_failure(args: &[&str], data_dir: &Path, server: &MockServer) -> String {
    let output = run_cli(args, data_dir, server).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
