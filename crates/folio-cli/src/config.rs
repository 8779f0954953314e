//! Resolved CLI configuration and the admin context built from it.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use folio_core::ApiUrl;
use folio_file::FileSessionStore;
use folio_http::{AdminContext, http_client};

use crate::cli::GlobalArgs;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: ApiUrl,
    pub data_dir: PathBuf,
    pub production: bool,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let api_url = ApiUrl::new(&args.api_url).context("Invalid API URL")?;
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        Ok(Self {
            api_url,
            data_dir,
            production: args.production,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Rehydrate the persisted session and wire a dispatcher to it.
    pub fn open(&self) -> Result<AdminContext> {
        debug!(api = %self.api_url, dir = %self.data_dir.display(), "Opening admin context");
        let files = FileSessionStore::new(&self.data_dir).production(self.production);
        let client = http_client(self.timeout).context("Failed to build HTTP client")?;
        Ok(AdminContext::with_client(
            client,
            self.api_url.clone(),
            Arc::new(files),
        ))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "folio").context("Could not determine data directory")?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(api_url: &str) -> GlobalArgs {
        GlobalArgs {
            api_url: api_url.to_string(),
            data_dir: Some(PathBuf::from("/tmp/folio-test")),
            production: false,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn resolves_flags() {
        let config = Config::from_args(&args("https://api.example.com")).unwrap();
        assert_eq!(config.api_url.host(), Some("api.example.com"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/folio-test"));
    }

    #[test]
    fn rejects_plain_http_to_remote_hosts() {
        assert!(Config::from_args(&args("http://api.example.com")).is_err());
        assert!(Config::from_args(&args("http://localhost:3001")).is_ok());
    }
}
