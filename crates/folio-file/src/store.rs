//! Filesystem storage for the durable session copies.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use folio_core::error::{Error, StorageError};
use folio_core::{AuthToken, Credential, Result, SessionEvent, SessionPersistence};

use crate::records::{AUTH_ENTRY_NAME, AuthEntry, CookieJar, StoredCookie, TOKEN_COOKIE_NAME};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

fn map_io(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |err| {
        Error::Storage(StorageError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

fn corrupt(path: &Path, err: serde_json::Error) -> Error {
    Error::Storage(StorageError::Corrupt {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Session persistence backed by two files in a data directory.
///
/// `portfolio-admin-auth.json` holds the token, identity and flag;
/// `cookies.json` holds the token cookie with its 7-day expiry. A
/// credential is only restored when both are present, unexpired and agree.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: PathBuf,
    secure_cookies: bool,
}

impl FileSessionStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            secure_cookies: false,
        }
    }

    /// Mark the token cookie `secure`, as in production deployments.
    pub fn production(mut self, production: bool) -> Self {
        self.secure_cookies = production;
        self
    }

    /// Get the directory holding the session files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the persisted auth entry.
    pub fn auth_entry_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", AUTH_ENTRY_NAME))
    }

    /// Path of the cookie jar holding the token cookie.
    pub fn cookie_jar_path(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".session.lock")
    }

    /// Take the directory-wide exclusive lock. Released when dropped.
    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.root).map_err(map_io(&self.root))?;
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(map_io(&lock_path))?;
        lock_file.lock_exclusive().map_err(map_io(&lock_path))?;
        Ok(lock_file)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(path)(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| corrupt(path, e))
    }

    /// Write via a temp file and rename, so readers never see half a file.
    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value).map_err(|e| corrupt(path, e))?;
        let temp_path = path.with_extension("tmp");

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).map_err(map_io(&temp_path))?;
        file.write_all(content.as_bytes())
            .map_err(map_io(&temp_path))?;
        file.sync_data().map_err(map_io(&temp_path))?;
        fs::rename(&temp_path, path).map_err(map_io(path))?;
        Ok(())
    }

    fn remove_file(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(path)(e)),
        }
    }

    fn write_credential(&self, credential: &Credential) -> Result<()> {
        Self::write_json(
            &self.auth_entry_path(),
            &AuthEntry::from_credential(credential),
        )?;

        let jar_path = self.cookie_jar_path();
        let mut jar = Self::read_json::<CookieJar>(&jar_path)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Replacing unreadable cookie jar");
                None
            })
            .unwrap_or_default();
        jar.insert(StoredCookie::token(
            credential,
            Utc::now(),
            self.secure_cookies,
        ));
        Self::write_json(&jar_path, &jar)
    }

    fn remove_credential(&self) -> Result<()> {
        Self::remove_file(&self.auth_entry_path())?;

        let jar_path = self.cookie_jar_path();
        match Self::read_json::<CookieJar>(&jar_path) {
            Ok(Some(mut jar)) => {
                if jar.remove(TOKEN_COOKIE_NAME) {
                    if jar.is_empty() {
                        Self::remove_file(&jar_path)?;
                    } else {
                        Self::write_json(&jar_path, &jar)?;
                    }
                }
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Removing unreadable cookie jar");
                Self::remove_file(&jar_path)
            }
        }
    }

    /// Both copies, or `None` when they are missing, stale or disagree.
    fn read_credential(&self) -> Result<Option<Credential>> {
        let entry = Self::read_json::<AuthEntry>(&self.auth_entry_path())?;
        let jar = Self::read_json::<CookieJar>(&self.cookie_jar_path())?;
        let cookie = jar.as_ref().and_then(|j| j.get(TOKEN_COOKIE_NAME));

        let (entry, cookie) = match (entry, cookie) {
            (None, None) => return Ok(None),
            (Some(entry), Some(cookie)) => (entry, cookie),
            (Some(_), None) => {
                debug!("Auth entry without token cookie");
                return self.discard();
            }
            (None, Some(_)) => {
                debug!("Token cookie without auth entry");
                return self.discard();
            }
        };

        if cookie.is_expired(Utc::now()) {
            debug!(expires = %cookie.expires, "Token cookie expired");
            return self.discard();
        }

        let state = entry.state;
        let (Some(token), Some(user)) = (state.token, state.user) else {
            debug!("Auth entry is incomplete");
            return self.discard();
        };
        if !state.is_authenticated || token != cookie.value {
            debug!("Auth entry and token cookie disagree");
            return self.discard();
        }

        match AuthToken::new(token) {
            Ok(token) => Ok(Some(Credential::new(token, user))),
            Err(e) => {
                debug!(error = %e, "Persisted token is malformed");
                self.discard()
            }
        }
    }

    fn discard(&self) -> Result<Option<Credential>> {
        warn!(dir = %self.root.display(), "Discarding inconsistent persisted session");
        self.remove_credential()?;
        Ok(None)
    }
}

impl SessionPersistence for FileSessionStore {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> Result<Option<Credential>> {
        if !self.root.exists() {
            return Ok(None);
        }
        let _lock = self.lock()?;
        self.read_credential()
    }

    #[instrument(skip(self, event), fields(dir = %self.root.display()))]
    fn apply(&self, event: &SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Established(credential) => {
                let _lock = self.lock()?;
                self.write_credential(credential)?;
                debug!("Persisted session");
            }
            SessionEvent::Cleared => {
                if !self.root.exists() {
                    return Ok(());
                }
                let _lock = self.lock()?;
                self.remove_credential()?;
                debug!("Removed persisted session");
            }
        }
        Ok(())
    }
}
