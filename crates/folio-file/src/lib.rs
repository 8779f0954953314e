//! folio-file - Filesystem-backed durable session storage.
//!
//! [`FileSessionStore`] implements [`folio_core::SessionPersistence`] so a
//! [`folio_core::SessionStore`] survives process restarts:
//!
//! ```no_run
//! use std::sync::Arc;
//! use folio_core::SessionStore;
//! use folio_file::FileSessionStore;
//!
//! let files = FileSessionStore::new("/var/lib/folio").production(true);
//! let session = SessionStore::init(Arc::new(files));
//! println!("authenticated: {}", session.is_authenticated());
//! ```

mod records;
mod store;

pub use records::{
    AUTH_ENTRY_NAME, AuthEntry, AuthEntryState, COOKIE_TTL_DAYS, CookieJar, SameSite, StoredCookie,
    TOKEN_COOKIE_NAME,
};
pub use store::FileSessionStore;
