//! folio-core - Core types for the folio portfolio admin client.
//!
//! The session layer lives here: [`SessionStore`] holds the one active
//! [`Credential`] and mirrors it to a [`SessionPersistence`]. Everything
//! that talks to the network reads its token from the store at send time.
//!
//! # Example
//!
//! ```
//! use folio_core::{AuthToken, Identity, SessionStore};
//!
//! let session = SessionStore::in_memory();
//! assert!(!session.is_authenticated());
//!
//! session.set_auth(AuthToken::new("tok-123")?, Identity::admin("a@b.com"));
//! assert_eq!(session.token().unwrap().as_str(), "tok-123");
//! # Ok::<(), folio_core::Error>(())
//! ```

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod resources;
pub mod session;
pub mod tokens;
pub mod types;

pub use credentials::LoginCredentials;
pub use envelope::Envelope;
pub use error::Error;
pub use identity::{Credential, Identity, Role};
pub use resources::{Entry, Resource, SyncPlan, Validate};
pub use session::{
    MemoryPersistence, SessionEvent, SessionPersistence, SessionState, SessionStatus, SessionStore,
};
pub use tokens::AuthToken;
pub use types::{ApiUrl, ResourceId, Scope};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
