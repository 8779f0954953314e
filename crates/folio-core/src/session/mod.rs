//! Session state, store and durable mirroring.
//!
//! [`SessionState`] holds the pure transitions, [`SessionStore`] is the
//! shared handle every admin call reads its token from, and
//! [`SessionPersistence`] is the seam durable storage plugs into.

mod persistence;
mod state;
mod store;

pub use persistence::{MemoryPersistence, SessionPersistence};
pub use state::{SessionEvent, SessionState, SessionStatus};
pub use store::SessionStore;
