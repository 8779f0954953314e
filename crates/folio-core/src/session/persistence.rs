//! Durable mirror of the session.

use std::sync::{Arc, Mutex, PoisonError};

use crate::Result;
use crate::identity::Credential;

use super::state::SessionEvent;

/// A durable copy of the session that survives process restarts.
///
/// The store calls [`apply`](Self::apply) after every transition and
/// [`load`](Self::load) once when rehydrating.
pub trait SessionPersistence: Send + Sync {
    /// Read the persisted credential, if a complete and unexpired one exists.
    fn load(&self) -> Result<Option<Credential>>;

    /// Mirror a transition. `Cleared` must succeed when nothing is stored.
    fn apply(&self, event: &SessionEvent) -> Result<()>;
}

/// Process-local persistence, for tests and for one-shot sessions.
///
/// Clones share the same slot, so a second store built from a clone sees
/// what the first one wrote, the way a reload sees the previous page's
/// storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryPersistence {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The credential currently persisted.
    pub fn stored(&self) -> Option<Credential> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.stored())
    }

    fn apply(&self, event: &SessionEvent) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            SessionEvent::Established(credential) => *slot = Some(credential.clone()),
            SessionEvent::Cleared => *slot = None,
        }
        Ok(())
    }
}
