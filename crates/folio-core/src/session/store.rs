//! The session store: single source of truth for "is an admin logged in".

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::identity::{Credential, Identity};
use crate::tokens::AuthToken;

use super::persistence::{MemoryPersistence, SessionPersistence};
use super::state::{SessionEvent, SessionState, SessionStatus};

/// Handle to the session shared by everything that issues admin calls.
///
/// Cheap to clone (internal `Arc`). Transitions go through the pure
/// [`SessionState`]; the resulting event is then mirrored to the
/// [`SessionPersistence`] and published on the status channel.
///
/// Persistence runs after the state lock is released, so readers such as
/// the dispatcher never wait on disk I/O. Transitions are serialized among
/// themselves so durable storage sees events in the order memory did.
///
/// # Example
///
/// ```
/// use folio_core::{AuthToken, Identity, SessionStore};
///
/// let store = SessionStore::in_memory();
/// store.set_auth(AuthToken::new("tok-123").unwrap(), Identity::admin("a@b.com"));
/// assert!(store.is_authenticated());
///
/// store.clear_auth();
/// store.clear_auth();
/// assert!(!store.is_authenticated());
/// ```
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<SessionState>,
    transitions: Mutex<()>,
    persistence: Arc<dyn SessionPersistence>,
    status: watch::Sender<SessionStatus>,
}

impl SessionStore {
    /// Create an anonymous store mirrored to `persistence`.
    ///
    /// Does not read durable storage; see [`init`](Self::init).
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Anonymous);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(SessionState::new()),
                transitions: Mutex::new(()),
                persistence,
                status,
            }),
        }
    }

    /// Create a store and rehydrate it from `persistence`.
    pub fn init(persistence: Arc<dyn SessionPersistence>) -> Self {
        let store = Self::new(persistence);
        store.rehydrate();
        store
    }

    /// A store backed by process-local memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPersistence::new()))
    }

    /// Store a token and identity and mark the session authenticated.
    ///
    /// Always succeeds in memory. A failure to write the durable copy is
    /// logged and leaves the in-memory session in place.
    #[instrument(skip(self, token, identity), fields(email = %identity.email))]
    pub fn set_auth(&self, token: AuthToken, identity: Identity) {
        self.set_credential(Credential::new(token, identity));
    }

    /// Store a whole credential. See [`set_auth`](Self::set_auth).
    pub fn set_credential(&self, credential: Credential) {
        let _transition = self.begin_transition();
        let (event, status) = {
            let mut state = self.write();
            (state.set_auth(credential), state.status())
        };
        self.mirror(&event);
        self.publish(status);
        info!("Session established");
    }

    /// Remove the credential from memory and durable storage.
    ///
    /// Idempotent: clearing an anonymous session does nothing observable.
    #[instrument(skip(self))]
    pub fn clear_auth(&self) {
        let _transition = self.begin_transition();
        let (was_authenticated, event, status) = {
            let mut state = self.write();
            let was_authenticated = state.is_authenticated();
            (was_authenticated, state.clear(), state.status())
        };
        self.mirror(&event);
        self.publish(status);
        if was_authenticated {
            info!("Session cleared");
        } else {
            debug!("Session already anonymous");
        }
    }

    /// Restore the session from durable storage without asking the server.
    ///
    /// Returns true if a credential was restored. Unreadable storage is
    /// logged, wiped, and leaves the session anonymous.
    #[instrument(skip(self))]
    pub fn rehydrate(&self) -> bool {
        let _transition = self.begin_transition();
        let status = match self.inner.persistence.load() {
            Ok(Some(credential)) => {
                debug!(email = %credential.identity().email, "Rehydrated session");
                let mut state = self.write();
                state.restore(credential);
                state.status()
            }
            Ok(None) => {
                debug!("No persisted session");
                self.read().status()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                let (event, status) = {
                    let mut state = self.write();
                    (state.clear(), state.status())
                };
                self.mirror(&event);
                status
            }
        };
        self.publish(status);
        status.is_authenticated()
    }

    /// Whether an admin is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// The current status, as published to subscribers.
    pub fn status(&self) -> SessionStatus {
        self.read().status()
    }

    /// The current token, read now rather than from an earlier snapshot.
    pub fn token(&self) -> Option<AuthToken> {
        self.read().token().cloned()
    }

    /// The logged-in admin, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.read().identity().cloned()
    }

    /// The token and identity together, if logged in.
    pub fn credential(&self) -> Option<Credential> {
        self.read().credential().cloned()
    }

    /// Watch for status changes, e.g. a forced logout after a 401.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status.subscribe()
    }

    fn mirror(&self, event: &SessionEvent) {
        if let Err(e) = self.inner.persistence.apply(event) {
            warn!(error = %e, "Failed to persist session change");
        }
    }

    fn publish(&self, status: SessionStatus) {
        self.inner.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    fn begin_transition(&self) -> MutexGuard<'_, ()> {
        self.inner
            .transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("SessionStore")
            .field("status", &state.status())
            .field("identity", &state.identity())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, StorageError};

    fn token(s: &str) -> AuthToken {
        AuthToken::new(s).unwrap()
    }

    fn store_with(persistence: &MemoryPersistence) -> SessionStore {
        SessionStore::new(Arc::new(persistence.clone()))
    }

    #[test]
    fn scenario_a_set_auth_persists_token() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);

        store.set_auth(token("tok-123"), Identity::admin("a@b.com"));

        assert!(store.is_authenticated());
        let stored = persistence.stored().unwrap();
        assert_eq!(stored.token().as_str(), "tok-123");
        assert_eq!(stored.identity().role.as_str(), "admin");
    }

    #[test]
    fn set_auth_then_reload_restores_session() {
        let persistence = MemoryPersistence::new();
        store_with(&persistence).set_auth(token("tok-9"), Identity::admin("x@y.org").with_id(3));

        let reloaded = SessionStore::init(Arc::new(persistence.clone()));

        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().unwrap().as_str(), "tok-9");
        assert_eq!(reloaded.identity().unwrap().id, Some(3));
    }

    #[test]
    fn clear_twice_leaves_nothing_behind() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        store.set_auth(token("tok-123"), Identity::admin("a@b.com"));

        store.clear_auth();
        store.clear_auth();

        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.identity().is_none());
        assert!(persistence.stored().is_none());
    }

    #[test]
    fn scenario_b_rehydrate_without_stored_session() {
        let store = SessionStore::init(Arc::new(MemoryPersistence::new()));
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn token_never_without_identity() {
        let store = SessionStore::in_memory();
        let check = |s: &SessionStore| {
            let credential = s.credential();
            assert_eq!(s.token().is_some(), s.identity().is_some());
            assert_eq!(credential.is_some(), s.is_authenticated());
        };

        check(&store);
        store.set_auth(token("a"), Identity::admin("a@b.com"));
        check(&store);
        store.clear_auth();
        check(&store);
        store.rehydrate();
        check(&store);
    }

    #[test]
    fn subscribers_see_forced_logout() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow_and_update(), SessionStatus::Anonymous);

        store.set_auth(token("t"), Identity::admin("a@b.com"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionStatus::Authenticated);

        store.clear_auth();
        assert_eq!(*rx.borrow_and_update(), SessionStatus::Anonymous);

        store.clear_auth();
        assert!(!rx.has_changed().unwrap());
    }

    struct BrokenPersistence;

    impl SessionPersistence for BrokenPersistence {
        fn load(&self) -> crate::Result<Option<Credential>> {
            Err(Error::Storage(StorageError::Corrupt {
                path: "session.json".into(),
                message: "unexpected end of file".into(),
            }))
        }

        fn apply(&self, _event: &SessionEvent) -> crate::Result<()> {
            Err(Error::Storage(StorageError::Io {
                path: "session.json".into(),
                message: "read-only file system".into(),
            }))
        }
    }

    #[test]
    fn persistence_failure_keeps_memory_state() {
        let store = SessionStore::new(Arc::new(BrokenPersistence));
        store.set_auth(token("tok-123"), Identity::admin("a@b.com"));
        assert!(store.is_authenticated());

        store.clear_auth();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn unreadable_storage_rehydrates_anonymous() {
        let store = SessionStore::init(Arc::new(BrokenPersistence));
        assert!(!store.is_authenticated());
    }

    /// Reads the store back from inside `apply`, which would deadlock if
    /// persistence ran under the state lock.
    #[derive(Default)]
    struct ReadBack {
        store: Mutex<Option<SessionStore>>,
        seen: Mutex<Vec<bool>>,
    }

    impl SessionPersistence for ReadBack {
        fn load(&self) -> crate::Result<Option<Credential>> {
            Ok(None)
        }

        fn apply(&self, _event: &SessionEvent) -> crate::Result<()> {
            let store = self.store.lock().unwrap().clone();
            if let Some(store) = store {
                self.seen.lock().unwrap().push(store.is_authenticated());
            }
            Ok(())
        }
    }

    #[test]
    fn persistence_runs_outside_state_lock() {
        let persistence = Arc::new(ReadBack::default());
        let store = SessionStore::new(persistence.clone());
        *persistence.store.lock().unwrap() = Some(store.clone());

        store.set_auth(token("tok-123"), Identity::admin("a@b.com"));
        store.clear_auth();

        assert_eq!(*persistence.seen.lock().unwrap(), vec![true, false]);
        persistence.store.lock().unwrap().take();
    }

    #[test]
    fn debug_redacts_token() {
        let store = SessionStore::in_memory();
        store.set_auth(token("super-secret"), Identity::admin("a@b.com"));
        let debug = format!("{:?}", store);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Authenticated"));
    }
}
