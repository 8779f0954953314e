//! Pure session state transitions.

use crate::identity::{Credential, Identity};
use crate::tokens::AuthToken;

/// Whether an admin is currently logged in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Anonymous,
    Authenticated,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated)
    }
}

/// What a transition did, for subscribers that mirror the session
/// somewhere durable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A credential was stored in memory.
    Established(Credential),
    /// The session was cleared. Emitted even if it was already anonymous.
    Cleared,
}

/// In-memory session state: zero or one credential.
///
/// Transitions return the event describing them and never perform I/O.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    credential: Option<Credential>,
}

impl SessionState {
    /// A fresh anonymous state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential, entering `Authenticated`.
    pub fn set_auth(&mut self, credential: Credential) -> SessionEvent {
        self.credential = Some(credential.clone());
        SessionEvent::Established(credential)
    }

    /// Drop the credential, entering `Anonymous`.
    pub fn clear(&mut self) -> SessionEvent {
        self.credential = None;
        SessionEvent::Cleared
    }

    /// Put back a credential read from durable storage.
    ///
    /// Produces no event: the durable copy is where it came from.
    pub fn restore(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Anonymous or Authenticated.
    pub fn status(&self) -> SessionStatus {
        if self.credential.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.credential.as_ref().map(Credential::token)
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.credential.as_ref().map(Credential::identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(token: &str) -> Credential {
        Credential::new(AuthToken::new(token).unwrap(), Identity::admin("a@b.com"))
    }

    #[test]
    fn starts_anonymous() {
        let state = SessionState::new();
        assert_eq!(state.status(), SessionStatus::Anonymous);
        assert!(state.token().is_none());
        assert!(state.identity().is_none());
    }

    #[test]
    fn set_auth_emits_established() {
        let mut state = SessionState::new();
        let event = state.set_auth(credential("tok-123"));

        assert_eq!(event, SessionEvent::Established(credential("tok-123")));
        assert!(state.is_authenticated());
        assert_eq!(state.token().unwrap().as_str(), "tok-123");
        assert_eq!(state.identity().unwrap().email, "a@b.com");
    }

    #[test]
    fn clear_twice_matches_clear_once() {
        let mut once = SessionState::new();
        once.set_auth(credential("tok-123"));
        once.clear();

        let mut twice = SessionState::new();
        twice.set_auth(credential("tok-123"));
        twice.clear();
        let event = twice.clear();

        assert_eq!(event, SessionEvent::Cleared);
        assert_eq!(once, twice);
        assert!(!twice.is_authenticated());
    }

    #[test]
    fn token_and_identity_present_together() {
        let mut state = SessionState::new();
        let check = |s: &SessionState| assert_eq!(s.token().is_some(), s.identity().is_some());

        check(&state);
        state.set_auth(credential("a"));
        check(&state);
        state.set_auth(credential("b"));
        check(&state);
        state.clear();
        check(&state);
        state.restore(credential("c"));
        check(&state);
    }

    #[test]
    fn machine_cycles() {
        let mut state = SessionState::new();
        for token in ["one", "two", "three"] {
            state.set_auth(credential(token));
            assert_eq!(state.status(), SessionStatus::Authenticated);
            state.clear();
            assert_eq!(state.status(), SessionStatus::Anonymous);
        }
    }
}
