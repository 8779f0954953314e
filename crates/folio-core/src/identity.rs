//! Admin identity and the credential pairing a token with it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tokens::AuthToken;

/// Role carried by an admin identity.
///
/// The API has emitted both `"admin"` and `"ADMIN"`; both parse to
/// [`Role::Admin`], which always serializes as `"admin"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Admin,
}

impl Role {
    /// The wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("admin") {
            Ok(Role::Admin)
        } else {
            Err(format!("unknown role '{}'", s))
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The identity record returned by login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    /// An admin identity for the given email.
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            role: Role::Admin,
        }
    }

    /// Attach the server-side id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A token together with the identity it was issued for.
///
/// Sessions only ever hold a whole `Credential`, so a token without an
/// identity (or the reverse) cannot be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    token: AuthToken,
    identity: Identity,
}

impl Credential {
    pub fn new(token: AuthToken, identity: Identity) -> Self {
        Self { token, identity }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Split into token and identity.
    pub fn into_parts(self) -> (AuthToken, Identity) {
        (self.token, self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_accepts_both_spellings() {
        let lower: Role = serde_json::from_str("\"admin\"").unwrap();
        let upper: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(lower, Role::Admin);
        assert_eq!(upper, Role::Admin);
        assert_eq!(serde_json::to_string(&upper).unwrap(), "\"admin\"");
    }

    #[test]
    fn role_rejects_unknown() {
        assert!(serde_json::from_str::<Role>("\"editor\"").is_err());
    }

    #[test]
    fn identity_without_id_or_role() {
        let identity: Identity = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(identity, Identity::admin("a@b.com"));
    }

    #[test]
    fn credential_debug_redacts_token() {
        let credential = Credential::new(
            AuthToken::new("tok-123").unwrap(),
            Identity::admin("a@b.com").with_id(1),
        );
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("a@b.com"));
    }
}
