//! On-disk formats of the two durable session copies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{Credential, Identity};

/// Name of the key-value entry, also its file stem.
pub const AUTH_ENTRY_NAME: &str = "portfolio-admin-auth";

/// Name of the cookie carrying the bare token.
pub const TOKEN_COOKIE_NAME: &str = "portfolio-admin-token";

/// How long the token cookie lives after login.
pub const COOKIE_TTL_DAYS: i64 = 7;

/// The key-value entry: `{ "state": {..}, "version": 0 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthEntry {
    pub state: AuthEntryState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEntryState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthEntry {
    /// The entry written on login.
    pub fn from_credential(credential: &Credential) -> Self {
        Self {
            state: AuthEntryState {
                token: Some(credential.token().as_str().to_string()),
                user: Some(credential.identity().clone()),
                is_authenticated: true,
            },
            version: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: DateTime<Utc>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl StoredCookie {
    /// The token cookie written on login.
    pub fn token(credential: &Credential, now: DateTime<Utc>, secure: bool) -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            value: credential.token().as_str().to_string(),
            path: "/".to_string(),
            expires: now + Duration::days(COOKIE_TTL_DAYS),
            secure,
            same_site: SameSite::Strict,
        }
    }

    /// Returns true once `expires` has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// The cookie jar file. Holds other cookies untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CookieJar {
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
}

impl CookieJar {
    /// Look up a cookie by name.
    pub fn get(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    /// Add a cookie, replacing any with the same name.
    pub fn insert(&mut self, cookie: StoredCookie) {
        self.remove(&cookie.name);
        self.cookies.push(cookie);
    }

    /// Returns true if a cookie was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.cookies.len();
        self.cookies.retain(|c| c.name != name);
        self.cookies.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AuthToken;

    fn credential() -> Credential {
        Credential::new(
            AuthToken::new("tok-123").unwrap(),
            Identity::admin("a@b.com").with_id(1),
        )
    }

    #[test]
    fn auth_entry_wire_shape() {
        let value = serde_json::to_value(AuthEntry::from_credential(&credential())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "state": {
                    "token": "tok-123",
                    "user": {"id": 1, "email": "a@b.com", "role": "admin"},
                    "isAuthenticated": true
                },
                "version": 0
            })
        );
    }

    #[test]
    fn token_cookie_attributes() {
        let now = Utc::now();
        let cookie = StoredCookie::token(&credential(), now, false);
        assert_eq!(cookie.name, "portfolio-admin-token");
        assert_eq!(cookie.value, "tok-123");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.expires - now, Duration::days(7));
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(!cookie.secure);
        assert!(!cookie.is_expired(now));
        assert!(cookie.is_expired(now + Duration::days(8)));

        let json = serde_json::to_value(&cookie).unwrap();
        assert_eq!(json["sameSite"], "Strict");
    }

    #[test]
    fn jar_replaces_and_keeps_unrelated_cookies() {
        let now = Utc::now();
        let mut jar = CookieJar::default();
        jar.insert(StoredCookie {
            name: "theme".into(),
            value: "dark".into(),
            path: "/".into(),
            expires: now,
            secure: false,
            same_site: SameSite::Lax,
        });
        jar.insert(StoredCookie::token(&credential(), now, false));
        jar.insert(StoredCookie::token(&credential(), now, true));

        assert_eq!(jar.cookies.len(), 2);
        assert!(jar.get(TOKEN_COOKIE_NAME).unwrap().secure);

        assert!(jar.remove(TOKEN_COOKIE_NAME));
        assert!(!jar.remove(TOKEN_COOKIE_NAME));
        assert!(jar.get("theme").is_some());
    }
}
