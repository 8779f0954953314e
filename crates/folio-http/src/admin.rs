//! Login, logout and session validation.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use folio_core::error::{AuthError, Error};
use folio_core::{AuthToken, Credential, Identity, LoginCredentials, Result, Scope};

use crate::dispatcher::Dispatcher;

/// `data` of a successful login. Older servers name the identity `user`.
#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    #[serde(alias = "user")]
    admin: Identity,
}

/// Session operations against the admin API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    dispatcher: Dispatcher,
}

impl AdminClient {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Log in and store the resulting credential in the session.
    ///
    /// Credentials are validated before anything is sent. A rejected login
    /// leaves the session anonymous.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed email or short password,
    /// `Auth(LoginRejected)` when the API refuses the credentials, and
    /// `Transport` when the API could not be reached.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Credential> {
        credentials.validate()?;

        let data = match self
            .dispatcher
            .post::<_, LoginData>(Scope::Admin, "login", credentials)
            .await
        {
            Ok(Some(data)) => data,
            Ok(None) => return Err(self.reject("Login response carried no token".into())),
            Err(Error::Api(err)) => {
                let message = err
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Login failed (HTTP {})", err.status));
                return Err(self.reject(message));
            }
            Err(e) => return Err(e),
        };

        let token = match AuthToken::new(data.token) {
            Ok(token) => token,
            Err(e) => {
                self.dispatcher.session().clear_auth();
                return Err(e);
            }
        };
        let credential = Credential::new(token, data.admin);
        self.dispatcher
            .session()
            .set_credential(credential.clone());

        info!("Logged in");
        Ok(credential)
    }

    /// Forget the session. No server call is made.
    pub fn logout(&self) {
        self.dispatcher.session().clear_auth();
    }

    /// Ask the API whether the stored token is still accepted.
    ///
    /// Returns false without a request when there is no session. A 401 or a
    /// `success: false` answer clears the session and returns false. Other
    /// failures are returned and leave the session alone.
    #[instrument(skip(self))]
    pub async fn validate_session(&self) -> Result<bool> {
        let session = self.dispatcher.session();
        if !session.is_authenticated() {
            return Ok(false);
        }

        match self
            .dispatcher
            .get_optional::<serde_json::Value>(Scope::Admin, "validate")
            .await
        {
            Ok(_) => Ok(true),
            Err(Error::Api(err)) if err.is_unauthorized() || (200..300).contains(&err.status) => {
                warn!(status = err.status, "Session rejected by API");
                session.clear_auth();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// The logged-in admin, or `NotAuthenticated`.
    pub fn whoami(&self) -> Result<Identity> {
        self.dispatcher
            .session()
            .identity()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    fn reject(&self, message: String) -> Error {
        warn!(%message, "Login rejected");
        self.dispatcher.session().clear_auth();
        AuthError::LoginRejected { message }.into()
    }
}
