//! The authenticated request dispatcher.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use folio_core::error::{ApiError, Error, TransportError};
use folio_core::{ApiUrl, Envelope, Result, Scope, SessionStore};

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Build the HTTP client used by [`Dispatcher::new`].
///
/// No timeout unless one is given.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(transport_error)
}

/// Observes the status of every response before the caller sees it.
///
/// Hooks run synchronously, after the response arrives and before its body
/// is decoded, so their side effects happen-before the call returns.
pub trait ResponseHook: Send + Sync {
    /// Called once per response, with the scope the request was sent under.
    fn on_response(&self, scope: Scope, status: StatusCode);
}

/// Clears the session when an admin-scope request is answered with 401.
///
/// Public-scope requests never carry the token, so their 401s say nothing
/// about the session and are ignored.
pub struct ClearOnUnauthorized {
    session: SessionStore,
}

impl ClearOnUnauthorized {
    /// A hook clearing `session`.
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl ResponseHook for ClearOnUnauthorized {
    fn on_response(&self, scope: Scope, status: StatusCode) {
        if scope == Scope::Admin && status == StatusCode::UNAUTHORIZED {
            warn!(?scope, "API answered 401, clearing session");
            self.session.clear_auth();
        }
    }
}

/// Sends every API request.
///
/// Admin-scope requests carry `Authorization: Bearer <token>` when the
/// session holds one, read at send time. Public-scope requests never do.
/// A 401 on an admin-scope request clears the session through
/// [`ClearOnUnauthorized`]; the error still reaches the caller unchanged.
///
/// Cheap to clone (internal `Arc`).
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    client: reqwest::Client,
    api_url: ApiUrl,
    session: SessionStore,
    hooks: RwLock<Vec<Arc<dyn ResponseHook>>>,
}

impl Dispatcher {
    /// Create a dispatcher with a default client and the 401 hook registered.
    pub fn new(api_url: ApiUrl, session: SessionStore) -> Result<Self> {
        Ok(Self::with_client(http_client(None)?, api_url, session))
    }

    /// Create a dispatcher around an existing client. The 401 hook is
    /// registered here too.
    pub fn with_client(client: reqwest::Client, api_url: ApiUrl, session: SessionStore) -> Self {
        let hook: Arc<dyn ResponseHook> = Arc::new(ClearOnUnauthorized::new(session.clone()));
        Self {
            inner: Arc::new(DispatcherInner {
                client,
                api_url,
                session,
                hooks: RwLock::new(vec![hook]),
            }),
        }
    }

    /// Add a hook that runs after the ones already registered.
    pub fn register_hook(&self, hook: Arc<dyn ResponseHook>) {
        self.inner
            .hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    /// The base URL every request is resolved against.
    pub fn api_url(&self) -> &ApiUrl {
        &self.inner.api_url
    }

    /// The session whose token decorates admin requests.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// GET whose envelope must carry `data`.
    pub async fn get<R>(&self, scope: Scope, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let (status, envelope) = self.send::<(), R>(Method::GET, scope, path, None).await?;
        envelope.into_data(status.as_u16())
    }

    /// GET whose envelope may omit `data`.
    pub async fn get_optional<R>(&self, scope: Scope, path: &str) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let (status, envelope) = self.send::<(), R>(Method::GET, scope, path, None).await?;
        envelope.into_result(status.as_u16())
    }

    /// POST a JSON body. The envelope may omit `data`.
    pub async fn post<B, R>(&self, scope: Scope, path: &str, body: &B) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let (status, envelope) = self.send(Method::POST, scope, path, Some(body)).await?;
        envelope.into_result(status.as_u16())
    }

    /// PUT a JSON body. The envelope may omit `data`.
    pub async fn put<B, R>(&self, scope: Scope, path: &str, body: &B) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let (status, envelope) = self.send(Method::PUT, scope, path, Some(body)).await?;
        envelope.into_result(status.as_u16())
    }

    /// DELETE. Any `data` in the envelope is ignored.
    pub async fn delete(&self, scope: Scope, path: &str) -> Result<()> {
        let (status, envelope) = self
            .send::<(), serde_json::Value>(Method::DELETE, scope, path, None)
            .await?;
        envelope.into_result(status.as_u16()).map(drop)
    }

    #[instrument(skip(self, body), fields(api = %self.inner.api_url))]
    async fn send<B, R>(
        &self,
        method: Method,
        scope: Scope,
        path: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, Envelope<R>)>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.inner.api_url.endpoint(scope, path);
        debug!(%method, %url, "API request");

        let mut request = self
            .inner
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if scope == Scope::Admin {
            match self.inner.session.token() {
                Some(token) => request = request.header(AUTHORIZATION, token.bearer()),
                None => debug!("No session token, sending admin request unauthenticated"),
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(%status, "API response");

        self.run_hooks(scope, status);
        self.handle_response(response).await
    }

    fn run_hooks(&self, scope: Scope, status: StatusCode) {
        let hooks = self
            .inner
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for hook in hooks {
            hook.on_response(scope, status);
        }
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<(StatusCode, Envelope<R>)> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(transport_error)?;
            let envelope = serde_json::from_slice(&bytes).map_err(|e| {
                Error::Transport(TransportError::Decode {
                    message: e.to_string(),
                })
            })?;
            Ok((status, envelope))
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// The envelope message of a failed response, if the body has one.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        match response.json::<Envelope<serde_json::Value>>().await {
            Ok(envelope) if !envelope.message.trim().is_empty() => {
                ApiError::new(status, Some(envelope.message))
            }
            _ => ApiError::new(status, None),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api_url", &self.inner.api_url)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use folio_core::{AuthToken, Identity};

    struct Recorder(Mutex<Vec<(Scope, StatusCode)>>);

    impl ResponseHook for Recorder {
        fn on_response(&self, scope: Scope, status: StatusCode) {
            self.0.lock().unwrap().push((scope, status));
        }
    }

    fn authenticated() -> SessionStore {
        let session = SessionStore::in_memory();
        session.set_auth(AuthToken::new("tok-123").unwrap(), Identity::admin("a@b.com"));
        session
    }

    #[test]
    fn clear_hook_only_reacts_to_401() {
        let session = authenticated();
        let hook = ClearOnUnauthorized::new(session.clone());

        hook.on_response(Scope::Admin, StatusCode::INTERNAL_SERVER_ERROR);
        hook.on_response(Scope::Admin, StatusCode::FORBIDDEN);
        assert!(session.is_authenticated());

        hook.on_response(Scope::Admin, StatusCode::UNAUTHORIZED);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clear_hook_ignores_public_401() {
        let session = authenticated();
        let hook = ClearOnUnauthorized::new(session.clone());

        hook.on_response(Scope::Public, StatusCode::UNAUTHORIZED);
        assert!(session.is_authenticated());
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let session = authenticated();
        let dispatcher =
            Dispatcher::new(ApiUrl::new(ApiUrl::DEFAULT).unwrap(), session.clone()).unwrap();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        dispatcher.register_hook(recorder.clone());

        dispatcher.run_hooks(Scope::Public, StatusCode::UNAUTHORIZED);
        assert!(session.is_authenticated());

        dispatcher.run_hooks(Scope::Admin, StatusCode::UNAUTHORIZED);
        assert!(!session.is_authenticated());

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                (Scope::Public, StatusCode::UNAUTHORIZED),
                (Scope::Admin, StatusCode::UNAUTHORIZED)
            ]
        );
    }

    #[test]
    fn debug_hides_token() {
        let dispatcher =
            Dispatcher::new(ApiUrl::new(ApiUrl::DEFAULT).unwrap(), authenticated()).unwrap();
        assert!(!format!("{:?}", dispatcher).contains("tok-123"));
    }
}
