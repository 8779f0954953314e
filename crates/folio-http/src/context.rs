//! Owns the session store and dispatcher for one admin session.

use std::sync::Arc;

use tracing::debug;

use folio_core::{ApiUrl, Resource, Result, SessionPersistence, SessionStatus, SessionStore};

use crate::admin::AdminClient;
use crate::dispatcher::Dispatcher;
use crate::resources::{PortfolioApi, ResourceApi};

/// Explicit lifecycle for the session layer.
///
/// `init` rehydrates the session and wires the dispatcher to it; every API
/// handle handed out shares both. `teardown` ends the context.
///
/// ```no_run
/// # async fn run() -> folio_core::Result<()> {
/// use std::sync::Arc;
/// use folio_core::{ApiUrl, MemoryPersistence};
/// use folio_core::resources::Skill;
/// use folio_http::AdminContext;
///
/// let ctx = AdminContext::init(
///     ApiUrl::new("http://localhost:3001")?,
///     Arc::new(MemoryPersistence::new()),
/// )?;
/// let skills = ctx.resource::<Skill>().list().await?;
/// println!("{} skills", skills.len());
/// ctx.teardown();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AdminContext {
    session: SessionStore,
    dispatcher: Dispatcher,
}

impl AdminContext {
    /// Rehydrate the session from `persistence` and build a dispatcher.
    pub fn init(api_url: ApiUrl, persistence: Arc<dyn SessionPersistence>) -> Result<Self> {
        let session = SessionStore::init(persistence);
        let dispatcher = Dispatcher::new(api_url, session.clone())?;
        Ok(Self {
            session,
            dispatcher,
        })
    }

    /// Like [`init`](Self::init), with a caller-configured HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        api_url: ApiUrl,
        persistence: Arc<dyn SessionPersistence>,
    ) -> Self {
        let session = SessionStore::init(persistence);
        let dispatcher = Dispatcher::with_client(client, api_url, session.clone());
        Self {
            session,
            dispatcher,
        }
    }

    /// The session shared by every API handle.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The dispatcher behind every API handle.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Login, logout and session checks.
    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.dispatcher.clone())
    }

    /// Profile, portfolio and contact messages.
    pub fn portfolio(&self) -> PortfolioApi {
        PortfolioApi::new(self.dispatcher.clone())
    }

    /// CRUD and sync for one collection.
    pub fn resource<R: Resource>(&self) -> ResourceApi<R> {
        ResourceApi::new(self.dispatcher.clone())
    }

    /// End the context. Durable state is left as the last transition wrote
    /// it; returns the status it ended in.
    pub fn teardown(self) -> SessionStatus {
        let status = self.session.status();
        debug!(?status, "Admin context torn down");
        status
    }
}
