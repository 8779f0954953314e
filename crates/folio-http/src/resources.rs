//! Typed access to the portfolio collections.

use std::fmt;
use std::marker::PhantomData;

use futures_util::future::join_all;
use tracing::{debug, info, instrument};

use folio_core::resources::{Contact, PortfolioData, Profile, ProfileInput};
use folio_core::{Entry, Error, Resource, ResourceId, Result, Scope, SyncPlan, Validate};

use crate::dispatcher::Dispatcher;

/// Outcome of a successful [`ResourceApi::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl SyncReport {
    /// Number of requests the batch sent.
    pub fn total(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted",
            self.created, self.updated, self.deleted
        )
    }
}

/// One collection of the API: read publicly, written through the admin scope.
pub struct ResourceApi<R> {
    dispatcher: Dispatcher,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self::new(self.dispatcher.clone())
    }
}

impl<R> fmt::Debug for ResourceApi<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("resource", &std::any::type_name::<R>())
            .finish_non_exhaustive()
    }
}

impl<R> ResourceApi<R> {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    fn item_path(id: ResourceId) -> String {
        format!("{}/{}", R::COLLECTION, id)
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    pub async fn list(&self) -> Result<Vec<R>> {
        let items: Vec<R> = self.dispatcher.get(Scope::Public, R::COLLECTION).await?;
        debug!(count = items.len(), "Listed records");
        Ok(items)
    }

    /// Validate and create one record. Returns the record if the API echoed it.
    #[instrument(skip(self, input), fields(collection = R::COLLECTION))]
    pub async fn create(&self, input: &R::Input) -> Result<Option<R>> {
        input.validate()?;
        self.send_create(input).await
    }

    #[instrument(skip(self, input), fields(collection = R::COLLECTION))]
    pub async fn update(&self, id: ResourceId, input: &R::Input) -> Result<Option<R>> {
        input.validate()?;
        self.send_update(id, input).await
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    pub async fn delete(&self, id: ResourceId) -> Result<()> {
        self.dispatcher
            .delete(Scope::Admin, &Self::item_path(id))
            .await
    }

    /// Submit an edited list against the records it was loaded from.
    ///
    /// Originals missing from `edited` are deleted, rows with an id are
    /// updated and rows without one are created. Nothing is sent unless every
    /// row validates. The requests run concurrently; all of them finish
    /// before an error is returned. A 401 wins over other failures, since
    /// it has already cleared the session.
    #[instrument(skip(self, original, edited), fields(collection = R::COLLECTION))]
    pub async fn sync(&self, original: &[R], edited: Vec<Entry<R::Input>>) -> Result<SyncReport> {
        let plan = SyncPlan::compute(original, edited)?;
        if plan.is_empty() {
            debug!("Nothing to sync");
            return Ok(SyncReport::default());
        }

        let SyncPlan {
            deletes,
            updates,
            creates,
        } = plan;

        let (deleted, updated, created) = futures_util::join!(
            join_all(deletes.iter().map(|id| self.delete(*id))),
            join_all(updates.iter().map(|(id, input)| self.send_update(*id, input))),
            join_all(creates.iter().map(|input| self.send_create(input))),
        );

        let report = SyncReport {
            created: created.len(),
            updated: updated.len(),
            deleted: deleted.len(),
        };
        let errors: Vec<Error> = deleted
            .into_iter()
            .filter_map(|r| r.err())
            .chain(updated.into_iter().filter_map(|r| r.err()))
            .chain(created.into_iter().filter_map(|r| r.err()))
            .collect();
        if let Some(err) = first_error(errors) {
            return Err(err);
        }

        info!(%report, "Synced collection");
        Ok(report)
    }

    async fn send_create(&self, input: &R::Input) -> Result<Option<R>> {
        self.dispatcher
            .post(Scope::Admin, R::COLLECTION, input)
            .await
    }

    async fn send_update(&self, id: ResourceId, input: &R::Input) -> Result<Option<R>> {
        self.dispatcher
            .put(Scope::Admin, &Self::item_path(id), input)
            .await
    }
}

/// The error a failed batch reports: the first 401, else the first failure.
fn first_error(errors: Vec<Error>) -> Option<Error> {
    match errors.iter().position(Error::is_unauthorized) {
        Some(index) => errors.into_iter().nth(index),
        None => errors.into_iter().next(),
    }
}

/// The profile, the aggregated portfolio and incoming contact messages.
#[derive(Debug, Clone)]
pub struct PortfolioApi {
    dispatcher: Dispatcher,
}

impl PortfolioApi {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Everything the public site shows, in one call.
    #[instrument(skip(self))]
    pub async fn portfolio(&self) -> Result<PortfolioData> {
        self.dispatcher.get(Scope::Public, "portfolio").await
    }

    /// The profile part of the portfolio. `None` before one is saved.
    pub async fn profile(&self) -> Result<Option<Profile>> {
        Ok(self.portfolio().await?.profile)
    }

    /// Normalize, validate and save the profile. The API upserts.
    #[instrument(skip(self, input))]
    pub async fn save_profile(&self, input: ProfileInput) -> Result<Option<Profile>> {
        let input = input.normalized();
        input.validate()?;
        self.dispatcher.post(Scope::Admin, "profile", &input).await
    }

    #[instrument(skip(self))]
    pub async fn contacts(&self) -> Result<Vec<Contact>> {
        self.dispatcher.get(Scope::Public, "contacts").await
    }
}
