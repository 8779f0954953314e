//! folio-http - HTTP access to the portfolio API.
//!
//! Every request goes through the [`Dispatcher`], which attaches the
//! session token to admin calls and clears the session when the API
//! answers 401. [`AdminClient`], [`ResourceApi`] and [`PortfolioApi`] are
//! typed views over it; [`AdminContext`] builds and owns all of them.

mod admin;
mod context;
mod dispatcher;
mod resources;

pub use admin::AdminClient;
pub use context::AdminContext;
pub use dispatcher::{ClearOnUnauthorized, Dispatcher, ResponseHook, http_client};
pub use resources::{PortfolioApi, ResourceApi, SyncReport};

pub use reqwest::StatusCode;
