//! Core value types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod api_url;
mod resource_id;

pub use api_url::{ApiUrl, Scope};
pub use resource_id::ResourceId;
