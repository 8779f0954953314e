//! Portfolio resource models.
//!
//! The API owns these records; folio only reads them, validates edits and
//! sends them back. Wire names are camelCase.

mod contact;
mod education;
mod experience;
mod profile;
mod project;
mod skill;
mod sync;
pub mod validate;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::ResourceId;

pub use contact::Contact;
pub use education::{Education, EducationInput};
pub use experience::{Experience, ExperienceInput, ExperienceType};
pub use profile::{PortfolioData, Profile, ProfileInput};
pub use project::{Project, ProjectInput, ProjectStatus, ProjectType};
pub use skill::{Skill, SkillInput};
pub use sync::{Entry, SyncPlan};
pub use validate::Validate;

/// A collection edited as a list: fetched whole, submitted as a batch of
/// creates, updates and deletes.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment of the collection (`/api/<COLLECTION>`).
    const COLLECTION: &'static str;

    /// Name of the list in validation messages (`educations[0].name`).
    const LIST_NAME: &'static str;

    /// The payload sent on create and update.
    type Input: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static;

    fn id(&self) -> ResourceId;

    /// The editable payload for this record.
    fn to_input(&self) -> Self::Input;
}
