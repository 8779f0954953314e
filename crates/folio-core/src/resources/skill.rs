//! Skills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::Resource;
use super::validate::{Validate, required};

/// Lowest proficiency a skill can be rated.
pub const MIN_PROFICIENCY: u8 = 1;
/// Highest proficiency a skill can be rated.
pub const MAX_PROFICIENCY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: ResourceId,
    pub name: String,
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: String,
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Validate for SkillInput {
    fn validate(&self) -> Result<(), InvalidInputError> {
        required("name", &self.name, "Skill name is required")?;
        if !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&self.proficiency) {
            return Err(InvalidInputError::field(
                "proficiency",
                format!(
                    "must be between {} and {}",
                    MIN_PROFICIENCY, MAX_PROFICIENCY
                ),
            ));
        }
        Ok(())
    }
}

impl Resource for Skill {
    const COLLECTION: &'static str = "skills";
    const LIST_NAME: &'static str = "skills";
    type Input = SkillInput;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn to_input(&self) -> SkillInput {
        SkillInput {
            name: self.name.clone(),
            proficiency: self.proficiency,
            category: self.category.clone(),
        }
    }
}
