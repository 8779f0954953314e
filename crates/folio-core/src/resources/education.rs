//! Education entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::Resource;
use super::validate::{Validate, optional_year, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: ResourceId,
    /// Institute name.
    pub name: String,
    pub stream: String,
    pub grade: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for an education entry.
///
/// Start and end dates are four-digit years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub name: String,
    pub stream: String,
    pub grade: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Validate for EducationInput {
    fn validate(&self) -> Result<(), InvalidInputError> {
        required("name", &self.name, "Institute name is required")?;
        required("stream", &self.stream, "Stream is required")?;
        required("grade", &self.grade, "Grade is required")?;
        required("degree", &self.degree, "Degree is required")?;
        optional_year("startDate", &self.start_date, "2022")?;
        optional_year("endDate", &self.end_date, "2024")?;
        Ok(())
    }
}

impl Resource for Education {
    const COLLECTION: &'static str = "education";
    const LIST_NAME: &'static str = "educations";
    type Input = EducationInput;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn to_input(&self) -> EducationInput {
        EducationInput {
            name: self.name.clone(),
            stream: self.stream.clone(),
            grade: self.grade.clone(),
            degree: self.degree.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}
