//! Work and activity experience.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::Resource;
use super::validate::{Validate, optional_url, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    Organization,
    Internship,
    CollegeEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: ResourceId,
    pub organization_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_image: Option<String>,
    pub role: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExperienceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_role: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for an experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInput {
    pub organization_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_image: Option<String>,
    pub role: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExperienceType>,
}

impl Validate for ExperienceInput {
    fn validate(&self) -> Result<(), InvalidInputError> {
        required(
            "organizationName",
            &self.organization_name,
            "Organization name is required",
        )?;
        required("role", &self.role, "Role is required")?;
        required("description", &self.description, "Description is required")?;
        optional_url("organizationImage", &self.organization_image)?;
        Ok(())
    }
}

impl Resource for Experience {
    const COLLECTION: &'static str = "experiences";
    const LIST_NAME: &'static str = "experiences";
    type Input = ExperienceInput;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn to_input(&self) -> ExperienceInput {
        ExperienceInput {
            organization_name: self.organization_name.clone(),
            organization_image: self.organization_image.clone(),
            role: self.role.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_wire_names() {
        let kind: ExperienceType = serde_json::from_str("\"college_event\"").unwrap();
        assert_eq!(kind, ExperienceType::CollegeEvent);
        assert_eq!(
            serde_json::to_string(&ExperienceType::Internship).unwrap(),
            "\"internship\""
        );
    }

    #[test]
    fn requires_role_and_description() {
        let input = ExperienceInput {
            organization_name: "Acme".into(),
            organization_image: None,
            role: "".into(),
            description: "Built things".into(),
            start_date: None,
            end_date: None,
            kind: Some(ExperienceType::Organization),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "role: Role is required");
    }

    #[test]
    fn parses_minimal_record() {
        let exp: Experience = serde_json::from_str(
            r#"{"id":2,"organizationName":"Acme","role":"Engineer",
                "description":"Backend","type":"organization"}"#,
        )
        .unwrap();
        assert_eq!(exp.kind, Some(ExperienceType::Organization));
        assert!(exp.technologies.is_empty());
        assert_eq!(exp.to_input().organization_name, "Acme");
    }
}
