//! Projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::Resource;
use super::validate::{Validate, is_http_url, optional_url, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Personal,
    Client,
    Academic,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    #[serde(default)]
    pub github_links: Vec<String>,
    #[serde(default)]
    pub project_links: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    #[serde(default)]
    pub github_links: Vec<String>,
    #[serde(default)]
    pub project_links: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

fn links(field: &str, urls: &[String]) -> Result<(), InvalidInputError> {
    for (i, url) in urls.iter().enumerate() {
        let field = format!("{}[{}]", field, i);
        if url.trim().is_empty() {
            return Err(InvalidInputError::field(field, "Link URL is required"));
        }
        if !is_http_url(url.trim()) {
            return Err(InvalidInputError::field(field, "Invalid URL"));
        }
    }
    Ok(())
}

impl Validate for ProjectInput {
    fn validate(&self) -> Result<(), InvalidInputError> {
        required("name", &self.name, "Project name is required")?;
        required("description", &self.description, "Description is required")?;
        optional_url("image", &self.image)?;
        links("githubLinks", &self.github_links)?;
        links("projectLinks", &self.project_links)?;
        Ok(())
    }
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const LIST_NAME: &'static str = "projects";
    type Input = ProjectInput;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn to_input(&self) -> ProjectInput {
        ProjectInput {
            name: self.name.clone(),
            kind: self.kind,
            image: self.image.clone(),
            description: self.description.clone(),
            github_links: self.github_links.clone(),
            project_links: self.project_links.clone(),
            technologies: self.technologies.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProjectInput {
        ProjectInput {
            name: "folio".into(),
            kind: ProjectType::Personal,
            image: None,
            description: "Portfolio CMS".into(),
            github_links: vec!["https://github.com/me/folio".into()],
            project_links: vec![],
            technologies: vec!["Rust".into()],
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn valid_project() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn rejects_bad_link() {
        let mut project = input();
        project.project_links.push("folio.dev".into());
        let err = project.validate().unwrap_err();
        assert_eq!(err.to_string(), "projectLinks[0]: Invalid URL");
    }

    #[test]
    fn status_wire_names() {
        let status: ProjectStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, ProjectStatus::InProgress);
    }

    #[test]
    fn payload_uses_type_key() {
        let value = serde_json::to_value(input()).unwrap();
        assert_eq!(value["type"], "personal");
        assert_eq!(value["githubLinks"][0], "https://github.com/me/folio");
    }
}
