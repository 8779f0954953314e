//! The site owner's profile and the public portfolio bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::validate::{Validate, is_email, min_chars, optional_url, present};
use super::{Education, Experience, Project, Skill};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ResourceId,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// The editable payload for this profile.
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            email: self.email.clone(),
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
            website: self.website.clone(),
            linkedin_url: self.linkedin_url.clone(),
            github_url: self.github_url.clone(),
            twitter_url: self.twitter_url.clone(),
            profile_image: self.profile_image.clone(),
            resume: self.resume.clone(),
        }
    }
}

/// Payload for saving the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl ProfileInput {
    /// Drop blank optional fields so they are omitted from the payload.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.phone_number,
            &mut self.address,
            &mut self.bio,
            &mut self.location,
            &mut self.website,
            &mut self.linkedin_url,
            &mut self.github_url,
            &mut self.twitter_url,
            &mut self.profile_image,
            &mut self.resume,
        ] {
            if present(field).is_none() {
                *field = None;
            }
        }
        self
    }
}

impl Validate for ProfileInput {
    fn validate(&self) -> Result<(), InvalidInputError> {
        if !is_email(self.email.trim()) {
            return Err(InvalidInputError::field("email", "Invalid email"));
        }
        min_chars("name", &self.name, 2)?;
        if let Some(phone) = present(&self.phone_number) {
            min_chars("phoneNumber", phone, 10)?;
        }
        optional_url("website", &self.website)?;
        optional_url("linkedinUrl", &self.linkedin_url)?;
        optional_url("githubUrl", &self.github_url)?;
        optional_url("twitterUrl", &self.twitter_url)?;
        optional_url("profileImage", &self.profile_image)?;
        optional_url("resume", &self.resume)?;
        Ok(())
    }
}

/// Everything the public site renders, fetched in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
}
