use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::application::models::Gender;
use crate::api::application::schema::validate_linkedin_profile;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Recruiter,
    JobSeeker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::JobSeeker => "job_seeker",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "recruiter" => Some(Role::Recruiter),
            "job_seeker" => Some(Role::JobSeeker),
            _ => None,
        }
    }
}

/// Signup payload
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    #[validate(email(message = "Make sure your email address is correct (e.g. name@domain.com)"))]
    pub email: String,
    pub role: Role,
    #[validate(length(min = 1, max = 120, message = "Full name must be between 1 and 120 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 3, max = 40, message = "Username must be between 3 and 40 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Company name must be between 1 and 120 characters"))]
    pub company_name: Option<String>,
}

/// Partial update of the caller's own profile
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[validate(length(min = 1, max = 120, message = "Full name must be between 1 and 120 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 3, max = 40, message = "Username must be between 3 and 40 characters"))]
    pub username: Option<String>,
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Company name must be between 1 and 120 characters"))]
    pub company_name: Option<String>,
    #[validate(length(min = 6, max = 20, message = "Phone number must be between 6 and 20 characters"))]
    pub phone_number: Option<String>,
    pub gender: Option<Gender>,
    #[validate(length(min = 1, message = "Domicile cannot be empty"))]
    pub domicile: Option<String>,
    #[validate(custom(function = "validate_linkedin_profile"))]
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_valid_email() {
        let profile = NewProfile {
            email: "nama.domain.com".to_string(),
            role: Role::JobSeeker,
            full_name: None,
            username: None,
            company_name: None,
        };
        let errors = profile.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn role_round_trips_through_storage_form() {
        for role in [Role::Recruiter, Role::JobSeeker] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn patch_rejects_bad_avatar_url() {
        let patch = ProfilePatch {
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(ProfilePatch::default().validate().is_ok());
    }

    #[test]
    fn patch_linkedin_must_be_a_profile_link() {
        let patch = ProfilePatch {
            linkedin_url: Some("https://www.linkedin.com/company/acme".to_string()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("linkedin_url"));

        let patch = ProfilePatch {
            linkedin_url: Some("https://www.linkedin.com/in/rina-putri".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
