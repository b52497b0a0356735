use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Lifecycle status of a job posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Active,
    Inactive,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
        }
    }

    /// Parse a stored status. Anything unrecognised is treated as `Inactive`
    /// so it never shows up in public listings.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "draft" => JobStatus::Draft,
            "active" => JobStatus::Active,
            _ => JobStatus::Inactive,
        }
    }
}

/// How strongly a job asks for one applicant field
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RequirementLevel {
    Mandatory,
    Optional,
    Off,
}

impl RequirementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementLevel::Mandatory => "Mandatory",
            RequirementLevel::Optional => "Optional",
            RequirementLevel::Off => "Off",
        }
    }

    /// Parse a stored flag, failing closed: null or unknown values become `Off`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("Mandatory") => RequirementLevel::Mandatory,
            Some("Optional") => RequirementLevel::Optional,
            _ => RequirementLevel::Off,
        }
    }
}

/// The applicant profile fields a job can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicantField {
    FullName,
    PhotoProfile,
    Gender,
    Domicile,
    Email,
    PhoneNumber,
    LinkedInLink,
    DateOfBirth,
}

impl ApplicantField {
    pub const ALL: [ApplicantField; 8] = [
        ApplicantField::FullName,
        ApplicantField::PhotoProfile,
        ApplicantField::Gender,
        ApplicantField::Domicile,
        ApplicantField::Email,
        ApplicantField::PhoneNumber,
        ApplicantField::LinkedInLink,
        ApplicantField::DateOfBirth,
    ];

    /// Key used in `minimumProfileInformation`
    pub fn requirement_key(&self) -> &'static str {
        match self {
            ApplicantField::FullName => "fullName",
            ApplicantField::PhotoProfile => "photoProfile",
            ApplicantField::Gender => "gender",
            ApplicantField::Domicile => "domicile",
            ApplicantField::Email => "email",
            ApplicantField::PhoneNumber => "phoneNumber",
            ApplicantField::LinkedInLink => "linkedInLink",
            ApplicantField::DateOfBirth => "dateOfBirth",
        }
    }

    /// Key used in an application submission
    pub fn input_key(&self) -> &'static str {
        match self {
            ApplicantField::FullName => "fullName",
            ApplicantField::PhotoProfile => "photoUrl",
            ApplicantField::Gender => "gender",
            ApplicantField::Domicile => "domicile",
            ApplicantField::Email => "email",
            ApplicantField::PhoneNumber => "phoneNumber",
            ApplicantField::LinkedInLink => "linkedinUrl",
            ApplicantField::DateOfBirth => "dateOfBirth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicantField::FullName => "Full name",
            ApplicantField::PhotoProfile => "Photo Profile",
            ApplicantField::Gender => "Gender",
            ApplicantField::Domicile => "Domicile",
            ApplicantField::Email => "Email",
            ApplicantField::PhoneNumber => "Phone number",
            ApplicantField::LinkedInLink => "LinkedIn link",
            ApplicantField::DateOfBirth => "Date of birth",
        }
    }
}

/// Per-field requirement flags of a job
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequirements {
    pub full_name: RequirementLevel,
    pub photo_profile: RequirementLevel,
    pub gender: RequirementLevel,
    pub domicile: RequirementLevel,
    pub email: RequirementLevel,
    pub phone_number: RequirementLevel,
    #[serde(rename = "linkedInLink")]
    pub linked_in_link: RequirementLevel,
    pub date_of_birth: RequirementLevel,
}

impl ProfileRequirements {
    /// Every field set to the same level
    #[cfg(test)]
    pub fn uniform(level: RequirementLevel) -> Self {
        Self {
            full_name: level,
            photo_profile: level,
            gender: level,
            domicile: level,
            email: level,
            phone_number: level,
            linked_in_link: level,
            date_of_birth: level,
        }
    }

    pub fn level(&self, field: ApplicantField) -> RequirementLevel {
        match field {
            ApplicantField::FullName => self.full_name,
            ApplicantField::PhotoProfile => self.photo_profile,
            ApplicantField::Gender => self.gender,
            ApplicantField::Domicile => self.domicile,
            ApplicantField::Email => self.email,
            ApplicantField::PhoneNumber => self.phone_number,
            ApplicantField::LinkedInLink => self.linked_in_link,
            ApplicantField::DateOfBirth => self.date_of_birth,
        }
    }

    #[cfg(test)]
    pub fn with_level(mut self, field: ApplicantField, level: RequirementLevel) -> Self {
        match field {
            ApplicantField::FullName => self.full_name = level,
            ApplicantField::PhotoProfile => self.photo_profile = level,
            ApplicantField::Gender => self.gender = level,
            ApplicantField::Domicile => self.domicile = level,
            ApplicantField::Email => self.email = level,
            ApplicantField::PhoneNumber => self.phone_number = level,
            ApplicantField::LinkedInLink => self.linked_in_link = level,
            ApplicantField::DateOfBirth => self.date_of_birth = level,
        }
        self
    }
}

/// Salary range offered for a job
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Validate)]
#[validate(schema(function = "validate_salary_range"))]
pub struct JobSalary {
    #[validate(range(min = 0, message = "Must be greater than 0"))]
    pub minimum: i64,
    #[validate(range(min = 0, message = "Must be greater than 0"))]
    pub maximum: i64,
}

fn validate_salary_range(salary: &JobSalary) -> Result<(), ValidationError> {
    if salary.maximum < salary.minimum {
        let mut error = ValidationError::new("salary_range");
        error.message = Some(Cow::from(
            "Maximum salary must be greater than or equal to minimum salary",
        ));
        return Err(error);
    }
    Ok(())
}

/// Job opening submitted by a recruiter
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobOpening {
    #[validate(length(min = 1, message = "Job name is required"))]
    pub job_name: String,
    #[validate(length(min = 1, message = "Job type is required"))]
    pub job_type: String,
    #[validate(length(min = 1, message = "Job description is required"))]
    pub job_description: String,
    pub department: Option<String>,
    pub company_name: Option<String>,
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub number_of_candidates_needed: i32,
    #[validate(nested)]
    pub job_salary: JobSalary,
    pub status: Option<JobStatus>,
    pub minimum_profile_information: ProfileRequirements,
}

/// Partial update of a job opening. Nested objects, when present, are complete.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobOpeningPatch {
    #[validate(length(min = 1, message = "Job name is required"))]
    pub job_name: Option<String>,
    #[validate(length(min = 1, message = "Job type is required"))]
    pub job_type: Option<String>,
    #[validate(length(min = 1, message = "Job description is required"))]
    pub job_description: Option<String>,
    pub department: Option<String>,
    pub company_name: Option<String>,
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub number_of_candidates_needed: Option<i32>,
    #[validate(nested)]
    pub job_salary: Option<JobSalary>,
    pub status: Option<JobStatus>,
    pub minimum_profile_information: Option<ProfileRequirements>,
}

/// Query string of `GET /api/jobs`
#[derive(Deserialize, Debug, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    #[validate(length(max = 100, message = "Search term is too long"))]
    pub search: Option<String>,
    #[serde(default)]
    pub my_jobs: bool,
}

/// Store-level job filter. Without `recruiter_id` only active jobs match.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub recruiter_id: Option<i32>,
    pub status: Option<JobStatus>,
    pub search: Option<String>,
}
