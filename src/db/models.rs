use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::FromRow;

use crate::api::application::models::Gender;
use crate::api::job::models::{JobStatus, ProfileRequirements, RequirementLevel};
use crate::api::profile::models::Role;

/// Database representation of a profile
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileRow {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub domicile: Option<String>,
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub api_token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProfileRow {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// Database representation of a job with all fields
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobRow {
    pub id: i32,
    pub recruiter_id: i32,
    pub job_name: String,
    pub job_type: String,
    pub job_description: String,
    pub department: Option<String>,
    pub company_name: Option<String>,
    pub number_of_candidates_needed: i32,
    pub salary_min: i64,
    pub salary_max: i64,
    pub status: String,
    pub req_full_name: Option<String>,
    pub req_photo_profile: Option<String>,
    pub req_gender: Option<String>,
    pub req_domicile: Option<String>,
    pub req_email: Option<String>,
    pub req_phone_number: Option<String>,
    pub req_linkedin_link: Option<String>,
    pub req_date_of_birth: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JobRow {
    pub fn status(&self) -> JobStatus {
        JobStatus::from_stored(&self.status)
    }

    pub fn requirements(&self) -> ProfileRequirements {
        let level = |value: &Option<String>| RequirementLevel::from_stored(value.as_deref());
        ProfileRequirements {
            full_name: level(&self.req_full_name),
            photo_profile: level(&self.req_photo_profile),
            gender: level(&self.req_gender),
            domicile: level(&self.req_domicile),
            email: level(&self.req_email),
            phone_number: level(&self.req_phone_number),
            linked_in_link: level(&self.req_linkedin_link),
            date_of_birth: level(&self.req_date_of_birth),
        }
    }

    pub fn is_owned_by(&self, profile_id: i32) -> bool {
        self.recruiter_id == profile_id
    }
}

/// Public face of the recruiter who posted a job
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct RecruiterSummaryRow {
    #[serde(rename = "full_name")]
    pub recruiter_full_name: Option<String>,
    #[serde(rename = "avatar_url")]
    pub recruiter_avatar_url: Option<String>,
    #[serde(rename = "company_name")]
    pub recruiter_company_name: Option<String>,
}

impl From<&ProfileRow> for RecruiterSummaryRow {
    fn from(profile: &ProfileRow) -> Self {
        Self {
            recruiter_full_name: profile.full_name.clone(),
            recruiter_avatar_url: profile.avatar_url.clone(),
            recruiter_company_name: profile.company_name.clone(),
        }
    }
}

/// Job row with the number of applications received and its recruiter
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobListingRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub application_count: i64,
    #[sqlx(flatten)]
    pub recruiter: RecruiterSummaryRow,
}

/// Database representation of a job application
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationRow {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: i32,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub domicile: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub applied_at: NaiveDateTime,
}

impl ApplicationRow {
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

/// Account behind an application, as shown to the reviewing recruiter
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicantSummaryRow {
    #[serde(rename = "id")]
    pub applicant_profile_id: i32,
    #[serde(rename = "username")]
    pub applicant_username: Option<String>,
    #[serde(rename = "avatar_url")]
    pub applicant_avatar_url: Option<String>,
}

impl From<&ProfileRow> for ApplicantSummaryRow {
    fn from(profile: &ProfileRow) -> Self {
        Self {
            applicant_profile_id: profile.id,
            applicant_username: profile.username.clone(),
            applicant_avatar_url: profile.avatar_url.clone(),
        }
    }
}

/// Application row with its applicant, for the job owner's review list
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationListingRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    #[sqlx(flatten)]
    pub applicant: ApplicantSummaryRow,
}

/// Job fields shown next to an applicant's own application
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobSummaryRow {
    pub job_name: String,
    pub job_type: String,
    pub company_name: Option<String>,
    pub salary_min: i64,
    pub salary_max: i64,
    pub status: String,
}

impl From<&JobRow> for JobSummaryRow {
    fn from(job: &JobRow) -> Self {
        Self {
            job_name: job.job_name.clone(),
            job_type: job.job_type.clone(),
            company_name: job.company_name.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            status: job.status.clone(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyApplicationRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    #[sqlx(flatten)]
    pub job: JobSummaryRow,
}

/// One page of applications plus the unpaged total
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationPage {
    pub rows: Vec<ApplicationListingRow>,
    pub total: i64,
}
