use async_trait::async_trait;
use std::fmt;

use crate::api::application::models::{ApplicationQuery, ApplicationSnapshot};
use crate::api::job::models::{JobFilter, JobOpening, JobOpeningPatch};
use crate::api::profile::models::{NewProfile, ProfilePatch};
use crate::db::models::{
    ApplicationPage, ApplicationRow, JobListingRow, JobRow, MyApplicationRow, ProfileRow,
};

/// Errors surfaced by a store backend
#[derive(Debug)]
pub enum StoreError {
    /// Underlying database failure
    Database(sqlx::Error),

    /// A uniqueness constraint rejected the write
    UniqueViolation(&'static str),

    /// The write referenced a row that no longer exists
    ForeignKeyViolation(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::UniqueViolation(what) => write!(f, "Duplicate {}", what),
            StoreError::ForeignKeyViolation(what) => write!(f, "Missing {}", what),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary of the job board
///
/// Ownership arguments (`recruiter_id`) are applied as row filters, so a store
/// never modifies a job on behalf of someone who does not own it.
#[async_trait]
pub trait JobBoardStore: Send + Sync {
    /// Short backend name for logs and health checks
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    /// Release pooled resources during shutdown
    async fn close(&self) {}

    /// Fails with `UniqueViolation` when the email is taken
    async fn create_profile(&self, profile: &NewProfile, api_token: &str) -> StoreResult<ProfileRow>;

    async fn find_profile_by_token(&self, api_token: &str) -> StoreResult<Option<ProfileRow>>;

    async fn update_profile(&self, id: i32, patch: &ProfilePatch) -> StoreResult<Option<ProfileRow>>;

    /// Newest first
    async fn list_jobs(&self, filter: &JobFilter) -> StoreResult<Vec<JobListingRow>>;

    async fn get_job(&self, id: i32) -> StoreResult<Option<JobRow>>;

    async fn create_job(&self, recruiter_id: i32, job: &JobOpening) -> StoreResult<JobRow>;

    /// Returns None when no job with this id is owned by `recruiter_id`
    async fn update_job(
        &self,
        id: i32,
        recruiter_id: i32,
        patch: &JobOpeningPatch,
    ) -> StoreResult<Option<JobRow>>;

    /// Returns whether a row was deleted. Applications go with the job.
    async fn delete_job(&self, id: i32, recruiter_id: i32) -> StoreResult<bool>;

    async fn list_applications(
        &self,
        job_id: i32,
        query: &ApplicationQuery,
    ) -> StoreResult<ApplicationPage>;

    /// Inserts atomically with respect to the (job, applicant) pair: a second
    /// application fails with `UniqueViolation` no matter how calls interleave.
    async fn create_application(
        &self,
        job_id: i32,
        applicant_id: i32,
        snapshot: &ApplicationSnapshot,
    ) -> StoreResult<ApplicationRow>;

    /// Newest first
    async fn list_my_applications(&self, applicant_id: i32) -> StoreResult<Vec<MyApplicationRow>>;
}
