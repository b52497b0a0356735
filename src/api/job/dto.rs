use serde::Serialize;
use crate::db::models::{JobListingRow, JobRow};

/// Response for a single job
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

/// Response for a job listing
#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobListingRow>,
}

/// Response for a deletion
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
