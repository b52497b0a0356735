use std::sync::Arc;
use tracing::{info, warn};

use crate::api::auth::CurrentUser;
use crate::api::error::ServiceError;
use crate::api::profile::models::Role;
use crate::db::models::{JobListingRow, JobRow};
use crate::db::JobBoardStore;
use super::models::{JobFilter, JobListQuery, JobOpening, JobOpeningPatch, JobStatus};

/// Job service containing business logic
pub struct JobService {
    store: Arc<dyn JobBoardStore>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(store: Arc<dyn JobBoardStore>) -> Self {
        Self { store }
    }

    /// List jobs
    ///
    /// # Business Logic
    /// - Anonymous and `myJobs=false` callers see active jobs only; `status` is ignored
    /// - `myJobs=true` requires a caller and returns only their jobs, optionally by status
    /// - `search` matches name or description, case-insensitively
    pub async fn list_jobs(
        &self,
        caller: Option<&CurrentUser>,
        query: JobListQuery,
    ) -> Result<Vec<JobListingRow>, ServiceError> {
        let filter = if query.my_jobs {
            let caller = caller.ok_or(ServiceError::Unauthorized)?;
            JobFilter {
                recruiter_id: Some(caller.id()),
                status: query.status,
                search: query.search,
            }
        } else {
            JobFilter {
                recruiter_id: None,
                status: None,
                search: query.search,
            }
        };

        let jobs = self.store.list_jobs(&filter).await?;
        info!("Service: Listed {} jobs (my_jobs={})", jobs.len(), query.my_jobs);
        Ok(jobs)
    }

    /// Fetch one job. Jobs that are not active are only visible to their owner.
    pub async fn get_job(&self, caller: Option<&CurrentUser>, id: i32) -> Result<JobRow, ServiceError> {
        let job = self
            .store
            .get_job(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job with id {}", id)))?;

        let is_owner = caller.is_some_and(|c| job.is_owned_by(c.id()));
        if job.status() != JobStatus::Active && !is_owner {
            warn!("Service: Job {} is {} and hidden from caller", id, job.status);
            return Err(ServiceError::NotFound(format!("Job with id {}", id)));
        }

        Ok(job)
    }

    /// Create a job owned by the calling recruiter
    pub async fn create_job(&self, caller: &CurrentUser, job: &JobOpening) -> Result<JobRow, ServiceError> {
        caller.require_role(Role::Recruiter)?;
        info!("Service: Creating job with name={} for recruiter={}", job.job_name, caller.id());

        let job_row = self.store.create_job(caller.id(), job).await?;

        info!("Service: Job created successfully with id={}", job_row.id);
        Ok(job_row)
    }

    /// Apply a partial update. Only the owning recruiter may do this.
    pub async fn update_job(
        &self,
        caller: &CurrentUser,
        id: i32,
        patch: &JobOpeningPatch,
    ) -> Result<JobRow, ServiceError> {
        self.owned_job(caller, id).await?;

        let job_row = self
            .store
            .update_job(id, caller.id(), patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job with id {}", id)))?;

        info!("Service: Job {} updated", id);
        Ok(job_row)
    }

    /// Delete a job and its applications. Only the owning recruiter may do this.
    pub async fn delete_job(&self, caller: &CurrentUser, id: i32) -> Result<(), ServiceError> {
        self.owned_job(caller, id).await?;

        if !self.store.delete_job(id, caller.id()).await? {
            return Err(ServiceError::NotFound(format!("Job with id {}", id)));
        }

        info!("Service: Job {} deleted", id);
        Ok(())
    }

    /// Load a job and check the caller owns it: 404 if missing, 403 if not theirs
    pub async fn owned_job(&self, caller: &CurrentUser, id: i32) -> Result<JobRow, ServiceError> {
        let job = self
            .store
            .get_job(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job with id {}", id)))?;

        if !job.is_owned_by(caller.id()) {
            return Err(ServiceError::Forbidden(
                "Only the recruiter who posted this job can manage it".to_string(),
            ));
        }

        Ok(job)
    }
}
