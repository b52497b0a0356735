use std::sync::Arc;
use tracing::{info, warn};

use crate::api::auth::CurrentUser;
use crate::api::error::ServiceError;
use crate::api::job::models::JobStatus;
use crate::api::job::JobService;
use crate::api::profile::models::Role;
use crate::db::models::{ApplicationPage, ApplicationRow, JobRow, MyApplicationRow};
use crate::db::{JobBoardStore, StoreError};
use super::models::{ApplicationInput, ApplicationQuery};
use super::schema::ApplicationSchema;

/// Application service: form rendering, submission and review
pub struct ApplicationService {
    store: Arc<dyn JobBoardStore>,
    jobs: JobService,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn JobBoardStore>) -> Self {
        Self {
            jobs: JobService::new(store.clone()),
            store,
        }
    }

    /// The job together with the form schema derived from its requirement flags
    pub async fn application_form(
        &self,
        caller: Option<&CurrentUser>,
        job_id: i32,
    ) -> Result<(JobRow, ApplicationSchema), ServiceError> {
        let job = self.jobs.get_job(caller, job_id).await?;
        let schema = ApplicationSchema::for_requirements(&job.requirements());
        Ok((job, schema))
    }

    /// Submit an application
    ///
    /// # Business Logic
    /// - Only job seekers apply, and only to active jobs
    /// - The body is checked against the job's requirement schema
    /// - Fields the job does not ask for are dropped before storing
    /// - A second application to the same job is a conflict
    pub async fn submit(
        &self,
        caller: &CurrentUser,
        job_id: i32,
        input: ApplicationInput,
    ) -> Result<ApplicationRow, ServiceError> {
        caller.require_role(Role::JobSeeker)?;

        let job = self
            .store
            .get_job(job_id)
            .await?
            .filter(|job| job.status() == JobStatus::Active)
            .ok_or_else(|| ServiceError::NotFound(format!("Job with id {}", job_id)))?;

        let schema = ApplicationSchema::for_requirements(&job.requirements());
        let snapshot = schema.accept(input)?;

        match self.store.create_application(job.id, caller.id(), &snapshot).await {
            Ok(row) => {
                info!("Service: Profile {} applied to job {} (application {})", caller.id(), job.id, row.id);
                Ok(row)
            }
            Err(StoreError::UniqueViolation(_)) => {
                warn!("Service: Duplicate application by profile {} to job {}", caller.id(), job.id);
                Err(ServiceError::Conflict("You have already applied to this job".to_string()))
            }
            Err(StoreError::ForeignKeyViolation(_)) => {
                Err(ServiceError::NotFound(format!("Job with id {}", job_id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applications received by a job. Only the owning recruiter may see them.
    pub async fn list_for_job(
        &self,
        caller: &CurrentUser,
        job_id: i32,
        query: &ApplicationQuery,
    ) -> Result<ApplicationPage, ServiceError> {
        self.jobs.owned_job(caller, job_id).await?;

        let page = self.store.list_applications(job_id, query).await?;
        info!(
            "Service: Listed {} of {} applications for job {}",
            page.rows.len(),
            page.total,
            job_id
        );
        Ok(page)
    }

    /// The caller's own applications, newest first
    pub async fn list_mine(&self, caller: &CurrentUser) -> Result<Vec<MyApplicationRow>, ServiceError> {
        Ok(self.store.list_my_applications(caller.id()).await?)
    }
}
