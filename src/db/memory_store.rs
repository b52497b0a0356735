use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::application::models::{
    ApplicationQuery, ApplicationSnapshot, ApplicationSortField, SortOrder,
};
use crate::api::job::models::{
    JobFilter, JobOpening, JobOpeningPatch, JobStatus, RequirementLevel,
};
use crate::api::profile::models::{NewProfile, ProfilePatch};
use crate::db::models::{
    ApplicantSummaryRow, ApplicationListingRow, ApplicationPage, ApplicationRow, JobListingRow,
    JobRow, JobSummaryRow, MyApplicationRow, ProfileRow, RecruiterSummaryRow,
};
use crate::db::store::{JobBoardStore, StoreError, StoreResult};

#[derive(Default)]
struct MemoryState {
    next_profile_id: i32,
    next_job_id: i32,
    next_application_id: i32,
    profiles: BTreeMap<i32, ProfileRow>,
    jobs: BTreeMap<i32, JobRow>,
    applications: BTreeMap<i32, ApplicationRow>,
}

/// In-process store for development and tests
///
/// Every write takes the single write lock, so check-then-insert sequences
/// such as the duplicate-application check are atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn compare_optional(a: &Option<String>, b: &Option<String>) -> Ordering {
    // Nulls sort last regardless of direction, like NULLS LAST in SQL
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_applications(rows: &mut [ApplicationRow], field: ApplicationSortField, order: SortOrder) {
    rows.sort_by(|a, b| {
        let directed = |ord: Ordering| match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };
        let primary = match field {
            ApplicationSortField::AppliedAt => directed(a.applied_at.cmp(&b.applied_at)),
            ApplicationSortField::FullName => match (&a.full_name, &b.full_name) {
                (Some(x), Some(y)) => directed(x.cmp(y)),
                _ => compare_optional(&a.full_name, &b.full_name),
            },
            ApplicationSortField::Email => match (&a.email, &b.email) {
                (Some(x), Some(y)) => directed(x.cmp(y)),
                _ => compare_optional(&a.email, &b.email),
            },
            ApplicationSortField::Domicile => match (&a.domicile, &b.domicile) {
                (Some(x), Some(y)) => directed(x.cmp(y)),
                _ => compare_optional(&a.domicile, &b.domicile),
            },
        };
        primary.then_with(|| directed(a.id.cmp(&b.id)))
    });
}

fn matches_query(row: &ApplicationRow, query: &ApplicationQuery, cutoff: Option<NaiveDateTime>) -> bool {
    if let Some(phone) = query.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        if !row.phone_number.as_deref().is_some_and(|n| n.starts_with(phone)) {
            return false;
        }
    }
    if let Some(gender) = query.gender {
        if row.gender() != Some(gender) {
            return false;
        }
    }
    if let Some(domicile) = query.domicile.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        if row.domicile.as_deref() != Some(domicile) {
            return false;
        }
    }
    if let Some(cutoff) = cutoff {
        if row.applied_at < cutoff {
            return false;
        }
    }
    true
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_profile(&self, profile: &NewProfile, api_token: &str) -> StoreResult<ProfileRow> {
        let mut state = self.state.write().await;

        let email = profile.email.to_lowercase();
        if state.profiles.values().any(|p| p.email == email) {
            return Err(StoreError::UniqueViolation("email"));
        }

        state.next_profile_id += 1;
        let id = state.next_profile_id;
        let timestamp = now();
        let row = ProfileRow {
            id,
            email,
            role: profile.role.as_str().to_string(),
            full_name: profile.full_name.clone(),
            username: profile.username.clone(),
            avatar_url: None,
            company_name: profile.company_name.clone(),
            phone_number: None,
            gender: None,
            domicile: None,
            linkedin_url: None,
            date_of_birth: None,
            api_token: api_token.to_string(),
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.profiles.insert(id, row.clone());

        debug!("Profile created with id={}", id);
        Ok(row)
    }

    async fn find_profile_by_token(&self, api_token: &str) -> StoreResult<Option<ProfileRow>> {
        let state = self.state.read().await;
        Ok(state.profiles.values().find(|p| p.api_token == api_token).cloned())
    }

    async fn update_profile(&self, id: i32, patch: &ProfilePatch) -> StoreResult<Option<ProfileRow>> {
        let mut state = self.state.write().await;
        let Some(row) = state.profiles.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(v) = &patch.full_name {
            row.full_name = Some(v.clone());
        }
        if let Some(v) = &patch.username {
            row.username = Some(v.clone());
        }
        if let Some(v) = &patch.avatar_url {
            row.avatar_url = Some(v.clone());
        }
        if let Some(v) = &patch.company_name {
            row.company_name = Some(v.clone());
        }
        if let Some(v) = &patch.phone_number {
            row.phone_number = Some(v.clone());
        }
        if let Some(v) = patch.gender {
            row.gender = Some(v.as_str().to_string());
        }
        if let Some(v) = &patch.domicile {
            row.domicile = Some(v.clone());
        }
        if let Some(v) = &patch.linkedin_url {
            row.linkedin_url = Some(v.clone());
        }
        if let Some(v) = patch.date_of_birth {
            row.date_of_birth = Some(v);
        }
        row.updated_at = now();

        Ok(Some(row.clone()))
    }

    async fn list_jobs(&self, filter: &JobFilter) -> StoreResult<Vec<JobListingRow>> {
        let state = self.state.read().await;
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<JobListingRow> = state
            .jobs
            .values()
            .filter(|job| match filter.recruiter_id {
                Some(recruiter_id) => {
                    job.recruiter_id == recruiter_id
                        && filter.status.map_or(true, |s| job.status() == s)
                }
                None => job.status() == JobStatus::Active,
            })
            .filter(|job| {
                search.as_deref().map_or(true, |needle| {
                    contains_ignore_case(&job.job_name, needle)
                        || contains_ignore_case(&job.job_description, needle)
                })
            })
            .map(|job| JobListingRow {
                job: job.clone(),
                application_count: state
                    .applications
                    .values()
                    .filter(|a| a.job_id == job.id)
                    .count() as i64,
                recruiter: state
                    .profiles
                    .get(&job.recruiter_id)
                    .map(RecruiterSummaryRow::from)
                    .unwrap_or_default(),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.job
                .created_at
                .cmp(&a.job.created_at)
                .then_with(|| b.job.id.cmp(&a.job.id))
        });
        Ok(rows)
    }

    async fn get_job(&self, id: i32) -> StoreResult<Option<JobRow>> {
        let state = self.state.read().await;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn create_job(&self, recruiter_id: i32, job: &JobOpening) -> StoreResult<JobRow> {
        let mut state = self.state.write().await;
        if !state.profiles.contains_key(&recruiter_id) {
            return Err(StoreError::ForeignKeyViolation("recruiter profile"));
        }

        state.next_job_id += 1;
        let id = state.next_job_id;
        let reqs = &job.minimum_profile_information;
        let level = |l: RequirementLevel| Some(l.as_str().to_string());
        let timestamp = now();
        let row = JobRow {
            id,
            recruiter_id,
            job_name: job.job_name.clone(),
            job_type: job.job_type.clone(),
            job_description: job.job_description.clone(),
            department: job.department.clone(),
            company_name: job.company_name.clone(),
            number_of_candidates_needed: job.number_of_candidates_needed,
            salary_min: job.job_salary.minimum,
            salary_max: job.job_salary.maximum,
            status: job.status.unwrap_or(JobStatus::Draft).as_str().to_string(),
            req_full_name: level(reqs.full_name),
            req_photo_profile: level(reqs.photo_profile),
            req_gender: level(reqs.gender),
            req_domicile: level(reqs.domicile),
            req_email: level(reqs.email),
            req_phone_number: level(reqs.phone_number),
            req_linkedin_link: level(reqs.linked_in_link),
            req_date_of_birth: level(reqs.date_of_birth),
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.jobs.insert(id, row.clone());

        debug!("Job created with id={}", id);
        Ok(row)
    }

    async fn update_job(
        &self,
        id: i32,
        recruiter_id: i32,
        patch: &JobOpeningPatch,
    ) -> StoreResult<Option<JobRow>> {
        let mut state = self.state.write().await;
        let Some(row) = state
            .jobs
            .get_mut(&id)
            .filter(|job| job.recruiter_id == recruiter_id)
        else {
            return Ok(None);
        };

        if let Some(v) = &patch.job_name {
            row.job_name = v.clone();
        }
        if let Some(v) = &patch.job_type {
            row.job_type = v.clone();
        }
        if let Some(v) = &patch.job_description {
            row.job_description = v.clone();
        }
        if let Some(v) = &patch.department {
            row.department = Some(v.clone());
        }
        if let Some(v) = &patch.company_name {
            row.company_name = Some(v.clone());
        }
        if let Some(v) = patch.number_of_candidates_needed {
            row.number_of_candidates_needed = v;
        }
        if let Some(salary) = patch.job_salary {
            row.salary_min = salary.minimum;
            row.salary_max = salary.maximum;
        }
        if let Some(status) = patch.status {
            row.status = status.as_str().to_string();
        }
        if let Some(reqs) = patch.minimum_profile_information {
            row.req_full_name = Some(reqs.full_name.as_str().to_string());
            row.req_photo_profile = Some(reqs.photo_profile.as_str().to_string());
            row.req_gender = Some(reqs.gender.as_str().to_string());
            row.req_domicile = Some(reqs.domicile.as_str().to_string());
            row.req_email = Some(reqs.email.as_str().to_string());
            row.req_phone_number = Some(reqs.phone_number.as_str().to_string());
            row.req_linkedin_link = Some(reqs.linked_in_link.as_str().to_string());
            row.req_date_of_birth = Some(reqs.date_of_birth.as_str().to_string());
        }
        row.updated_at = now();

        Ok(Some(row.clone()))
    }

    async fn delete_job(&self, id: i32, recruiter_id: i32) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .jobs
            .get(&id)
            .is_some_and(|job| job.recruiter_id == recruiter_id);
        if !owned {
            return Ok(false);
        }

        state.jobs.remove(&id);
        state.applications.retain(|_, a| a.job_id != id);
        debug!("Job {} deleted", id);
        Ok(true)
    }

    async fn list_applications(
        &self,
        job_id: i32,
        query: &ApplicationQuery,
    ) -> StoreResult<ApplicationPage> {
        let state = self.state.read().await;
        let cutoff = query.applied_within.map(|w| w.cutoff(now()));

        let mut rows: Vec<ApplicationRow> = state
            .applications
            .values()
            .filter(|a| a.job_id == job_id && matches_query(a, query, cutoff))
            .cloned()
            .collect();
        let total = rows.len() as i64;

        sort_applications(&mut rows, query.sort_by, query.sort_order);
        let rows = rows
            .into_iter()
            .skip(query.offset().max(0) as usize)
            .take(query.page_size.max(0) as usize)
            .map(|application| {
                let applicant = match state.profiles.get(&application.applicant_id) {
                    Some(profile) => ApplicantSummaryRow::from(profile),
                    None => ApplicantSummaryRow {
                        applicant_profile_id: application.applicant_id,
                        applicant_username: None,
                        applicant_avatar_url: None,
                    },
                };
                ApplicationListingRow { application, applicant }
            })
            .collect();

        Ok(ApplicationPage { rows, total })
    }

    async fn create_application(
        &self,
        job_id: i32,
        applicant_id: i32,
        snapshot: &ApplicationSnapshot,
    ) -> StoreResult<ApplicationRow> {
        let mut state = self.state.write().await;

        if !state.jobs.contains_key(&job_id) {
            return Err(StoreError::ForeignKeyViolation("job"));
        }
        if !state.profiles.contains_key(&applicant_id) {
            return Err(StoreError::ForeignKeyViolation("applicant profile"));
        }
        if state
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.applicant_id == applicant_id)
        {
            debug!("Application already exists: job_id={}, applicant_id={}", job_id, applicant_id);
            return Err(StoreError::UniqueViolation("job application"));
        }

        state.next_application_id += 1;
        let id = state.next_application_id;
        let row = ApplicationRow {
            id,
            job_id,
            applicant_id,
            full_name: snapshot.full_name.clone(),
            photo_url: snapshot.photo_url.clone(),
            gender: snapshot.gender.map(|g| g.as_str().to_string()),
            domicile: snapshot.domicile.clone(),
            email: snapshot.email.clone(),
            phone_number: snapshot.phone_number.clone(),
            linkedin_url: snapshot.linkedin_url.clone(),
            date_of_birth: snapshot.date_of_birth,
            applied_at: now(),
        };
        state.applications.insert(id, row.clone());

        debug!("Application created with id={}", id);
        Ok(row)
    }

    async fn list_my_applications(&self, applicant_id: i32) -> StoreResult<Vec<MyApplicationRow>> {
        let state = self.state.read().await;

        let mut rows: Vec<MyApplicationRow> = state
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id)
            .filter_map(|a| {
                state.jobs.get(&a.job_id).map(|job| MyApplicationRow {
                    application: a.clone(),
                    job: JobSummaryRow::from(job),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.application
                .applied_at
                .cmp(&a.application.applied_at)
                .then_with(|| b.application.id.cmp(&a.application.id))
        });
        Ok(rows)
    }
}
