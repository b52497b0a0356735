use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::application::models::{ApplicationQuery, ApplicationSnapshot, SortOrder};
use crate::api::job::models::{JobFilter, JobOpening, JobOpeningPatch, JobStatus};
use crate::api::profile::models::{NewProfile, ProfilePatch};
use crate::db::models::{
    ApplicationListingRow, ApplicationPage, ApplicationRow, JobListingRow, JobRow, MyApplicationRow,
    ProfileRow,
};
use crate::db::store::{JobBoardStore, StoreError, StoreResult};

const PROFILE_COLUMNS: &str = "id, email, role, full_name, username, avatar_url, company_name, \
    phone_number, gender, domicile, linkedin_url, date_of_birth, api_token, created_at, updated_at";

const JOB_COLUMNS: &str = "id, recruiter_id, job_name, job_type, job_description, department, \
    company_name, number_of_candidates_needed, salary_min, salary_max, status, req_full_name, \
    req_photo_profile, req_gender, req_domicile, req_email, req_phone_number, req_linkedin_link, \
    req_date_of_birth, created_at, updated_at";

const APPLICATION_COLUMNS: &str = "id, job_id, applicant_id, full_name, photo_url, gender, \
    domicile, email, phone_number, linkedin_url, date_of_birth, applied_at";

/// PostgreSQL-backed store
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map constraint violations onto store errors
fn classify(err: sqlx::Error, unique: &'static str, reference: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation(unique);
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation(reference);
        }
    }
    StoreError::Database(err)
}

/// `"id, name"` with alias `t` becomes `"t.id, t.name"`
fn qualified(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|column| format!("{}.{}", alias, column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape LIKE wildcards in user input
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_application_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    job_id: i32,
    query: &ApplicationQuery,
) {
    qb.push(" WHERE a.job_id = ").push_bind(job_id);

    if let Some(phone) = query.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        qb.push(" AND a.phone_number LIKE ")
            .push_bind(format!("{}%", escape_like(phone)));
    }
    if let Some(gender) = query.gender {
        qb.push(" AND a.gender = ").push_bind(gender.as_str());
    }
    if let Some(domicile) = query.domicile.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        qb.push(" AND a.domicile = ").push_bind(domicile.to_string());
    }
    if let Some(window) = query.applied_within {
        qb.push(" AND a.applied_at >= ")
            .push_bind(window.cutoff(Utc::now().naive_utc()));
    }
}

#[async_trait]
impl JobBoardStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn create_profile(&self, profile: &NewProfile, api_token: &str) -> StoreResult<ProfileRow> {
        debug!("Creating profile: email={}, role={:?}", profile.email, profile.role);

        let sql = format!(
            "INSERT INTO profiles (email, role, full_name, username, company_name, api_token) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.email.to_lowercase())
            .bind(profile.role.as_str())
            .bind(&profile.full_name)
            .bind(&profile.username)
            .bind(&profile.company_name)
            .bind(api_token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "email", "profile"))?;

        debug!("Profile created with id={}", row.id);
        Ok(row)
    }

    async fn find_profile_by_token(&self, api_token: &str) -> StoreResult<Option<ProfileRow>> {
        let sql = format!("SELECT {} FROM profiles WHERE api_token = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(api_token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_profile(&self, id: i32, patch: &ProfilePatch) -> StoreResult<Option<ProfileRow>> {
        debug!("Updating profile id={}", id);

        let mut qb = QueryBuilder::<Postgres>::new(
            "UPDATE profiles SET updated_at = timezone('utc', now())",
        );
        if let Some(v) = &patch.full_name {
            qb.push(", full_name = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.username {
            qb.push(", username = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.avatar_url {
            qb.push(", avatar_url = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.company_name {
            qb.push(", company_name = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.phone_number {
            qb.push(", phone_number = ").push_bind(v.clone());
        }
        if let Some(v) = patch.gender {
            qb.push(", gender = ").push_bind(v.as_str());
        }
        if let Some(v) = &patch.domicile {
            qb.push(", domicile = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.linkedin_url {
            qb.push(", linkedin_url = ").push_bind(v.clone());
        }
        if let Some(v) = patch.date_of_birth {
            qb.push(", date_of_birth = ").push_bind(v);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(PROFILE_COLUMNS);

        let row = qb
            .build_query_as::<ProfileRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_jobs(&self, filter: &JobFilter) -> StoreResult<Vec<JobListingRow>> {
        debug!("Listing jobs: {:?}", filter);

        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(qualified("j", JOB_COLUMNS));
        qb.push(
            ", (SELECT COUNT(*) FROM job_applications a WHERE a.job_id = j.id) AS application_count, \
             p.full_name AS recruiter_full_name, p.avatar_url AS recruiter_avatar_url, \
             p.company_name AS recruiter_company_name \
             FROM jobs j LEFT JOIN profiles p ON p.id = j.recruiter_id WHERE ",
        );

        match filter.recruiter_id {
            Some(recruiter_id) => {
                qb.push("j.recruiter_id = ").push_bind(recruiter_id);
                if let Some(status) = filter.status {
                    qb.push(" AND j.status = ").push_bind(status.as_str());
                }
            }
            None => {
                qb.push("j.status = ").push_bind(JobStatus::Active.as_str());
            }
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (j.job_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR j.job_description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY j.created_at DESC, j.id DESC");

        let rows = qb
            .build_query_as::<JobListingRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} jobs", rows.len());
        Ok(rows)
    }

    async fn get_job(&self, id: i32) -> StoreResult<Option<JobRow>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_job(&self, recruiter_id: i32, job: &JobOpening) -> StoreResult<JobRow> {
        debug!("Creating job: name={}, recruiter_id={}", job.job_name, recruiter_id);

        let reqs = &job.minimum_profile_information;
        let status = job.status.unwrap_or(JobStatus::Draft);
        let sql = format!(
            r#"
            INSERT INTO jobs (
                recruiter_id, job_name, job_type, job_description, department, company_name,
                number_of_candidates_needed, salary_min, salary_max, status,
                req_full_name, req_photo_profile, req_gender, req_domicile,
                req_email, req_phone_number, req_linkedin_link, req_date_of_birth
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(recruiter_id)
            .bind(&job.job_name)
            .bind(&job.job_type)
            .bind(&job.job_description)
            .bind(&job.department)
            .bind(&job.company_name)
            .bind(job.number_of_candidates_needed)
            .bind(job.job_salary.minimum)
            .bind(job.job_salary.maximum)
            .bind(status.as_str())
            .bind(reqs.full_name.as_str())
            .bind(reqs.photo_profile.as_str())
            .bind(reqs.gender.as_str())
            .bind(reqs.domicile.as_str())
            .bind(reqs.email.as_str())
            .bind(reqs.phone_number.as_str())
            .bind(reqs.linked_in_link.as_str())
            .bind(reqs.date_of_birth.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "job", "recruiter profile"))?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    async fn update_job(
        &self,
        id: i32,
        recruiter_id: i32,
        patch: &JobOpeningPatch,
    ) -> StoreResult<Option<JobRow>> {
        debug!("Updating job id={} for recruiter_id={}", id, recruiter_id);

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = timezone('utc', now())");
        if let Some(v) = &patch.job_name {
            qb.push(", job_name = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.job_type {
            qb.push(", job_type = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.job_description {
            qb.push(", job_description = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.department {
            qb.push(", department = ").push_bind(v.clone());
        }
        if let Some(v) = &patch.company_name {
            qb.push(", company_name = ").push_bind(v.clone());
        }
        if let Some(v) = patch.number_of_candidates_needed {
            qb.push(", number_of_candidates_needed = ").push_bind(v);
        }
        if let Some(salary) = patch.job_salary {
            qb.push(", salary_min = ").push_bind(salary.minimum);
            qb.push(", salary_max = ").push_bind(salary.maximum);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status.as_str());
        }
        if let Some(reqs) = patch.minimum_profile_information {
            qb.push(", req_full_name = ").push_bind(reqs.full_name.as_str());
            qb.push(", req_photo_profile = ").push_bind(reqs.photo_profile.as_str());
            qb.push(", req_gender = ").push_bind(reqs.gender.as_str());
            qb.push(", req_domicile = ").push_bind(reqs.domicile.as_str());
            qb.push(", req_email = ").push_bind(reqs.email.as_str());
            qb.push(", req_phone_number = ").push_bind(reqs.phone_number.as_str());
            qb.push(", req_linkedin_link = ").push_bind(reqs.linked_in_link.as_str());
            qb.push(", req_date_of_birth = ").push_bind(reqs.date_of_birth.as_str());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" AND recruiter_id = ").push_bind(recruiter_id);
        qb.push(" RETURNING ").push(JOB_COLUMNS);

        let row = qb
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_job(&self, id: i32, recruiter_id: i32) -> StoreResult<bool> {
        debug!("Deleting job id={} for recruiter_id={}", id, recruiter_id);

        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND recruiter_id = $2")
            .bind(id)
            .bind(recruiter_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_applications(
        &self,
        job_id: i32,
        query: &ApplicationQuery,
    ) -> StoreResult<ApplicationPage> {
        debug!("Listing applications for job_id={}: {:?}", job_id, query);

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM job_applications a");
        push_application_filters(&mut count_qb, job_id, query);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let direction = match query.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(qualified("a", APPLICATION_COLUMNS));
        qb.push(
            ", p.id AS applicant_profile_id, p.username AS applicant_username, \
             p.avatar_url AS applicant_avatar_url \
             FROM job_applications a JOIN profiles p ON p.id = a.applicant_id",
        );
        push_application_filters(&mut qb, job_id, query);
        qb.push(format!(
            " ORDER BY a.{} {} NULLS LAST, a.id {}",
            query.sort_by.column(),
            direction,
            direction
        ));
        qb.push(" LIMIT ").push_bind(query.page_size);
        qb.push(" OFFSET ").push_bind(query.offset());

        let rows = qb
            .build_query_as::<ApplicationListingRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(ApplicationPage { rows, total })
    }

    async fn create_application(
        &self,
        job_id: i32,
        applicant_id: i32,
        snapshot: &ApplicationSnapshot,
    ) -> StoreResult<ApplicationRow> {
        debug!("Creating application: job_id={}, applicant_id={}", job_id, applicant_id);

        let sql = format!(
            r#"
            INSERT INTO job_applications (
                job_id, applicant_id, full_name, photo_url, gender, domicile,
                email, phone_number, linkedin_url, date_of_birth
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (job_id, applicant_id) DO NOTHING
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id)
            .bind(applicant_id)
            .bind(&snapshot.full_name)
            .bind(&snapshot.photo_url)
            .bind(snapshot.gender.map(|g| g.as_str()))
            .bind(&snapshot.domicile)
            .bind(&snapshot.email)
            .bind(&snapshot.phone_number)
            .bind(&snapshot.linkedin_url)
            .bind(snapshot.date_of_birth)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(e, "job application", "job"))?;

        match row {
            Some(row) => {
                debug!("Application created with id={}", row.id);
                Ok(row)
            }
            None => {
                debug!("Application already exists: job_id={}, applicant_id={}", job_id, applicant_id);
                Err(StoreError::UniqueViolation("job application"))
            }
        }
    }

    async fn list_my_applications(&self, applicant_id: i32) -> StoreResult<Vec<MyApplicationRow>> {
        let rows = sqlx::query_as::<_, MyApplicationRow>(
            r#"
            SELECT a.id, a.job_id, a.applicant_id, a.full_name, a.photo_url, a.gender,
                   a.domicile, a.email, a.phone_number, a.linkedin_url, a.date_of_birth,
                   a.applied_at, j.job_name, j.job_type, j.company_name, j.salary_min,
                   j.salary_max, j.status
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.applicant_id = $1
            ORDER BY a.applied_at DESC, a.id DESC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
