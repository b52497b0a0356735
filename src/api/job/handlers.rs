use actix_web::{
    HttpResponse, delete, get, patch, post,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::{Json, Query};

use crate::api::application::handlers::job_application_config;
use crate::api::auth::{CurrentUser, OptionalUser};
use crate::api::error::ServiceError;
use super::dto::{DeleteResponse, JobListResponse, JobResponse};
use super::models::{JobListQuery, JobOpening, JobOpeningPatch};
use super::service::JobService;

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    caller: OptionalUser,
    query: Query<JobListQuery>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(caller.user(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobListResponse { jobs }))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    caller: CurrentUser,
    job: Json<JobOpening>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(&caller, &job).await?;
    Ok(HttpResponse::Created().json(JobResponse { job }))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    caller: OptionalUser,
    path: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(caller.user(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[patch("/{id}")]
async fn update_job(
    service: Data<JobService>,
    caller: CurrentUser,
    path: Path<i32>,
    patch: Json<JobOpeningPatch>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.update_job(&caller, path.into_inner(), &patch).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    caller: CurrentUser,
    path: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(&caller, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/api/jobs")
            .service(list_jobs)
            .service(create_job)
            .service(get_job)
            .service(update_job)
            .service(delete_job)
            .configure(job_application_config),
    );
}
