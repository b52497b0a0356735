use actix_web::{
    HttpResponse, get, post,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::{Json, Query};

use crate::api::auth::{CurrentUser, OptionalUser};
use crate::api::error::ServiceError;
use super::dto::{
    ApplicationFormResponse, ApplicationListResponse, ApplicationResponse, MyApplicationsResponse,
};
use super::models::{ApplicationInput, ApplicationQuery};
use super::service::ApplicationService;

#[get("/{id}/application-form")]
async fn application_form(
    service: Data<ApplicationService>,
    caller: OptionalUser,
    path: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let (job, schema) = service.application_form(caller.user(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApplicationFormResponse::new(job.id, job.job_name, &schema)))
}

#[post("/{id}/applications")]
async fn submit_application(
    service: Data<ApplicationService>,
    caller: CurrentUser,
    path: Path<i32>,
    input: Json<ApplicationInput>,
) -> Result<HttpResponse, ServiceError> {
    let application = service.submit(&caller, path.into_inner(), input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApplicationResponse { application }))
}

#[get("/{id}/applications")]
async fn list_applications(
    service: Data<ApplicationService>,
    caller: CurrentUser,
    path: Path<i32>,
    query: Query<ApplicationQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = service.list_for_job(&caller, path.into_inner(), &query).await?;
    let total_pages = (page.total + query.page_size - 1) / query.page_size;

    Ok(HttpResponse::Ok().json(ApplicationListResponse {
        applications: page.rows,
        total: page.total,
        page: query.page,
        page_size: query.page_size,
        total_pages,
    }))
}

#[get("/my")]
async fn my_applications(
    service: Data<ApplicationService>,
    caller: CurrentUser,
) -> Result<HttpResponse, ServiceError> {
    let applications = service.list_mine(&caller).await?;
    Ok(HttpResponse::Ok().json(MyApplicationsResponse { applications }))
}

/// Routes nested under `/api/jobs`
pub fn job_application_config(config: &mut ServiceConfig) {
    config
        .service(application_form)
        .service(submit_application)
        .service(list_applications);
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(scope("/api/applications").service(my_applications));
}
