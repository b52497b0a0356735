use actix_web::{
    HttpResponse, get, patch, post,
    web::{Data, ServiceConfig, scope},
};
use actix_web_validator::Json;

use crate::api::auth::CurrentUser;
use crate::api::error::ServiceError;
use super::dto::{ProfileResponse, SignupResponse};
use super::models::{NewProfile, ProfilePatch};
use super::service::ProfileService;

#[post("/signup")]
async fn signup(
    service: Data<ProfileService>,
    profile: Json<NewProfile>,
) -> Result<HttpResponse, ServiceError> {
    let (profile, token) = service.signup(&profile).await?;
    Ok(HttpResponse::Created().json(SignupResponse { profile, token }))
}

#[get("")]
async fn get_profile(caller: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ProfileResponse {
        profile: caller.into_profile(),
    })
}

#[patch("")]
async fn update_profile(
    service: Data<ProfileService>,
    caller: CurrentUser,
    patch: Json<ProfilePatch>,
) -> Result<HttpResponse, ServiceError> {
    let profile = service.update_profile(&caller, &patch).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse { profile }))
}

pub fn profile_config(config: &mut ServiceConfig) {
    config
        .service(scope("/api/auth").service(signup))
        .service(scope("/api/profile").service(get_profile).service(update_profile));
}
