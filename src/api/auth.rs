use actix_web::{dev::Payload, http::header, web::Data, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

use crate::api::error::ServiceError;
use crate::api::profile::models::Role;
use crate::db::{models::ProfileRow, JobBoardStore};

const TOKEN_LENGTH: usize = 40;

/// Generate a fresh opaque API token
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// The authenticated caller, resolved from `Authorization: Bearer <token>`
///
/// Routes that also serve anonymous callers take [`OptionalUser`] instead.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub ProfileRow);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn into_profile(self) -> ProfileRow {
        self.0
    }

    /// Fails with 403 unless the caller has `role`
    pub fn require_role(&self, role: Role) -> Result<(), ServiceError> {
        if self.0.role() == Some(role) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!(
                "Only {} accounts can do this",
                role.as_str().replace('_', " ")
            )))
        }
    }
}

async fn authenticate(
    token: Option<String>,
    store: Option<Data<dyn JobBoardStore>>,
) -> Result<CurrentUser, ServiceError> {
    let token = token.ok_or(ServiceError::Unauthorized)?;
    let store = store.ok_or_else(|| ServiceError::Internal("store is not configured".to_string()))?;

    match store.find_profile_by_token(&token).await? {
        Some(profile) => {
            debug!("Authenticated profile id={}", profile.id);
            Ok(CurrentUser(profile))
        }
        None => Err(ServiceError::Unauthorized),
    }
}

impl FromRequest for CurrentUser {
    type Error = ServiceError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let store = req.app_data::<Data<dyn JobBoardStore>>().cloned();

        Box::pin(authenticate(token, store))
    }
}

/// Caller that may be anonymous
///
/// Only a request without an `Authorization` header is anonymous. A bad
/// token is still 401 and a failing store is still 500.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl OptionalUser {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalUser {
    type Error = ServiceError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if !req.headers().contains_key(header::AUTHORIZATION) {
            return Box::pin(async { Ok(OptionalUser(None)) });
        }

        let token = bearer_token(req);
        let store = req.app_data::<Data<dyn JobBoardStore>>().cloned();

        Box::pin(async move { authenticate(token, store).await.map(|user| OptionalUser(Some(user))) })
    }
}
