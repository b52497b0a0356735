use serde::Serialize;
use crate::db::models::ProfileRow;

/// Response for signup. The token is only ever shown here.
#[derive(Serialize)]
pub struct SignupResponse {
    pub profile: ProfileRow,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileRow,
}
