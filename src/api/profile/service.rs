use std::sync::Arc;
use tracing::info;

use crate::api::auth::{generate_token, CurrentUser};
use crate::api::error::ServiceError;
use crate::db::models::ProfileRow;
use crate::db::{JobBoardStore, StoreError};
use super::models::{NewProfile, ProfilePatch};

/// Profile service: signup and self-service updates
pub struct ProfileService {
    store: Arc<dyn JobBoardStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn JobBoardStore>) -> Self {
        Self { store }
    }

    /// Create a profile and issue its API token
    pub async fn signup(&self, profile: &NewProfile) -> Result<(ProfileRow, String), ServiceError> {
        let token = generate_token();

        let row = match self.store.create_profile(profile, &token).await {
            Ok(row) => row,
            Err(StoreError::UniqueViolation(_)) => {
                return Err(ServiceError::Conflict(
                    "An account with this email already exists".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Service: Profile {} signed up as {}", row.id, row.role);
        Ok((row, token))
    }

    pub async fn update_profile(
        &self,
        caller: &CurrentUser,
        patch: &ProfilePatch,
    ) -> Result<ProfileRow, ServiceError> {
        let row = self
            .store
            .update_profile(caller.id(), patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Profile".to_string()))?;

        info!("Service: Profile {} updated", row.id);
        Ok(row)
    }
}
