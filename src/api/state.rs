use actix_web::web::{Data, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::application::{handlers::application_config, ApplicationService};
use crate::api::health::health_config;
use crate::api::job::{handlers::job_config, JobService};
use crate::api::profile::{handlers::profile_config, ProfileService};
use crate::api::upload::{upload_config, PhotoStorage};
use crate::api::validation;
use crate::db::JobBoardStore;

/// Shared application state, cloned into every actix worker
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn JobBoardStore>,
    upload_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn JobBoardStore>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            upload_dir: upload_dir.into(),
        }
    }

    /// Register services, extractor configs and every route
    pub fn configure(&self, config: &mut ServiceConfig) {
        config
            .app_data(Data::from(self.store.clone()))
            .app_data(Data::new(ProfileService::new(self.store.clone())))
            .app_data(Data::new(JobService::new(self.store.clone())))
            .app_data(Data::new(ApplicationService::new(self.store.clone())))
            .app_data(Data::new(PhotoStorage::new(self.upload_dir.clone())))
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .configure(health_config)
            .configure(profile_config)
            .configure(job_config)
            .configure(application_config)
            .configure(upload_config);
    }
}
