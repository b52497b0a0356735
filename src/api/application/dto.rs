use serde::Serialize;

use crate::api::job::models::RequirementLevel;
use crate::db::models::{ApplicationListingRow, ApplicationRow, MyApplicationRow};
use super::schema::{ApplicationSchema, FieldFormat};

/// One input of the application form
#[derive(Serialize)]
pub struct ApplicationFormField {
    pub key: &'static str,
    /// Matching key in the job's `minimumProfileInformation`
    pub requirement_key: &'static str,
    pub label: &'static str,
    pub requirement: RequirementLevel,
    pub required: bool,
    pub format: FieldFormat,
}

/// The application form of a job. Fields that are `Off` are not listed.
#[derive(Serialize)]
pub struct ApplicationFormResponse {
    pub job_id: i32,
    pub job_name: String,
    pub fields: Vec<ApplicationFormField>,
    /// Input keys that must be filled in
    pub required: Vec<&'static str>,
}

impl ApplicationFormResponse {
    pub fn new(job_id: i32, job_name: String, schema: &ApplicationSchema) -> Self {
        let fields = schema
            .rules()
            .iter()
            .map(|rule| {
                let required = schema.is_required(rule.field);
                ApplicationFormField {
                    key: rule.field.input_key(),
                    requirement_key: rule.field.requirement_key(),
                    label: rule.field.label(),
                    requirement: if required {
                        RequirementLevel::Mandatory
                    } else {
                        RequirementLevel::Optional
                    },
                    required,
                    format: rule.format,
                }
            })
            .collect();
        let required = schema.required_fields().map(|field| field.input_key()).collect();

        Self { job_id, job_name, fields, required }
    }
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub application: ApplicationRow,
}

/// One page of a job's applications
#[derive(Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationListingRow>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct MyApplicationsResponse {
    pub applications: Vec<MyApplicationRow>,
}
