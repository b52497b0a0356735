//! End-to-end HTTP tests against an app wired to the in-process store.

use actix_web::{http::header, http::StatusCode, test, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::application::models::{ApplicationQuery, ApplicationSnapshot};
use crate::api::job::models::{JobFilter, JobOpening, JobOpeningPatch};
use crate::api::profile::models::{NewProfile, ProfilePatch};
use crate::api::state::AppState;
use crate::db::models::{ApplicationPage, ApplicationRow, JobListingRow, JobRow, MyApplicationRow, ProfileRow};
use crate::db::store::{StoreError, StoreResult};
use crate::db::{JobBoardStore, MemoryStore};

fn state() -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        std::env::temp_dir().join("job-board-test-uploads"),
    )
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

fn job_body(name: &str, status: &str, linkedin: &str) -> Value {
    json!({
        "jobName": name,
        "jobType": "Full-time",
        "jobDescription": "Build and run the hiring platform",
        "numberOfCandidatesNeeded": 2,
        "jobSalary": {"minimum": 7000000, "maximum": 8000000},
        "status": status,
        "minimumProfileInformation": {
            "fullName": "Mandatory",
            "photoProfile": "Off",
            "gender": "Optional",
            "domicile": "Optional",
            "email": "Mandatory",
            "phoneNumber": "Optional",
            "linkedInLink": linkedin,
            "dateOfBirth": "Off"
        }
    })
}

fn names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["job_name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

/// Store whose every call fails as if the database were down
struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl JobBoardStore for UnavailableStore {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(unavailable())
    }

    async fn create_profile(&self, _: &NewProfile, _: &str) -> StoreResult<ProfileRow> {
        Err(unavailable())
    }

    async fn find_profile_by_token(&self, _: &str) -> StoreResult<Option<ProfileRow>> {
        Err(unavailable())
    }

    async fn update_profile(&self, _: i32, _: &ProfilePatch) -> StoreResult<Option<ProfileRow>> {
        Err(unavailable())
    }

    async fn list_jobs(&self, _: &JobFilter) -> StoreResult<Vec<JobListingRow>> {
        Err(unavailable())
    }

    async fn get_job(&self, _: i32) -> StoreResult<Option<JobRow>> {
        Err(unavailable())
    }

    async fn create_job(&self, _: i32, _: &JobOpening) -> StoreResult<JobRow> {
        Err(unavailable())
    }

    async fn update_job(&self, _: i32, _: i32, _: &JobOpeningPatch) -> StoreResult<Option<JobRow>> {
        Err(unavailable())
    }

    async fn delete_job(&self, _: i32, _: i32) -> StoreResult<bool> {
        Err(unavailable())
    }

    async fn list_applications(&self, _: i32, _: &ApplicationQuery) -> StoreResult<ApplicationPage> {
        Err(unavailable())
    }

    async fn create_application(
        &self,
        _: i32,
        _: i32,
        _: &ApplicationSnapshot,
    ) -> StoreResult<ApplicationRow> {
        Err(unavailable())
    }

    async fn list_my_applications(&self, _: i32) -> StoreResult<Vec<MyApplicationRow>> {
        Err(unavailable())
    }
}

macro_rules! init_app {
    () => {
        test::init_service(App::new().configure(|config| state().configure(config))).await
    };
}

macro_rules! signup {
    ($app:expr, $email:expr, $role:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({"email": $email, "role": $role}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! create_job {
    ($app:expr, $token:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/jobs")
            .insert_header(bearer(&$token))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["job"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn signup_issues_token_and_profile_requires_it() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "rina@example.com", "role": "job_seeker", "fullName": "Rina"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 40);
    assert!(body["profile"].get("api_token").is_none());

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["profile"]["email"], "rina@example.com");
    assert_eq!(body["profile"]["role"], "job_seeker");

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer("not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "RINA@example.com", "role": "recruiter"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn signup_rejects_malformed_email() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "nama.domain.com", "role": "job_seeker"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["fields"]["email"]["errors"][0].is_string());
}

#[actix_web::test]
async fn profile_patch_updates_own_profile() {
    let app = init_app!();
    let token = signup!(app, "seeker@example.com", "job_seeker");

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .set_json(json!({"domicile": "Jakarta", "gender": "female"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["profile"]["domicile"], "Jakarta");
    assert_eq!(body["profile"]["gender"], "female");
}

#[actix_web::test]
async fn public_listing_shows_active_jobs_and_my_jobs_shows_own() {
    let app = init_app!();
    let first = signup!(app, "first@corp.com", "recruiter");
    let second = signup!(app, "second@corp.com", "recruiter");

    create_job!(app, first, job_body("Backend Engineer", "active", "Optional"));
    create_job!(app, first, job_body("Data Analyst", "draft", "Optional"));
    create_job!(app, second, job_body("Product Designer", "active", "Optional"));

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), ["Backend Engineer", "Product Designer"]);

    let req = test::TestRequest::get()
        .uri("/api/jobs?myJobs=true")
        .insert_header(bearer(&first))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), ["Backend Engineer", "Data Analyst"]);

    let req = test::TestRequest::get()
        .uri("/api/jobs?myJobs=true&status=draft")
        .insert_header(bearer(&first))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), ["Data Analyst"]);

    let req = test::TestRequest::get().uri("/api/jobs?search=DESIGN").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), ["Product Designer"]);

    let req = test::TestRequest::get().uri("/api/jobs?myJobs=true").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn anonymous_routes_reject_bad_tokens_instead_of_ignoring_them() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/jobs")
        .insert_header(bearer("not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/jobs")
        .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn store_failure_during_authentication_is_a_server_error() {
    let state = AppState::new(
        Arc::new(UnavailableStore),
        std::env::temp_dir().join("job-board-test-uploads"),
    );
    let app = test::init_service(App::new().configure(|config| state.configure(config))).await;

    let req = test::TestRequest::get()
        .uri("/api/jobs?myJobs=true")
        .insert_header(bearer("some-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let req = test::TestRequest::get()
        .uri("/api/jobs/1/application-form")
        .insert_header(bearer("some-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn job_listing_includes_recruiter_summary() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "hr@acme.test",
            "role": "recruiter",
            "fullName": "Rina Putri",
            "companyName": "Acme"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();
    create_job!(app, token, job_body("Backend Engineer", "active", "Optional"));

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let recruiter = &body["jobs"][0]["recruiter"];
    assert_eq!(recruiter["full_name"], "Rina Putri");
    assert_eq!(recruiter["company_name"], "Acme");
    assert!(recruiter["avatar_url"].is_null());
}

#[actix_web::test]
async fn inverted_salary_range_is_rejected() {
    let app = init_app!();
    let token = signup!(app, "recruiter@corp.com", "recruiter");

    let mut body = job_body("Backend Engineer", "active", "Optional");
    body["jobSalary"] = json!({"minimum": 8000000, "maximum": 7000000});

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["fields"]["jobSalary.__all__"]["errors"][0],
        "Maximum salary must be greater than or equal to minimum salary"
    );
}

#[actix_web::test]
async fn unknown_requirement_level_is_a_bad_request() {
    let app = init_app!();
    let token = signup!(app, "recruiter@corp.com", "recruiter");

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(&token))
        .set_json(job_body("Backend Engineer", "active", "Sometimes"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn only_recruiters_create_jobs() {
    let app = init_app!();
    let seeker = signup!(app, "seeker@example.com", "job_seeker");

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(&seeker))
        .set_json(job_body("Backend Engineer", "active", "Optional"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn only_the_owner_updates_or_deletes() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let other = signup!(app, "other@corp.com", "recruiter");
    let id = create_job!(app, owner, job_body("Backend Engineer", "active", "Optional"));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/jobs/{}", id))
        .insert_header(bearer(&other))
        .set_json(json!({"jobName": "Hijacked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{}", id))
        .insert_header(bearer(&other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/jobs/{}", id))
        .insert_header(bearer(&owner))
        .set_json(json!({"jobName": "Senior Backend Engineer", "status": "inactive"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["job"]["job_name"], "Senior Backend Engineer");
    assert_eq!(body["job"]["status"], "inactive");

    let req = test::TestRequest::patch()
        .uri("/api/jobs/9999")
        .insert_header(bearer(&owner))
        .set_json(json!({"jobName": "Nothing"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_job_disappears() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let id = create_job!(app, owner, job_body("Backend Engineer", "active", "Optional"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{}", id))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get().uri(&format!("/api/jobs/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["jobs"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn draft_jobs_are_visible_to_their_owner_only() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let id = create_job!(app, owner, job_body("Data Analyst", "draft", "Optional"));

    let req = test::TestRequest::get().uri(&format!("/api/jobs/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/jobs/{}", id))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["job"]["status"], "draft");
}

#[actix_web::test]
async fn application_form_lists_only_requested_fields() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let id = create_job!(app, owner, job_body("Backend Engineer", "active", "Mandatory"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/jobs/{}/application-form", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let fields = body["fields"].as_array().unwrap();
    let keys: Vec<&str> = fields.iter().map(|f| f["key"].as_str().unwrap()).collect();
    assert!(!keys.contains(&"photoUrl"));
    assert!(!keys.contains(&"dateOfBirth"));

    let linkedin = fields.iter().find(|f| f["key"] == "linkedinUrl").unwrap();
    assert_eq!(linkedin["required"], true);
    assert_eq!(linkedin["format"], "linked_in_profile");
    assert_eq!(linkedin["requirement_key"], "linkedInLink");
    let gender = fields.iter().find(|f| f["key"] == "gender").unwrap();
    assert_eq!(gender["required"], false);
    assert_eq!(gender["requirement_key"], "gender");

    let mut required: Vec<&str> = body["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|key| key.as_str().unwrap())
        .collect();
    required.sort_unstable();
    assert_eq!(required, ["email", "fullName", "linkedinUrl"]);
}

#[actix_web::test]
async fn mandatory_linkedin_and_duplicate_applications() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let seeker = signup!(app, "seeker@example.com", "job_seeker");
    let id = create_job!(app, owner, job_body("Backend Engineer", "active", "Mandatory"));
    let uri = format!("/api/jobs/{}/applications", id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&seeker))
        .set_json(json!({
            "fullName": "Rina Putri",
            "email": "rina@example.com",
            "linkedinUrl": "https://example.com/rina"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["linkedinUrl"]["errors"][0].is_string());

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&seeker))
        .set_json(json!({"linkedinUrl": "https://www.linkedin.com/in/rina-putri"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["fullName"].is_object());
    assert!(body["fields"]["email"].is_object());

    let valid = json!({
        "fullName": "Rina Putri",
        "email": "rina@example.com",
        "linkedinUrl": "https://www.linkedin.com/in/rina-putri",
        "dateOfBirth": "1995-04-12"
    });
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&seeker))
        .set_json(&valid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["application"]["full_name"], "Rina Putri");
    assert!(body["application"]["date_of_birth"].is_null());

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&seeker))
        .set_json(&valid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/applications/my")
        .insert_header(bearer(&seeker))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mine = body["applications"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["job"]["job_name"], "Backend Engineer");
}

#[actix_web::test]
async fn applying_requires_an_active_job_and_a_job_seeker() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let seeker = signup!(app, "seeker@example.com", "job_seeker");
    let draft = create_job!(app, owner, job_body("Data Analyst", "draft", "Off"));
    let active = create_job!(app, owner, job_body("Backend Engineer", "active", "Off"));
    let application = json!({"fullName": "Rina", "email": "rina@example.com"});

    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/applications", draft))
        .insert_header(bearer(&seeker))
        .set_json(&application)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/applications", active))
        .insert_header(bearer(&owner))
        .set_json(&application)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/applications", active))
        .set_json(&application)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn only_the_owner_reviews_applications() {
    let app = init_app!();
    let owner = signup!(app, "owner@corp.com", "recruiter");
    let other = signup!(app, "other@corp.com", "recruiter");
    let id = create_job!(app, owner, job_body("Backend Engineer", "active", "Off"));
    let uri = format!("/api/jobs/{}/applications", id);

    for (n, domicile) in ["Jakarta", "Bandung", "Jakarta"].iter().enumerate() {
        let seeker = signup!(app, format!("seeker{}@example.com", n), "job_seeker");
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&seeker))
            .set_json(json!({
                "fullName": format!("Seeker {}", n),
                "email": format!("seeker{}@example.com", n),
                "domicile": domicile
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("{}?pageSize=2&sortBy=full_name&sortOrder=asc", uri))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["page"], 1);
    let page = body["applications"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["full_name"], "Seeker 0");
    assert!(page[0]["applicant"]["id"].is_i64());
    assert_ne!(page[0]["applicant"]["id"], page[1]["applicant"]["id"]);
    assert!(page[0]["applicant"].get("avatar_url").is_some());

    let req = test::TestRequest::get()
        .uri(&format!("{}?page=9223372036854775807", uri))
        .insert_header(bearer(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("{}?page=1000000&pageSize=100", uri))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    assert!(body["applications"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("{}?domicile=Jakarta", uri))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("{}?pageSize=0", uri))
        .insert_header(bearer(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["jobs"][0]["application_count"], 3);
}

#[actix_web::test]
async fn health_endpoints_report_backend() {
    let app = init_app!();

    for uri in ["/health", "/ready", "/live"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["backend"], "memory");
    }
}
