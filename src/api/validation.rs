use actix_web::HttpResponse;
use convert_case::{Case, Casing};
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

/// `job_salary` -> `jobSalary`; `__all__` is kept as is
fn camel_case(segment: &str) -> String {
    if segment.starts_with("__") {
        return segment.to_string();
    }
    segment.to_case(Case::Camel)
}

fn collect_field_errors(
    prefix: Option<&str>,
    errors: &ValidationErrors,
    out: &mut serde_json::Map<String, serde_json::Value>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, camel_case(field)),
            None => camel_case(field),
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation error in field: {}", path))
                    })
                    .collect();
                out.insert(path, serde_json::json!({"errors": messages}));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(Some(&format!("{}[{}]", path, index)), nested, out);
                }
            }
        }
    }
}

/// Field-level messages keyed by request field path, nested objects dotted
pub fn field_errors_json(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    collect_field_errors(None, errors, &mut fields);
    serde_json::Value::Object(fields)
}

fn bad_request(error: &str, fields: serde_json::Value) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: error.to_string(),
        fields,
    };
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(error_response))
        .into()
}

fn describe_deserialize_error(err_string: &str) -> &'static str {
    if err_string.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload"
    } else if err_string.contains("unknown variant") {
        "Invalid enum value. Check allowed values for this field"
    } else if err_string.contains("missing field") {
        "Required field is missing"
    } else {
        "Invalid JSON format"
    }
}

/// Standardized 400 response for extractor failures across the project
fn handle_extractor_error(err: actix_web_validator::Error) -> actix_web::Error {
    match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            tracing::warn!("Request validation failed: {}", validation_errors);
            bad_request("Validation failed", field_errors_json(&validation_errors))
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let err_string = de_err.to_string();
            tracing::warn!("Request deserialization failed: {}", err_string);
            bad_request(
                "Request validation failed",
                serde_json::json!({"message": describe_deserialize_error(&err_string)}),
            )
        }
        actix_web_validator::Error::JsonPayloadError(payload_err) => {
            let err_string = payload_err.to_string();
            tracing::warn!("Invalid JSON payload: {}", err_string);
            bad_request(
                "Request validation failed",
                serde_json::json!({"message": describe_deserialize_error(&err_string)}),
            )
        }
        other => {
            tracing::warn!("Request rejected: {}", other);
            bad_request("Validation failed", serde_json::json!({"message": "Validation error"}))
        }
    }
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| handle_extractor_error(err))
}

/// Query-string counterpart of [`json_config`]
pub fn query_config() -> actix_web_validator::QueryConfig {
    actix_web_validator::QueryConfig::default().error_handler(|err, _req| handle_extractor_error(err))
}
