//! Application-form schema derived from a job's requirement flags.
//!
//! The same [`ApplicationSchema`] is built when describing the form to a client
//! and when validating a submission, so both sides agree on which fields are
//! required.

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use super::models::{ApplicationInput, ApplicationSnapshot, Gender};
use crate::api::job::models::{ApplicantField, ProfileRequirements, RequirementLevel};

static LINKEDIN_PROFILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/in/[\w-]+/?$").expect("valid LinkedIn regex")
});

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format constraint a present value has to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    NonEmpty,
    Email,
    Gender,
    LinkedInProfile,
    PastDate,
}

impl FieldFormat {
    fn for_field(field: ApplicantField) -> Self {
        match field {
            ApplicantField::FullName
            | ApplicantField::PhotoProfile
            | ApplicantField::Domicile
            | ApplicantField::PhoneNumber => FieldFormat::NonEmpty,
            ApplicantField::Email => FieldFormat::Email,
            ApplicantField::Gender => FieldFormat::Gender,
            ApplicantField::LinkedInLink => FieldFormat::LinkedInProfile,
            ApplicantField::DateOfBirth => FieldFormat::PastDate,
        }
    }

    fn check(&self, value: &str, today: NaiveDate) -> Result<(), ValidationError> {
        match self {
            FieldFormat::NonEmpty => Ok(()),
            FieldFormat::Email if value.validate_email() => Ok(()),
            FieldFormat::Email => Err(field_error("email", "Please enter a valid email")),
            FieldFormat::Gender if Gender::parse(value).is_some() => Ok(()),
            FieldFormat::Gender => Err(field_error("gender", "Gender must be male or female")),
            FieldFormat::LinkedInProfile => validate_linkedin_profile(value),
            FieldFormat::PastDate => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
                Ok(date) if date <= today => Ok(()),
                Ok(_) => Err(field_error("date", "Date of birth cannot be in the future")),
                Err(_) => Err(field_error("date", "Date must be formatted as YYYY-MM-DD")),
            },
        }
    }
}

/// `https://(www.)linkedin.com/in/<slug>`, shared by applications and profile updates
pub fn validate_linkedin_profile(value: &str) -> Result<(), ValidationError> {
    if LINKEDIN_PROFILE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(field_error(
            "linkedin_url",
            "Please copy paste your LinkedIn URL, example: https://www.linkedin.com/in/username",
        ))
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// One field present in the schema. `Off` fields never get a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: ApplicantField,
    pub required: bool,
    pub format: FieldFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSchema {
    rules: Vec<FieldRule>,
}

impl ApplicationSchema {
    pub fn for_requirements(requirements: &ProfileRequirements) -> Self {
        let rules = ApplicantField::ALL
            .iter()
            .filter_map(|&field| {
                let required = match requirements.level(field) {
                    RequirementLevel::Mandatory => true,
                    RequirementLevel::Optional => false,
                    RequirementLevel::Off => return None,
                };
                Some(FieldRule {
                    field,
                    required,
                    format: FieldFormat::for_field(field),
                })
            })
            .collect();

        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn contains(&self, field: ApplicantField) -> bool {
        self.rules.iter().any(|rule| rule.field == field)
    }

    pub fn is_required(&self, field: ApplicantField) -> bool {
        self.rules.iter().any(|rule| rule.field == field && rule.required)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = ApplicantField> + '_ {
        self.rules.iter().filter(|rule| rule.required).map(|rule| rule.field)
    }

    /// Check a submission. Errors are keyed by the submission's field names.
    pub fn validate(&self, input: &ApplicationInput) -> Result<(), ValidationErrors> {
        self.validate_on(input, Utc::now().date_naive())
    }

    fn validate_on(&self, input: &ApplicationInput, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rule in &self.rules {
            match present(input, rule.field) {
                Some(value) => {
                    if let Err(error) = rule.format.check(value, today) {
                        errors.add(rule.field.input_key(), error);
                    }
                }
                None if rule.required => {
                    errors.add(
                        rule.field.input_key(),
                        field_error("required", format!("{} is required", rule.field.label())),
                    );
                }
                None => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and keep only the fields this job asks for
    pub fn accept(&self, input: ApplicationInput) -> Result<ApplicationSnapshot, ValidationErrors> {
        self.validate(&input)?;

        let keep = |field: ApplicantField| -> Option<String> {
            if self.contains(field) {
                present(&input, field).map(str::to_string)
            } else {
                None
            }
        };

        Ok(ApplicationSnapshot {
            full_name: keep(ApplicantField::FullName),
            photo_url: keep(ApplicantField::PhotoProfile),
            gender: keep(ApplicantField::Gender).as_deref().and_then(Gender::parse),
            domicile: keep(ApplicantField::Domicile),
            email: keep(ApplicantField::Email),
            phone_number: keep(ApplicantField::PhoneNumber),
            linkedin_url: keep(ApplicantField::LinkedInLink),
            date_of_birth: keep(ApplicantField::DateOfBirth)
                .and_then(|value| NaiveDate::parse_from_str(&value, DATE_FORMAT).ok()),
        })
    }
}

/// Trimmed value of a field, or None when missing or blank
fn present(input: &ApplicationInput, field: ApplicantField) -> Option<&str> {
    let value = match field {
        ApplicantField::FullName => &input.full_name,
        ApplicantField::PhotoProfile => &input.photo_url,
        ApplicantField::Gender => &input.gender,
        ApplicantField::Domicile => &input.domicile,
        ApplicantField::Email => &input.email,
        ApplicantField::PhoneNumber => &input.phone_number,
        ApplicantField::LinkedInLink => &input.linkedin_url,
        ApplicantField::DateOfBirth => &input.date_of_birth,
    };
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
