use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Raw application form as submitted. Every field is optional at this stage;
/// which ones are required depends on the job, see [`super::schema`].
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub domicile: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Applicant data accepted for one job, with fields the job does not ask for removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationSnapshot {
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub gender: Option<Gender>,
    pub domicile: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSortField {
    #[default]
    AppliedAt,
    FullName,
    Email,
    Domicile,
}

impl ApplicationSortField {
    pub fn column(&self) -> &'static str {
        match self {
            ApplicationSortField::AppliedAt => "applied_at",
            ApplicationSortField::FullName => "full_name",
            ApplicationSortField::Email => "email",
            ApplicationSortField::Domicile => "domicile",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Relative window for the applied-date filter
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AppliedWithin {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
}

impl AppliedWithin {
    pub fn cutoff(&self, now: chrono::NaiveDateTime) -> chrono::NaiveDateTime {
        match self {
            AppliedWithin::Day => now - chrono::Duration::hours(24),
            AppliedWithin::Week => now - chrono::Duration::days(7),
            AppliedWithin::Month => now
                .checked_sub_months(chrono::Months::new(1))
                .unwrap_or(now - chrono::Duration::days(30)),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Filtering, sorting and paging of a job's applications
#[derive(Debug, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1_000_000, message = "Page must be between 1 and 1000000"))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i64,
    #[serde(default)]
    pub sort_by: ApplicationSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Phone number prefix, e.g. a country code
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub domicile: Option<String>,
    pub applied_within: Option<AppliedWithin>,
}

impl Default for ApplicationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort_by: ApplicationSortField::default(),
            sort_order: SortOrder::default(),
            phone: None,
            gender: None,
            domicile: None,
            applied_within: None,
        }
    }
}

impl ApplicationQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn day_and_week_windows_are_fixed_durations() {
        let now = at("2025-06-15 12:00:00");
        assert_eq!(AppliedWithin::Day.cutoff(now), now - Duration::hours(24));
        assert_eq!(AppliedWithin::Week.cutoff(now), at("2025-06-08 12:00:00"));
    }

    #[test]
    fn month_window_is_a_calendar_month_clamped_to_month_end() {
        assert_eq!(
            AppliedWithin::Month.cutoff(at("2025-06-15 08:30:00")),
            at("2025-05-15 08:30:00")
        );
        assert_eq!(
            AppliedWithin::Month.cutoff(at("2025-03-31 10:00:00")),
            at("2025-02-28 10:00:00")
        );
    }

    #[test]
    fn page_is_bounded_so_the_offset_cannot_overflow() {
        let query = ApplicationQuery {
            page: i64::MAX,
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = ApplicationQuery {
            page: 1_000_000,
            page_size: 100,
            ..Default::default()
        };
        assert!(query.validate().is_ok());
        assert_eq!(query.offset(), 99_999_900);
    }
}
