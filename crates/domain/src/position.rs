//! Position model and field validation rules.
//!
//! A position is one tracked job application. Validation is identical for
//! every actor: field-level checks run first and collect into a single
//! [`ValidationErrors`] so a client sees every problem at once, then the
//! joint company/recruiter constraint is reported under both field names.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use applitrack_core::ValidationErrors;

/// Unique identifier for a position record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(Uuid);

impl PositionId {
    /// Creates a new random position identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a position identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PositionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Where a tracked application currently stands.
///
/// A free-standing classification, not a workflow: any value may follow any
/// other (moving "rejected" back to "applied" is legal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    /// Bookmarked but not yet applied to.
    #[default]
    Saved,
    /// Application submitted.
    Applied,
    /// In the interview pipeline.
    Interviewing,
    /// Offer received.
    Offered,
    /// Application rejected.
    Rejected,
    /// Withdrawn by the candidate.
    Withdrawn,
}

impl PositionStatus {
    /// Returns the storage string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Applied => "applied",
            Self::Interviewing => "interviewing",
            Self::Offered => "offered",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parses a storage string into a status.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "saved" => Some(Self::Saved),
            "applied" => Some(Self::Applied),
            "interviewing" => Some(Self::Interviewing),
            "offered" => Some(Self::Offered),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

impl Display for PositionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Maximum length for single-line string fields.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Message reported under both company fields when neither is set.
pub const JOINT_COMPANY_MESSAGE: &str = "Either company or recruiter_company is required.";

/// Raw position input as submitted by a client, before validation.
///
/// Date and status arrive as strings so a malformed value becomes a
/// field-addressable error instead of a request-level decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionDraft {
    /// Hiring company name.
    pub company: Option<String>,
    /// Recruiting agency name, when applying through one.
    pub recruiter_company: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Free-form role description.
    pub description: Option<String>,
    /// Application status; defaults to "saved" when omitted.
    pub status: Option<String>,
    /// Role location.
    pub location: Option<String>,
    /// Salary as advertised (free text, e.g. "£70k-£90k" or "Competitive").
    pub salary: Option<String>,
    /// Link to the posting.
    pub url: Option<String>,
    /// Private notes.
    pub notes: Option<String>,
    /// Date the application was submitted, `YYYY-MM-DD`.
    pub applied_at: Option<String>,
}

/// Validated position fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFields {
    /// Hiring company name.
    pub company: Option<String>,
    /// Recruiting agency name.
    pub recruiter_company: Option<String>,
    /// Job title.
    pub title: String,
    /// Free-form role description.
    pub description: Option<String>,
    /// Application status.
    pub status: PositionStatus,
    /// Role location.
    pub location: Option<String>,
    /// Advertised salary, free text.
    pub salary: Option<String>,
    /// Link to the posting.
    pub url: Option<String>,
    /// Private notes.
    pub notes: Option<String>,
    /// Date the application was submitted.
    pub applied_at: Option<NaiveDate>,
}

impl PositionDraft {
    /// Validates every field, collecting all failures into one error set.
    ///
    /// The company/recruiter joint constraint runs after the field-level
    /// checks and lands under both `company` and `recruiter_company`.
    pub fn validate(&self) -> Result<PositionFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = match normalize(&self.title) {
            Some(title) => {
                check_length(&mut errors, "title", &title);
                title
            }
            None => {
                errors.push("title", "title is required");
                String::new()
            }
        };

        let company = bounded_optional(&mut errors, "company", &self.company);
        let recruiter_company =
            bounded_optional(&mut errors, "recruiter_company", &self.recruiter_company);
        let location = bounded_optional(&mut errors, "location", &self.location);
        let salary = bounded_optional(&mut errors, "salary", &self.salary);

        // description and notes are unbounded text.
        let description = normalize(&self.description);
        let notes = normalize(&self.notes);

        let status = match normalize(&self.status) {
            Some(raw) => match PositionStatus::parse(&raw) {
                Some(status) => status,
                None => {
                    errors.push(
                        "status",
                        "status must be one of: saved, applied, interviewing, offered, rejected, withdrawn",
                    );
                    PositionStatus::default()
                }
            },
            None => PositionStatus::default(),
        };

        let url = match normalize(&self.url) {
            Some(raw) => {
                check_length(&mut errors, "url", &raw);
                if Url::parse(&raw).is_err() {
                    errors.push("url", "url must be a valid URL");
                }
                Some(raw)
            }
            None => None,
        };

        let applied_at = match normalize(&self.applied_at) {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("applied_at", "applied_at must be a valid date (YYYY-MM-DD)");
                    None
                }
            },
            None => None,
        };

        if company.is_none() && recruiter_company.is_none() {
            errors.push("company", JOINT_COMPANY_MESSAGE);
            errors.push("recruiter_company", JOINT_COMPANY_MESSAGE);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PositionFields {
            company,
            recruiter_company,
            title,
            description,
            status,
            location,
            salary,
            url,
            notes,
            applied_at,
        })
    }
}

/// Treats missing, empty, and whitespace-only input as absent.
fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToOwned::to_owned)
}

fn check_length(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.chars().count() > MAX_FIELD_LENGTH {
        errors.push(
            field,
            format!("{field} must not exceed {MAX_FIELD_LENGTH} characters"),
        );
    }
}

fn bounded_optional(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
) -> Option<String> {
    let normalized = normalize(value);
    if let Some(ref present) = normalized {
        check_length(errors, field, present);
    }
    normalized
}
