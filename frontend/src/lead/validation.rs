use once_cell::sync::Lazy;
use regex::Regex;

use super::fields::{FieldError, FieldName, FormFields, ValidationErrors};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_COMPANY_LEN: usize = 2;
pub const MIN_PROBLEMS_LEN: usize = 50;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_min_length(value: &str, min: usize) -> Option<FieldError> {
    let value = value.trim();
    if value.is_empty() {
        Some(FieldError::Required)
    } else if value.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else {
        None
    }
}

/// Runs every rule against every field. The result is empty iff the form can
/// be submitted.
pub fn validate(fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(error) = check_min_length(&fields.full_name, MIN_NAME_LEN) {
        errors.insert(FieldName::FullName, error);
    }

    let email = fields.email.trim();
    if email.is_empty() {
        errors.insert(FieldName::Email, FieldError::Required);
    } else if !is_valid_email(email) {
        errors.insert(FieldName::Email, FieldError::InvalidFormat);
    }

    if let Some(error) = check_min_length(&fields.company_name, MIN_COMPANY_LEN) {
        errors.insert(FieldName::CompanyName, error);
    }

    if fields.service_selection.is_none() {
        errors.insert(FieldName::ServiceSelection, FieldError::Required);
    }

    if let Some(error) = check_min_length(&fields.problems, MIN_PROBLEMS_LEN) {
        errors.insert(FieldName::Problems, error);
    }

    errors
}
