use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::consultation_models::{Consultation, NewConsultation, STATUSES};

pub const SERVICE_SLUGS: [&str; 4] = ["website-design", "ai-agents", "crm-integration", "all-services"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsultationRequest {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub service_selection: String,
    pub problems: String,
    #[serde(default)]
    pub additional_info: Option<String>,
}

fn require_min(field: &str, value: &str, min: usize, problems: &mut Vec<String>) {
    if value.is_empty() {
        problems.push(format!("{} is required", field));
    } else if value.chars().count() < min {
        problems.push(format!("{} must be at least {} characters", field, min));
    }
}

impl CreateConsultationRequest {
    /// Same rules the site applies before sending, checked again here because
    /// the endpoint is public.
    pub fn into_new_consultation(self, id: String, now: i64) -> Result<NewConsultation, ApiError> {
        let full_name = self.full_name.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let company_name = self.company_name.trim().to_string();
        let service_selection = self.service_selection.trim().to_string();
        let problems = self.problems.trim().to_string();
        let additional_info = self
            .additional_info
            .map(|info| info.trim().to_string())
            .filter(|info| !info.is_empty());

        let mut invalid = Vec::new();
        require_min("Full name", &full_name, 2, &mut invalid);
        if email.is_empty() {
            invalid.push("Email is required".to_string());
        } else if !EMAIL_RE.is_match(&email) {
            invalid.push("Email is not a valid address".to_string());
        }
        require_min("Company name", &company_name, 2, &mut invalid);
        if !SERVICE_SLUGS.contains(&service_selection.as_str()) {
            invalid.push("Service selection is not a known service".to_string());
        }
        require_min("Problems", &problems, 50, &mut invalid);

        if !invalid.is_empty() {
            return Err(ApiError::Validation(invalid.join("; ")));
        }

        Ok(NewConsultation {
            id,
            full_name,
            email,
            company_name,
            service_selection,
            problems,
            additional_info,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultationResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub service_selection: String,
    pub problems: String,
    pub additional_info: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Consultation> for ConsultationResponse {
    fn from(c: Consultation) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name,
            email: c.email,
            company_name: c.company_name,
            service_selection: c.service_selection,
            problems: c.problems,
            additional_info: c.additional_info,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListConsultationsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn validated_status(&self) -> Result<&'static str, ApiError> {
        let wanted = self.status.trim();
        STATUSES
            .iter()
            .find(|status| **status == wanted)
            .copied()
            .ok_or_else(|| ApiError::Validation(format!(
                "Status must be one of: {}",
                STATUSES.join(", ")
            )))
    }
}
