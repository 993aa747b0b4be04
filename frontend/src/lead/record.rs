use serde::{Deserialize, Serialize};

use super::fields::{FormFields, ServiceSelection};

/// Normalized payload written to the consultation store for one submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub service_selection: ServiceSelection,
    pub problems: String,
    pub additional_info: Option<String>,
}

impl ConsultationRecord {
    /// Returns `None` when no service has been picked; callers validate first.
    pub fn from_fields(fields: &FormFields) -> Option<Self> {
        let additional_info = fields.additional_info.trim();
        Some(Self {
            full_name: fields.full_name.trim().to_string(),
            email: fields.email.trim().to_lowercase(),
            company_name: fields.company_name.trim().to_string(),
            service_selection: fields.service_selection?,
            problems: fields.problems.trim().to_string(),
            additional_info: (!additional_info.is_empty()).then(|| additional_info.to_string()),
        })
    }
}

/// What the store hands back. Only its arrival matters to the form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_status() -> String {
    "pending".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_trimmed_and_email_lowercased() {
        let fields = FormFields {
            full_name: "  Jane Doe ".to_string(),
            email: " Jane@Example.COM ".to_string(),
            company_name: "Acme Inc  ".to_string(),
            service_selection: Some(ServiceSelection::AllServices),
            problems: "  lots of manual work  ".to_string(),
            additional_info: "   ".to_string(),
        };
        let record = ConsultationRecord::from_fields(&fields).unwrap();
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.company_name, "Acme Inc");
        assert_eq!(record.problems, "lots of manual work");
        assert_eq!(record.additional_info, None);
    }

    #[test]
    fn record_needs_a_service() {
        assert!(ConsultationRecord::from_fields(&FormFields::default()).is_none());
    }

    #[test]
    fn record_wire_shape() {
        let record = ConsultationRecord {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company_name: "Acme".to_string(),
            service_selection: ServiceSelection::WebsiteDesign,
            problems: "p".to_string(),
            additional_info: Some("call after 3pm".to_string()),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["service_selection"], "website-design");
        assert_eq!(value["additional_info"], "call after 3pm");
        assert_eq!(value["company_name"], "Acme");
    }

    #[test]
    fn stored_record_tolerates_missing_metadata() {
        let stored: StoredRecord = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(stored.status, "pending");
        assert_eq!(stored.created_at, 0);
    }
}
