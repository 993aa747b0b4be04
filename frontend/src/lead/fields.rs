use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceSelection {
    WebsiteDesign,
    AiAgents,
    CrmIntegration,
    AllServices,
}

impl ServiceSelection {
    pub const ALL: [ServiceSelection; 4] = [
        ServiceSelection::WebsiteDesign,
        ServiceSelection::AiAgents,
        ServiceSelection::CrmIntegration,
        ServiceSelection::AllServices,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ServiceSelection::WebsiteDesign => "website-design",
            ServiceSelection::AiAgents => "ai-agents",
            ServiceSelection::CrmIntegration => "crm-integration",
            ServiceSelection::AllServices => "all-services",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceSelection::WebsiteDesign => "Website Design",
            ServiceSelection::AiAgents => "AI Agents",
            ServiceSelection::CrmIntegration => "CRM Integration",
            ServiceSelection::AllServices => "All Services",
        }
    }
}

impl fmt::Display for ServiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ServiceSelection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceSelection::ALL
            .into_iter()
            .find(|service| service.slug() == s.trim())
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Email,
    CompanyName,
    ServiceSelection,
    Problems,
    AdditionalInfo,
}

impl FieldName {
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::FullName => "Full name",
            FieldName::Email => "Email",
            FieldName::CompanyName => "Company name",
            FieldName::ServiceSelection => "Service",
            FieldName::Problems => "Problems",
            FieldName::AdditionalInfo => "Additional information",
        }
    }
}

/// Everything the visitor typed, exactly as typed. Normalization happens when
/// a record is built, not on every keystroke.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub service_selection: Option<ServiceSelection>,
    pub problems: String,
    pub additional_info: String,
}

impl FormFields {
    pub fn set(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::FullName => self.full_name = value,
            FieldName::Email => self.email = value,
            FieldName::CompanyName => self.company_name = value,
            // Anything that isn't a known slug (including the placeholder
            // option's empty value) means "unselected".
            FieldName::ServiceSelection => self.service_selection = value.parse().ok(),
            FieldName::Problems => self.problems = value,
            FieldName::AdditionalInfo => self.additional_info = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    InvalidFormat,
}

impl FieldError {
    pub fn message(&self, field: FieldName) -> String {
        match (self, field) {
            (FieldError::Required, FieldName::ServiceSelection) => {
                "Please select a service".to_string()
            }
            (FieldError::Required, FieldName::Problems) => {
                "Please describe the problems you want to solve".to_string()
            }
            (FieldError::Required, field) => format!("{} is required", field.label()),
            (FieldError::TooShort { min }, FieldName::Problems) => {
                format!("Please provide at least {} characters", min)
            }
            (FieldError::TooShort { min }, field) => {
                format!("{} must be at least {} characters", field.label(), min)
            }
            (FieldError::InvalidFormat, _) => "Please enter a valid email address".to_string(),
        }
    }
}

/// Presence of a key means that field currently fails validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<FieldName, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn clear(&mut self, field: FieldName) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: FieldName) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: FieldName) -> Option<String> {
        self.get(field).map(|error| error.message(field))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_slugs_parse_back() {
        for service in ServiceSelection::ALL {
            assert_eq!(service.slug().parse::<ServiceSelection>(), Ok(service));
        }
        assert!("".parse::<ServiceSelection>().is_err());
        assert!("seo".parse::<ServiceSelection>().is_err());
    }

    #[test]
    fn unknown_service_value_unselects() {
        let mut fields = FormFields::default();
        fields.set(FieldName::ServiceSelection, "ai-agents".to_string());
        assert_eq!(fields.service_selection, Some(ServiceSelection::AiAgents));

        fields.set(FieldName::ServiceSelection, String::new());
        assert_eq!(fields.service_selection, None);
    }

    #[test]
    fn service_serializes_as_slug() {
        let json = serde_json::to_string(&ServiceSelection::CrmIntegration).unwrap();
        assert_eq!(json, "\"crm-integration\"");
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            FieldError::Required.message(FieldName::CompanyName),
            "Company name is required"
        );
        assert_eq!(
            FieldError::TooShort { min: 2 }.message(FieldName::FullName),
            "Full name must be at least 2 characters"
        );
        assert_eq!(
            FieldError::TooShort { min: 50 }.message(FieldName::Problems),
            "Please provide at least 50 characters"
        );
    }
}
