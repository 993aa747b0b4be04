use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use super::record::{ConsultationRecord, StoredRecord};
use crate::config;

/// A failed write as reported by the store or the transport underneath it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub category: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn new(category: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            category: category.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(Some("network"), message)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ConsultationStore {
    fn create_consultation(
        &self,
        record: ConsultationRecord,
    ) -> LocalBoxFuture<'static, Result<StoredRecord, StoreError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Database,
    Network,
    Unknown,
}

const NETWORK_HINTS: [&str; 5] = ["network", "fetch", "connection", "timed out", "timeout"];
const DATABASE_HINTS: [&str; 5] = ["database", "constraint", "relation", "duplicate", "violates"];

impl FailureKind {
    pub fn classify(error: &StoreError) -> Self {
        match error.category.as_deref() {
            Some("database") => return FailureKind::Database,
            Some("network") => return FailureKind::Network,
            _ => {}
        }

        let message = error.message.to_lowercase();
        if NETWORK_HINTS.iter().any(|hint| message.contains(hint)) {
            FailureKind::Network
        } else if DATABASE_HINTS.iter().any(|hint| message.contains(hint)) {
            FailureKind::Database
        } else {
            FailureKind::Unknown
        }
    }

    pub fn user_message(&self) -> String {
        let support = config::SUPPORT_EMAIL;
        match self {
            FailureKind::Database => format!(
                "We couldn't save your details because of a problem on our side. \
                 Please try again in a moment, or email us at {}.",
                support
            ),
            FailureKind::Network => format!(
                "We couldn't reach our servers. Please check your connection and try again, \
                 or email us at {}.",
                support
            ),
            FailureKind::Unknown => format!(
                "Something went wrong while sending the form. Please try again, \
                 or email us at {}.",
                support
            ),
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    category: Option<String>,
}

/// The request never got an answer.
fn transport_error(error: gloo_net::Error) -> StoreError {
    StoreError::network(error.to_string())
}

/// Maps a non-2xx answer. Bodies that are not the backend's
/// `{ error, category }` shape leave the category open.
fn error_from_response(status: u16, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(body) => StoreError {
            category: body.category,
            message: body.error,
        },
        Err(_) => StoreError::new(
            None,
            format!("Store rejected the record with status {}", status),
        ),
    }
}

/// Writes records through the backend's `/api/consultations` endpoint.
pub struct HttpConsultationStore {
    base_url: String,
}

impl HttpConsultationStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for HttpConsultationStore {
    fn default() -> Self {
        Self::new(config::get_backend_url())
    }
}

impl ConsultationStore for HttpConsultationStore {
    fn create_consultation(
        &self,
        record: ConsultationRecord,
    ) -> LocalBoxFuture<'static, Result<StoredRecord, StoreError>> {
        let url = format!("{}/api/consultations", self.base_url);
        async move {
            let request = Request::post(&url)
                .json(&record)
                .map_err(|e| StoreError::new(None, e.to_string()))?;

            let response = request.send().await.map_err(transport_error)?;

            if response.ok() {
                return response
                    .json::<StoredRecord>()
                    .await
                    .map_err(|e| StoreError::new(None, format!("Unexpected response: {}", e)));
            }

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(error_from_response(status, &body))
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wins_over_message() {
        let error = StoreError::new(Some("database"), "failed to fetch");
        assert_eq!(FailureKind::classify(&error), FailureKind::Database);
        assert_eq!(
            FailureKind::classify(&StoreError::network("boom")),
            FailureKind::Network
        );
    }

    #[test]
    fn message_keywords_classify_uncategorized_errors() {
        let fetch = StoreError::new(None, "TypeError: Failed to fetch");
        assert_eq!(FailureKind::classify(&fetch), FailureKind::Network);

        let constraint = StoreError::new(
            Some("validation"),
            "new row violates check constraint",
        );
        assert_eq!(FailureKind::classify(&constraint), FailureKind::Database);

        let other = StoreError::new(None, "Store rejected the record with status 418");
        assert_eq!(FailureKind::classify(&other), FailureKind::Unknown);
    }

    #[test]
    fn user_messages_offer_support_email() {
        for kind in [FailureKind::Database, FailureKind::Network, FailureKind::Unknown] {
            assert!(kind.user_message().contains(config::SUPPORT_EMAIL));
        }
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let error = transport_error(gloo_net::Error::GlooError("Failed to fetch".to_string()));
        assert_eq!(error.category.as_deref(), Some("network"));
        assert_eq!(FailureKind::classify(&error), FailureKind::Network);
    }

    #[test]
    fn backend_error_body_keeps_category_and_message() {
        let error = error_from_response(
            500,
            r#"{"error":"Database error: database is locked","category":"database"}"#,
        );
        assert_eq!(error.category.as_deref(), Some("database"));
        assert_eq!(error.message, "Database error: database is locked");
        assert_eq!(FailureKind::classify(&error), FailureKind::Database);
    }

    #[test]
    fn unreadable_error_body_is_unknown() {
        // axum answers malformed JSON with a plain-text 422.
        let plain = error_from_response(
            422,
            "Failed to deserialize the JSON body into the target type: missing field `email`",
        );
        assert_eq!(plain.category, None);
        assert_eq!(plain.message, "Store rejected the record with status 422");
        assert_eq!(FailureKind::classify(&plain), FailureKind::Unknown);

        let empty = error_from_response(502, "");
        assert_eq!(FailureKind::classify(&empty), FailureKind::Unknown);

        let wrong_shape = error_from_response(400, r#"{"detail":"nope"}"#);
        assert_eq!(wrong_shape.category, None);
    }
}
