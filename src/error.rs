//! Error handling for the MoveMate Rust client

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Result type used across the client.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error detail returned by the backend.
///
/// The backend answers failed requests with either a top-level `detail`
/// message, a machine-readable `code`, per-field validation messages, or
/// any mix of the three.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ApiErrorDetails {
    pub detail: Option<String>,
    pub code: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        for (field, messages) in &self.fields {
            parts.push(format!("{}: {}", field, messages));
        }
        if parts.is_empty() {
            parts.push("Unknown error".to_string());
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Unified error type for the MoveMate Rust client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx response with a parsable server detail
    #[error("API error: {details} (Status: {status})")]
    Api {
        status: reqwest::StatusCode,
        details: ApiErrorDetails,
    },

    /// Non-2xx response whose body was not a detail document
    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApi {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Authentication errors surfaced by the auth crate
    #[error("Authentication error: {0}")]
    Auth(#[from] movemate_rust_auth::AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn details_parse_field_errors() {
        let details: ApiErrorDetails =
            serde_json::from_value(json!({ "company_name": ["This field is required."] }))
                .unwrap();

        assert!(details.detail.is_none());
        assert_eq!(
            details.fields["company_name"],
            json!(["This field is required."])
        );
        assert!(details.to_string().contains("company_name"));
    }

    #[test]
    fn details_display_prefers_code_then_detail() {
        let details: ApiErrorDetails =
            serde_json::from_value(json!({ "detail": "Not found", "code": "not_found" }))
                .unwrap();

        assert_eq!(details.to_string(), "Code: not_found, Not found");
    }
}
