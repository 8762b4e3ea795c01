//! Configuration options for the MoveMate client

use std::time::Duration;

/// Environment variable consulted for the Google sign-in client id.
pub const GOOGLE_CLIENT_ID_ENV: &str = "MOVEMATE_GOOGLE_CLIENT_ID";

/// Configuration options for the MoveMate client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Client identifier for Google sign-in. Absent means the feature is
    /// unavailable, not that the client fails.
    pub google_client_id: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            google_client_id: std::env::var(GOOGLE_CLIENT_ID_ENV).ok(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the Google sign-in client identifier
    pub fn with_google_client_id(mut self, value: Option<String>) -> Self {
        self.google_client_id = value;
        self
    }
}
