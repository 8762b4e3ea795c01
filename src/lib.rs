//! MoveMate Rust Client Library
//!
//! A typed Rust client for the MoveMate moving-services marketplace API:
//! the session/auth lifecycle plus one endpoint group per backend resource
//! (pricing, analytics, admin catalog and moderation, notifications,
//! scheduling, quotes, comparisons).
//!
//! All business rules live server-side; this client translates typed calls
//! into single HTTP requests and typed results back, with no retries and
//! no caching.

pub mod analytics;
pub mod catalog;
pub mod comparisons;
pub mod config;
pub mod error;
pub mod fetch;
pub mod moderation;
pub mod notifications;
pub mod pricing;
pub mod quotes;
pub mod scheduling;

pub use movemate_rust_auth as auth;

use std::sync::Arc;

use reqwest::Client;

use crate::analytics::AnalyticsClient;
use crate::auth::{AuthClient, CredentialStore, MemoryCredentialStore, SessionStore};
use crate::catalog::CatalogClient;
use crate::comparisons::ComparisonsClient;
use crate::config::ClientOptions;
use crate::moderation::ModerationClient;
use crate::notifications::NotificationsClient;
use crate::pricing::PricingClient;
use crate::quotes::QuotesClient;
use crate::scheduling::SchedulingClient;

/// The main entry point for the MoveMate Rust client
pub struct MoveMate {
    /// The base URL of the marketplace API
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Session store owning the persisted credential pair
    pub session: Arc<SessionStore>,
    /// Client options
    pub options: ClientOptions,
}

impl MoveMate {
    /// Create a new MoveMate client with default options and an in-memory
    /// credential store.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use movemate_rust::MoveMate;
    ///
    /// let client = MoveMate::new("https://api.movemate.example");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new MoveMate client with custom options.
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        Self::new_with_credential_store(url, options, Arc::new(MemoryCredentialStore::new()))
    }

    /// Create a client persisting its credential pair in the given store.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use movemate_rust::auth::FileCredentialStore;
    /// use movemate_rust::config::ClientOptions;
    /// use movemate_rust::MoveMate;
    ///
    /// let store = Arc::new(FileCredentialStore::new("credentials.json"));
    /// let client = MoveMate::new_with_credential_store(
    ///     "https://api.movemate.example",
    ///     ClientOptions::default(),
    ///     store,
    /// );
    /// ```
    pub fn new_with_credential_store(
        url: &str,
        options: ClientOptions,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        // Same failure mode as reqwest::Client::new(): only unbuildable
        // when the TLS backend cannot initialize.
        let http_client = builder.build().expect("failed to build HTTP client");

        let url = url.trim_end_matches('/').to_string();
        let session = Arc::new(
            SessionStore::new(AuthClient::new(&url, http_client.clone()), credentials)
                .with_google_client_id(options.google_client_id.clone()),
        );

        Self {
            url,
            http_client,
            session,
            options,
        }
    }

    /// The session store: single source of truth for "who is logged in".
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Client for mover pricing configuration.
    pub fn pricing(&self) -> PricingClient {
        PricingClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for the analytics endpoints.
    pub fn analytics(&self) -> AnalyticsClient {
        AnalyticsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for the admin catalog endpoints.
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for admin moderation of mover accounts.
    pub fn moderation(&self) -> ModerationClient {
        ModerationClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for the notification endpoints.
    pub fn notifications(&self) -> NotificationsClient {
        NotificationsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for bookings and the mover calendar.
    pub fn scheduling(&self) -> SchedulingClient {
        SchedulingClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for the quote endpoints.
    pub fn quotes(&self) -> QuotesClient {
        QuotesClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Client for the comparison endpoints.
    pub fn comparisons(&self) -> ComparisonsClient {
        ComparisonsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }
}
