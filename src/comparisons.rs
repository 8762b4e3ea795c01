//! Mover comparison endpoints

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// One mover on the customer's comparison list.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonEntry {
    pub id: i64,
    pub mover: String,
    pub company_name: Option<String>,
    pub rating: Option<f64>,
    pub estimated_total: Option<f64>,
}

/// Client for the comparison endpoints.
pub struct ComparisonsClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl ComparisonsClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/comparisons{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// List the current comparison entries.
    pub async fn list(&self) -> Result<Vec<ComparisonEntry>> {
        Fetch::get(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Add a mover to the comparison list.
    pub async fn add(&self, mover_id: &str) -> Result<ComparisonEntry> {
        Fetch::post(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .json(&json!({ "mover": mover_id }))?
            .execute()
            .await
    }

    /// Remove an entry from the comparison list.
    pub async fn remove(&self, id: i64) -> Result<()> {
        Fetch::delete(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute_empty()
            .await
    }
}
