//! Quote endpoints

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Offered,
    Accepted,
    Declined,
    Expired,
}

/// Quote record.
#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub customer: Option<String>,
    pub mover: Option<String>,
    pub status: QuoteStatus,
    pub total: Option<f64>,
    pub move_date: Option<String>,
    pub created_at: Option<String>,
}

/// One line of a quote request.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteItem {
    pub item_type: i64,
    pub quantity: u32,
}

/// Payload for requesting a quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub move_date: NaiveDate,
    pub address_from: String,
    pub address_to: String,
    pub items: Vec<QuoteItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Client for the quote endpoints.
pub struct QuotesClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl QuotesClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/quotes{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// List quotes visible to the current account.
    pub async fn list(&self) -> Result<Vec<Quote>> {
        Fetch::get(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Fetch one quote.
    pub async fn get(&self, id: i64) -> Result<Quote> {
        Fetch::get(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Request a new quote.
    pub async fn request_quote(&self, data: &QuoteRequest) -> Result<Quote> {
        Fetch::post(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .json(data)?
            .execute()
            .await
    }

    /// Update a quote's status (accept, decline, ...).
    pub async fn update_status(&self, id: i64, status: QuoteStatus) -> Result<Quote> {
        Fetch::patch(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .json(&json!({ "status": status }))?
            .execute()
            .await
    }
}
