//! Admin mover-moderation endpoints

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Moderation status of a mover account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoverStatus {
    Pending,
    Approved,
    Rejected,
}

impl MoverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoverStatus::Pending => "pending",
            MoverStatus::Approved => "approved",
            MoverStatus::Rejected => "rejected",
        }
    }
}

/// Mover account as seen by the moderation queue.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeratedMover {
    pub id: String,
    pub company_name: String,
    pub email: Option<String>,
    pub status: Option<MoverStatus>,
    pub registered_at: Option<String>,
}

/// Client for admin moderation of mover accounts.
pub struct ModerationClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl ModerationClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/admin/movers{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// List movers, optionally filtered by moderation status.
    pub async fn list_movers(&self, status: Option<MoverStatus>) -> Result<Vec<ModeratedMover>> {
        let mut builder = Fetch::get(&self.http_client, &self.url("/")).maybe_bearer(self.bearer());
        if let Some(status) = status {
            let mut params = HashMap::new();
            params.insert("status".to_string(), status.as_str().to_string());
            builder = builder.query(params);
        }

        builder.execute_list().await
    }

    /// Fetch one mover.
    pub async fn get_mover(&self, id: &str) -> Result<ModeratedMover> {
        Fetch::get(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Approve a mover account.
    pub async fn approve_mover(&self, id: &str) -> Result<ModeratedMover> {
        Fetch::post(&self.http_client, &self.url(&format!("/{}/approve/", id)))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Reject a mover account, with an optional reason shown to the mover.
    pub async fn reject_mover(&self, id: &str, reason: Option<&str>) -> Result<ModeratedMover> {
        let mut builder = Fetch::post(&self.http_client, &self.url(&format!("/{}/reject/", id)))
            .maybe_bearer(self.bearer());
        if let Some(reason) = reason {
            builder = builder.json(&json!({ "reason": reason }))?;
        }

        builder.execute().await
    }
}
