//! Notification endpoints

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Notification record.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub kind: Option<String>,
    pub read: bool,
    pub created_at: Option<String>,
}

/// Unread counter.
#[derive(Debug, Clone, Deserialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// Client for the notification endpoints.
pub struct NotificationsClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl NotificationsClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/notifications{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// List notifications, newest first.
    pub async fn list(&self) -> Result<Vec<Notification>> {
        Fetch::get(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Fetch the unread counter.
    pub async fn unread_count(&self) -> Result<UnreadCount> {
        Fetch::get(&self.http_client, &self.url("/unread-count/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: i64) -> Result<Notification> {
        Fetch::post(&self.http_client, &self.url(&format!("/{}/read/", id)))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Mark every notification as read.
    pub async fn mark_all_read(&self) -> Result<()> {
        Fetch::post(&self.http_client, &self.url("/read-all/"))
            .maybe_bearer(self.bearer())
            .execute_empty()
            .await
    }

    /// Delete a notification.
    pub async fn delete(&self, id: i64) -> Result<()> {
        Fetch::delete(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute_empty()
            .await
    }
}
