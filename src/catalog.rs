//! Admin catalog endpoints
//!
//! Item types, categories, attributes, and the moderation queue of
//! customer-suggested catalog entries.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Catalog-wide counters.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogStats {
    pub item_types: Option<i64>,
    pub categories: Option<i64>,
    pub attributes: Option<i64>,
    pub pending_suggestions: Option<i64>,
}

/// Catalog item type.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemType {
    pub id: i64,
    pub name: String,
    pub category: Option<i64>,
    pub default_price: Option<f64>,
    pub volume: Option<f64>,
    pub active: Option<bool>,
}

/// Payload for creating an item type.
#[derive(Debug, Clone, Serialize)]
pub struct NewItemType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Partial update for an item type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Catalog category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalog attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    pub value_type: Option<String>,
}

/// Customer-suggested catalog entry awaiting moderation.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSuggestion {
    pub id: i64,
    pub name: String,
    pub suggested_by: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// Client for the admin catalog endpoints.
pub struct CatalogClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl CatalogClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/admin{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// Fetch catalog-wide counters.
    pub async fn stats(&self) -> Result<CatalogStats> {
        Fetch::get(&self.http_client, &self.url("/catalog/stats/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// List item types.
    pub async fn list_item_types(&self) -> Result<Vec<ItemType>> {
        Fetch::get(&self.http_client, &self.url("/item-types/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Create an item type.
    pub async fn create_item_type(&self, data: &NewItemType) -> Result<ItemType> {
        Fetch::post(&self.http_client, &self.url("/item-types/"))
            .maybe_bearer(self.bearer())
            .json(data)?
            .execute()
            .await
    }

    /// Partially update an item type.
    pub async fn update_item_type(&self, id: i64, patch: &ItemTypeUpdate) -> Result<ItemType> {
        Fetch::patch(&self.http_client, &self.url(&format!("/item-types/{}/", id)))
            .maybe_bearer(self.bearer())
            .json(patch)?
            .execute()
            .await
    }

    /// Delete an item type.
    pub async fn delete_item_type(&self, id: i64) -> Result<()> {
        Fetch::delete(&self.http_client, &self.url(&format!("/item-types/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute_empty()
            .await
    }

    /// List categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        Fetch::get(&self.http_client, &self.url("/categories/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Create a category.
    pub async fn create_category(&self, data: &NewCategory) -> Result<Category> {
        Fetch::post(&self.http_client, &self.url("/categories/"))
            .maybe_bearer(self.bearer())
            .json(data)?
            .execute()
            .await
    }

    /// List attributes.
    pub async fn list_attributes(&self) -> Result<Vec<Attribute>> {
        Fetch::get(&self.http_client, &self.url("/attributes/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// List catalog suggestions.
    pub async fn list_suggestions(&self) -> Result<Vec<CatalogSuggestion>> {
        Fetch::get(&self.http_client, &self.url("/suggestions/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Approve a suggestion.
    pub async fn approve_suggestion(&self, id: i64) -> Result<CatalogSuggestion> {
        Fetch::post(
            &self.http_client,
            &self.url(&format!("/suggestions/{}/approve/", id)),
        )
        .maybe_bearer(self.bearer())
        .execute()
        .await
    }

    /// Reject a suggestion, with an optional reason shown to the author.
    pub async fn reject_suggestion(
        &self,
        id: i64,
        reason: Option<&str>,
    ) -> Result<CatalogSuggestion> {
        let mut builder = Fetch::post(
            &self.http_client,
            &self.url(&format!("/suggestions/{}/reject/", id)),
        )
        .maybe_bearer(self.bearer());
        if let Some(reason) = reason {
            builder = builder.json(&json!({ "reason": reason }))?;
        }

        builder.execute().await
    }
}
