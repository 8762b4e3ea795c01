//! Mover pricing endpoints
//!
//! Pricing computation is entirely server-side; this client only reads and
//! patches the mover's configuration and lists the effective results.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Global pricing-factor settings: a single record per mover.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingFactors {
    pub id: i64,
    pub base_rate: Option<f64>,
    pub distance_rate: Option<f64>,
    pub weight_surcharge: Option<f64>,
    pub fragile_multiplier: Option<f64>,
    pub stairs_surcharge: Option<f64>,
    pub weekend_multiplier: Option<f64>,
    pub minimum_charge: Option<f64>,
}

/// Partial update for the pricing-factor settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PricingFactorsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_surcharge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragile_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stairs_surcharge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<f64>,
}

/// Item type with the mover's effective pricing overlaid.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemTypePricing {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub base_price: Option<f64>,
    pub effective_price: Option<f64>,
    pub overridden: Option<bool>,
}

/// Mover-specific price override.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceOverride {
    pub id: i64,
    pub item_type: i64,
    pub price: f64,
    pub active: Option<bool>,
}

/// Payload for creating a price override.
#[derive(Debug, Clone, Serialize)]
pub struct NewPriceOverride {
    pub item_type: i64,
    pub price: f64,
}

/// Partial update for a price override.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceOverrideUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Pricing category.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Client for mover pricing configuration.
pub struct PricingClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl PricingClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// Fetch the mover's global pricing-factor settings.
    pub async fn get_pricing_factors(&self) -> Result<PricingFactors> {
        Fetch::get(&self.http_client, &self.url("/movers/pricing-factors/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Partially update the pricing-factor settings.
    pub async fn update_pricing_factors(
        &self,
        patch: &PricingFactorsUpdate,
    ) -> Result<PricingFactors> {
        Fetch::patch(&self.http_client, &self.url("/movers/pricing-factors/"))
            .maybe_bearer(self.bearer())
            .json(patch)?
            .execute()
            .await
    }

    /// List item types with the mover's effective pricing overlaid.
    pub async fn list_item_types(&self) -> Result<Vec<ItemTypePricing>> {
        Fetch::get(&self.http_client, &self.url("/pricing/item-types/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// List the mover's price overrides.
    pub async fn list_price_overrides(&self) -> Result<Vec<PriceOverride>> {
        Fetch::get(&self.http_client, &self.url("/movers/pricing/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Create a price override.
    pub async fn create_price_override(&self, data: &NewPriceOverride) -> Result<PriceOverride> {
        Fetch::post(&self.http_client, &self.url("/movers/pricing/"))
            .maybe_bearer(self.bearer())
            .json(data)?
            .execute()
            .await
    }

    /// Partially update a price override.
    pub async fn update_price_override(
        &self,
        id: i64,
        patch: &PriceOverrideUpdate,
    ) -> Result<PriceOverride> {
        Fetch::patch(
            &self.http_client,
            &self.url(&format!("/movers/pricing/{}/", id)),
        )
        .maybe_bearer(self.bearer())
        .json(patch)?
        .execute()
        .await
    }

    /// Delete a price override.
    pub async fn delete_price_override(&self, id: i64) -> Result<()> {
        Fetch::delete(
            &self.http_client,
            &self.url(&format!("/movers/pricing/{}/", id)),
        )
        .maybe_bearer(self.bearer())
        .execute_empty()
        .await
    }

    /// List pricing categories.
    pub async fn list_categories(&self) -> Result<Vec<PricingCategory>> {
        Fetch::get(&self.http_client, &self.url("/pricing/categories/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }
}
