//! Mover analytics endpoints

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Aggregation granularity for the revenue series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Dashboard summary.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    pub total_orders: Option<i64>,
    pub total_revenue: Option<f64>,
    pub active_bookings: Option<i64>,
    pub pending_quotes: Option<i64>,
    pub average_rating: Option<f64>,
}

/// One point of the revenue series.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenuePoint {
    pub period: String,
    pub revenue: f64,
    pub orders: Option<i64>,
}

/// Order statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStats {
    pub total: Option<i64>,
    pub completed: Option<i64>,
    pub cancelled: Option<i64>,
    pub in_progress: Option<i64>,
}

/// Customer statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerStats {
    pub total: Option<i64>,
    pub new_this_month: Option<i64>,
    pub returning: Option<i64>,
}

/// Popular item entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularItem {
    pub item_type: String,
    pub count: i64,
    pub revenue: Option<f64>,
}

/// Daily aggregate row.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyAggregate {
    pub date: String,
    pub orders: i64,
    pub revenue: f64,
}

/// Monthly aggregate row.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub orders: i64,
    pub revenue: f64,
}

/// Totals of one compared period.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodTotals {
    pub orders: i64,
    pub revenue: f64,
}

/// Result of a period comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodComparison {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub change_percent: Option<f64>,
}

/// Date ranges for a period comparison.
#[derive(Debug, Clone)]
pub struct ComparePeriods {
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub previous_start: NaiveDate,
    pub previous_end: NaiveDate,
}

/// Widget feed for the quick-stats panel.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickStats {
    pub orders_today: Option<i64>,
    pub revenue_today: Option<f64>,
    pub unread_notifications: Option<i64>,
}

/// Client for the analytics endpoints.
pub struct AnalyticsClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl AnalyticsClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/analytics{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// Fetch the dashboard summary.
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        Fetch::get(&self.http_client, &self.url("/dashboard/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Fetch the revenue series at the given granularity.
    pub async fn revenue_series(&self, granularity: Granularity) -> Result<Vec<RevenuePoint>> {
        let mut params = HashMap::new();
        params.insert("granularity".to_string(), granularity.as_str().to_string());

        Fetch::get(&self.http_client, &self.url("/revenue/"))
            .maybe_bearer(self.bearer())
            .query(params)
            .execute_list()
            .await
    }

    /// Fetch order statistics.
    pub async fn order_stats(&self) -> Result<OrderStats> {
        Fetch::get(&self.http_client, &self.url("/orders/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Fetch customer statistics.
    pub async fn customer_stats(&self) -> Result<CustomerStats> {
        Fetch::get(&self.http_client, &self.url("/customers/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// List the most requested item types.
    pub async fn popular_items(&self) -> Result<Vec<PopularItem>> {
        Fetch::get(&self.http_client, &self.url("/popular-items/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// List daily aggregates.
    pub async fn daily_aggregates(&self) -> Result<Vec<DailyAggregate>> {
        Fetch::get(&self.http_client, &self.url("/aggregates/daily/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// List monthly aggregates.
    pub async fn monthly_aggregates(&self) -> Result<Vec<MonthlyAggregate>> {
        Fetch::get(&self.http_client, &self.url("/aggregates/monthly/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Trigger re-aggregation of one month and return the refreshed row.
    pub async fn recalculate_monthly(&self, year: i32, month: u32) -> Result<MonthlyAggregate> {
        Fetch::post(
            &self.http_client,
            &self.url("/aggregates/monthly/recalculate/"),
        )
        .maybe_bearer(self.bearer())
        .json(&json!({ "year": year, "month": month }))?
        .execute()
        .await
    }

    /// Compare two date ranges.
    pub async fn compare_periods(&self, periods: &ComparePeriods) -> Result<PeriodComparison> {
        let mut params = HashMap::new();
        params.insert(
            "current_start".to_string(),
            periods.current_start.to_string(),
        );
        params.insert("current_end".to_string(), periods.current_end.to_string());
        params.insert(
            "previous_start".to_string(),
            periods.previous_start.to_string(),
        );
        params.insert(
            "previous_end".to_string(),
            periods.previous_end.to_string(),
        );

        Fetch::get(&self.http_client, &self.url("/compare/"))
            .maybe_bearer(self.bearer())
            .query(params)
            .execute()
            .await
    }

    /// Download the analytics export as a raw binary payload.
    pub async fn export(&self, format: ExportFormat) -> Result<Bytes> {
        let mut params = HashMap::new();
        params.insert("format".to_string(), format.as_str().to_string());

        Fetch::get(&self.http_client, &self.url("/export/"))
            .maybe_bearer(self.bearer())
            .query(params)
            .execute_bytes()
            .await
    }

    /// Fetch the quick-stats widget feed.
    pub async fn quick_stats(&self) -> Result<QuickStats> {
        Fetch::get(&self.http_client, &self.url("/quick-stats/"))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }
}
