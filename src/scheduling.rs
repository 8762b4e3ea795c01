//! Booking and calendar endpoints

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::SessionStore;
use crate::error::Result;
use crate::fetch::Fetch;

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

/// Booking record.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer: Option<String>,
    pub mover: Option<String>,
    pub scheduled_date: String,
    pub status: BookingStatus,
    pub address_from: Option<String>,
    pub address_to: Option<String>,
    pub notes: Option<String>,
}

/// Payload for creating a booking from an accepted quote.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub quote: i64,
    pub scheduled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a booking.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One day of the mover's calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    pub bookings: i64,
}

/// Client for bookings and the mover calendar.
pub struct SchedulingClient {
    base_url: String,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl SchedulingClient {
    pub(crate) fn new(base_url: &str, http_client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/bookings{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.session.access_token()
    }

    /// List bookings visible to the current account.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        Fetch::get(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .execute_list()
            .await
    }

    /// Fetch one booking.
    pub async fn get_booking(&self, id: i64) -> Result<Booking> {
        Fetch::get(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .execute()
            .await
    }

    /// Create a booking.
    pub async fn create_booking(&self, data: &NewBooking) -> Result<Booking> {
        Fetch::post(&self.http_client, &self.url("/"))
            .maybe_bearer(self.bearer())
            .json(data)?
            .execute()
            .await
    }

    /// Partially update a booking.
    pub async fn update_booking(&self, id: i64, patch: &BookingUpdate) -> Result<Booking> {
        Fetch::patch(&self.http_client, &self.url(&format!("/{}/", id)))
            .maybe_bearer(self.bearer())
            .json(patch)?
            .execute()
            .await
    }

    /// Fetch the per-day booking counts for one month.
    pub async fn calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
        let mut params = HashMap::new();
        params.insert("year".to_string(), year.to_string());
        params.insert("month".to_string(), month.to_string());

        Fetch::get(&self.http_client, &self.url("/calendar/"))
            .maybe_bearer(self.bearer())
            .query(params)
            .execute_list()
            .await
    }
}
