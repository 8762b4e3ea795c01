//! Types for authentication and user management

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Role discriminant carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Mover,
    Admin,
}

/// Access/refresh token pair issued by the token endpoints.
///
/// Both tokens are opaque strings; the client never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Server-defined identity record.
///
/// Fields the client does not know about are retained in `extra` so a
/// shallow profile merge never drops server data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub user_type: UserType,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub phone_verified: Option<bool>,
    pub company_name: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Required by the backend when registering as a mover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Mover sub-profile attached to accounts with `user_type = mover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoverProfile {
    pub id: String,
    pub company_name: String,
    pub description: Option<String>,
    pub service_area: Option<String>,
    pub hourly_rate: Option<f64>,
    pub approved: Option<bool>,
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Acknowledgement of a phone-verification request.
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneVerification {
    pub phone: String,
    pub expires_at: Option<String>,
}
