//! MoveMate auth client for Rust
//!
//! This crate provides authentication for the MoveMate marketplace API:
//! typed wrappers over the `/auth/` endpoints, plus the session store that
//! owns the persisted access/refresh credential pair.

mod session;
mod store;
mod types;

pub use session::{InitOutcome, LogoutOutcome, Route, SessionState, SessionStore};
pub use store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};
pub use types::{MoverProfile, PhoneVerification, RegisterData, TokenPair, User, UserType};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

/// Error type
#[derive(Error, Debug)]
pub enum AuthError {
    /// Non-2xx response, carrying the server body untouched.
    #[error("API error: {detail} (Status: {status})")]
    ApiError {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing session")]
    MissingSession,

    #[error("Google sign-in is not configured")]
    GoogleUnavailable,
}

/// Result type
pub type Result<T> = std::result::Result<T, AuthError>;

const CLIENT_INFO: &str = concat!("movemate-rust/", env!("CARGO_PKG_VERSION"));

/// Typed client for the authentication endpoints.
///
/// Stateless: bearer credentials are passed in by the caller, normally the
/// [`SessionStore`]. Every method performs exactly one HTTP call.
#[derive(Clone)]
pub struct AuthClient {
    base_url: String,
    http_client: Client,
}

impl AuthClient {
    /// Create a new auth client against the given API base URL.
    pub fn new(base_url: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.base_url, path)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::expect_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(AuthError::ApiError { status, detail })
    }

    /// Exchange email and password for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let response = self
            .http_client
            .post(self.auth_url("/login/"))
            .header("X-Client-Info", CLIENT_INFO)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Exchange a Google-issued identity token for a token pair. The role
    /// hint is consumed by the backend only on first registration.
    pub async fn login_with_google(
        &self,
        id_token: &str,
        role_hint: Option<UserType>,
    ) -> Result<TokenPair> {
        let mut payload = json!({ "credential": id_token });
        if let Some(hint) = role_hint {
            payload["user_type"] = serde_json::to_value(hint)?;
        }

        let response = self
            .http_client
            .post(self.auth_url("/google/"))
            .header("X-Client-Info", CLIENT_INFO)
            .json(&payload)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Register a new account and receive its first token pair.
    pub async fn register(&self, data: &RegisterData) -> Result<TokenPair> {
        let response = self
            .http_client
            .post(self.auth_url("/register/"))
            .header("X-Client-Info", CLIENT_INFO)
            .json(data)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Exchange a refresh token for a fresh pair.
    pub async fn refresh_token(&self, refresh: &str) -> Result<TokenPair> {
        let response = self
            .http_client
            .post(self.auth_url("/token/refresh/"))
            .header("X-Client-Info", CLIENT_INFO)
            .json(&json!({ "refresh": refresh }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Invalidate the pair server-side. Success carries no payload.
    pub async fn logout(&self, access: &str, refresh: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("/logout/"))
            .header("Authorization", Self::bearer(access))
            .json(&json!({ "refresh": refresh }))
            .send()
            .await?;

        Self::expect_success(response).await?;
        Ok(())
    }

    /// Fetch the profile behind an access token.
    pub async fn get_profile(&self, access: &str) -> Result<User> {
        let response = self
            .http_client
            .get(self.auth_url("/profile/"))
            .header("Authorization", Self::bearer(access))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Partially update the profile.
    pub async fn update_profile(&self, access: &str, patch: &Value) -> Result<User> {
        let response = self
            .http_client
            .patch(self.auth_url("/profile/"))
            .header("Authorization", Self::bearer(access))
            .json(patch)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Change the account password.
    pub async fn change_password(
        &self,
        access: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("/password/change/"))
            .header("Authorization", Self::bearer(access))
            .json(&json!({
                "current_password": current_password,
                "new_password": new_password,
            }))
            .send()
            .await?;

        Self::expect_success(response).await?;
        Ok(())
    }

    /// Ask the backend to send a verification code to the given phone.
    pub async fn request_phone_verification(
        &self,
        access: &str,
        phone: &str,
    ) -> Result<PhoneVerification> {
        let response = self
            .http_client
            .post(self.auth_url("/phone/request/"))
            .header("Authorization", Self::bearer(access))
            .json(&json!({ "phone": phone }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Confirm a previously requested phone verification.
    pub async fn confirm_phone_verification(&self, access: &str, code: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("/phone/confirm/"))
            .header("Authorization", Self::bearer(access))
            .json(&json!({ "code": code }))
            .send()
            .await?;

        Self::expect_success(response).await?;
        Ok(())
    }

    /// Fetch the mover sub-profile.
    pub async fn get_mover_profile(&self, access: &str) -> Result<MoverProfile> {
        let response = self
            .http_client
            .get(self.auth_url("/mover-profile/"))
            .header("Authorization", Self::bearer(access))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Partially update the mover sub-profile.
    pub async fn update_mover_profile(&self, access: &str, patch: &Value) -> Result<MoverProfile> {
        let response = self
            .http_client
            .patch(self.auth_url("/mover-profile/"))
            .header("Authorization", Self::bearer(access))
            .json(patch)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the onboarding document. Step semantics are server-owned and
    /// passed through opaquely.
    pub async fn get_onboarding(&self, access: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(self.auth_url("/onboarding/"))
            .header("Authorization", Self::bearer(access))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Update the onboarding step. Opaque pass-through, like
    /// [`Self::get_onboarding`].
    pub async fn update_onboarding_step(&self, access: &str, step: &Value) -> Result<Value> {
        let response = self
            .http_client
            .patch(self.auth_url("/onboarding/"))
            .header("Authorization", Self::bearer(access))
            .json(step)
            .send()
            .await?;

        Self::decode(response).await
    }
}
