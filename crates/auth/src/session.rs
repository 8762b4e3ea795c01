//! Session lifecycle for the marketplace client
//!
//! The session store is the single source of truth for "who is logged in".
//! It owns the persisted credential pair and the in-memory identity; no
//! other component reads or writes either directly.

use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::store::CredentialStore;
use crate::types::{RegisterData, TokenPair, User, UserType};
use crate::{AuthClient, AuthError, Result};

/// Lifecycle of the client-held identity.
///
/// `Loading` is entered once at construction and left once, when
/// [`SessionStore::initialize`] finishes. Login/logout cycle directly
/// between `Authenticated` and `Anonymous`.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Recovery of a persisted credential has not finished yet.
    Loading,
    /// A profile is held and requests carry its bearer credential.
    Authenticated(User),
    /// No identity is held.
    Anonymous,
}

/// Navigation target signalled by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AdminDashboard,
    MoverDashboard,
    CreateOrder,
    Login,
}

impl Route {
    /// Stable path string for the target.
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::AdminDashboard => "/admin/dashboard",
            Route::MoverDashboard => "/mover/dashboard",
            Route::CreateOrder => "/orders/create",
            Route::Login => "/login",
        }
    }

    /// Role-specific landing page after a successful sign-in.
    pub fn landing_for(user: &User) -> Self {
        match user.user_type {
            UserType::Admin => Route::AdminDashboard,
            UserType::Mover => Route::MoverDashboard,
            UserType::Customer => Route::CreateOrder,
        }
    }
}

/// Result of the one-time session recovery at startup.
#[derive(Debug)]
pub enum InitOutcome {
    /// A persisted pair was exchanged for a profile.
    Restored(User),
    /// No persisted pair was found.
    Anonymous,
    /// A persisted pair was found but could not be exchanged. Both keys
    /// were cleared and the session finished anonymous.
    Recovered(AuthError),
}

/// Result of [`SessionStore::logout`]. The local session is terminated in
/// every case.
#[derive(Debug)]
pub enum LogoutOutcome {
    /// The server acknowledged the logout.
    Acknowledged,
    /// The server call failed; the failure was logged and ignored.
    Recovered(AuthError),
}

/// Single source of truth for the authenticated identity.
///
/// Constructed once per running client and shared by reference. Concurrent
/// `initialize`/`login` calls are not guarded against each other: the last
/// writer wins. Callers that need sequencing must provide it themselves.
pub struct SessionStore {
    api: AuthClient,
    credentials: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
    google_client_id: Option<String>,
}

impl SessionStore {
    /// Create a store in the `Loading` state.
    pub fn new(api: AuthClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            credentials,
            state: RwLock::new(SessionState::Loading),
            google_client_id: None,
        }
    }

    /// Configure the Google sign-in client identifier. `None` leaves the
    /// feature unavailable rather than failing.
    pub fn with_google_client_id(mut self, client_id: Option<String>) -> Self {
        self.google_client_id = client_id;
        self
    }

    /// Snapshot of the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    /// The held identity, if any.
    pub fn current_user(&self) -> Option<User> {
        match &*self.state.read().unwrap() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// True iff an identity is held.
    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read().unwrap(), SessionState::Authenticated(_))
    }

    /// True until `initialize` has finished once.
    pub fn is_loading(&self) -> bool {
        matches!(&*self.state.read().unwrap(), SessionState::Loading)
    }

    /// The persisted access token, read by the shared transport.
    pub fn access_token(&self) -> Option<String> {
        self.credentials.load().map(|pair| pair.access)
    }

    /// Whether Google sign-in is configured.
    pub fn google_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }

    /// Browser authorize URL for the configured Google client, if any.
    pub fn google_sign_in_url(&self, redirect_to: &str) -> Option<String> {
        let client_id = self.google_client_id.as_deref()?;
        Some(format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=id_token&scope=openid%20email%20profile",
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_to),
        ))
    }

    /// One-shot recovery of a persisted session.
    ///
    /// If a persisted pair exists it is exchanged for a profile fetch; on
    /// any failure both keys are cleared and the session finishes
    /// anonymous. No retry. Leaves `Loading` exactly once regardless of
    /// outcome.
    pub async fn initialize(&self) -> InitOutcome {
        match self.credentials.load() {
            None => {
                self.set_state(SessionState::Anonymous);
                InitOutcome::Anonymous
            }
            Some(pair) => match self.api.get_profile(&pair.access).await {
                Ok(user) => {
                    self.set_state(SessionState::Authenticated(user.clone()));
                    InitOutcome::Restored(user)
                }
                Err(err) => {
                    log::warn!("stored credentials rejected, starting anonymous: {}", err);
                    self.credentials.clear();
                    self.set_state(SessionState::Anonymous);
                    InitOutcome::Recovered(err)
                }
            },
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the new pair is persisted, the profile is fetched and
    /// held, and the role-specific landing route is returned. On failure
    /// the error propagates and the previous session is left intact.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route> {
        let pair = self.api.login(email, password).await?;
        self.establish(pair).await
    }

    /// Sign in with a Google-issued identity token.
    ///
    /// The optional role hint is consumed by the backend only on first
    /// registration. Unavailable when no Google client id is configured.
    pub async fn login_with_google(
        &self,
        id_token: &str,
        role_hint: Option<UserType>,
    ) -> Result<Route> {
        if self.google_client_id.is_none() {
            return Err(AuthError::GoogleUnavailable);
        }
        let pair = self.api.login_with_google(id_token, role_hint).await?;
        self.establish(pair).await
    }

    /// Register a new account. Same success contract as [`Self::login`];
    /// server-side rejections propagate untouched.
    pub async fn register(&self, data: &RegisterData) -> Result<Route> {
        let pair = self.api.register(data).await?;
        self.establish(pair).await
    }

    // Persist the pair, then exchange it for a profile. A profile failure
    // after the pair is persisted leaves the previous in-memory identity
    // untouched; the next initialize repairs the stale pair.
    async fn establish(&self, pair: TokenPair) -> Result<Route> {
        self.credentials.store(&pair);
        let user = self.api.get_profile(&pair.access).await?;
        let route = Route::landing_for(&user);
        self.set_state(SessionState::Authenticated(user));
        Ok(route)
    }

    /// Terminate the session.
    ///
    /// The server is notified best-effort: a failed call is logged and
    /// reported as [`LogoutOutcome::Recovered`], never propagated. The
    /// persisted pair and the in-memory identity are cleared
    /// unconditionally, and the login route is returned.
    pub async fn logout(&self) -> (LogoutOutcome, Route) {
        let outcome = match self.credentials.load() {
            Some(pair) => match self.api.logout(&pair.access, &pair.refresh).await {
                Ok(()) => LogoutOutcome::Acknowledged,
                Err(err) => {
                    log::warn!("server-side logout failed, terminating locally: {}", err);
                    LogoutOutcome::Recovered(err)
                }
            },
            None => LogoutOutcome::Acknowledged,
        };

        self.credentials.clear();
        self.set_state(SessionState::Anonymous);
        (outcome, Route::Login)
    }

    /// Shallow-merge top-level fields into the held identity. Local only,
    /// no network call; used after profile edits to avoid a refetch.
    ///
    /// Returns the merged identity, or `None` while anonymous (no identity
    /// materializes) or when the patch does not fit the identity's shape.
    pub fn update_identity(&self, patch: Value) -> Option<User> {
        let mut guard = self.state.write().unwrap();

        let current = match &*guard {
            SessionState::Authenticated(user) => user.clone(),
            _ => return None,
        };

        let mut doc = match serde_json::to_value(&current) {
            Ok(Value::Object(map)) => map,
            _ => return None,
        };
        let Value::Object(patch) = patch else {
            return None;
        };
        for (key, value) in patch {
            doc.insert(key, value);
        }

        match serde_json::from_value::<User>(Value::Object(doc)) {
            Ok(merged) => {
                *guard = SessionState::Authenticated(merged.clone());
                Some(merged)
            }
            Err(err) => {
                log::debug!("identity patch did not merge cleanly: {}", err);
                None
            }
        }
    }

    /// Exchange the persisted refresh token for a fresh pair and persist
    /// it. Caller-driven; there is no automatic refresh loop.
    pub async fn refresh(&self) -> Result<TokenPair> {
        let pair = self.credentials.load().ok_or(AuthError::MissingSession)?;
        let renewed = self.api.refresh_token(&pair.refresh).await?;
        self.credentials.store(&renewed);
        Ok(renewed)
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write().unwrap() = next;
    }
}
