use std::sync::Arc;

use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use movemate_rust_auth::{
    AuthClient, AuthError, CredentialStore, FileCredentialStore, InitOutcome, LogoutOutcome,
    MemoryCredentialStore, RegisterData, Route, SessionStore, TokenPair, UserType,
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};

fn session_store(uri: &str, credentials: Arc<dyn CredentialStore>) -> SessionStore {
    SessionStore::new(AuthClient::new(uri, Client::new()), credentials)
}

fn mover_profile() -> serde_json::Value {
    json!({
        "id": "1",
        "email": "u@x.com",
        "user_type": "mover",
        "first_name": "Vera",
        "last_name": "Holt",
        "company_name": "Holt Moving Co",
        "rating": 4.8
    })
}

async fn mount_profile(server: &MockServer, access: &str, profile: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/auth/profile/"))
        .and(header("Authorization", format!("Bearer {}", access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_pair_and_routes_mover() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({ "email": "u@x.com", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A", "refresh": "R" })),
        )
        .mount(&mock_server)
        .await;
    mount_profile(&mock_server, "A", mover_profile()).await;

    let dir = tempfile::tempdir().unwrap();
    let credentials_path = dir.path().join("credentials.json");
    let store = session_store(
        &mock_server.uri(),
        Arc::new(FileCredentialStore::new(&credentials_path)),
    );
    store.initialize().await;

    let route = store.login("u@x.com", "pw").await.unwrap();

    assert_eq!(route, Route::MoverDashboard);
    assert!(store.is_authenticated());
    assert_eq!(store.current_user().unwrap().id, "1");
    assert_eq!(store.access_token().as_deref(), Some("A"));

    // The pair lands under the two fixed storage keys
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&credentials_path).unwrap()).unwrap();
    assert_eq!(doc[ACCESS_TOKEN_KEY], "A");
    assert_eq!(doc[REFRESH_TOKEN_KEY], "R");
}

#[tokio::test]
async fn login_failure_leaves_previous_session_intact() {
    let mock_server = MockServer::start().await;

    mount_profile(&mock_server, "OLD", mover_profile()).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&mock_server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::new());
    credentials.store(&TokenPair {
        access: "OLD".to_string(),
        refresh: "OLDR".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials.clone());

    assert!(matches!(store.initialize().await, InitOutcome::Restored(_)));

    let err = store.login("u@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::ApiError { status, .. } if status.as_u16() == 401));

    // No cleanup on failure: identity and pair both survive
    assert!(store.is_authenticated());
    assert_eq!(store.access_token().as_deref(), Some("OLD"));
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let mock_server = MockServer::start().await;

    mount_profile(&mock_server, "A", mover_profile()).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let credentials_path = dir.path().join("credentials.json");
    let credentials = Arc::new(FileCredentialStore::new(&credentials_path));
    credentials.store(&TokenPair {
        access: "A".to_string(),
        refresh: "R".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials);
    store.initialize().await;
    assert!(store.is_authenticated());

    let (outcome, route) = store.logout().await;

    assert!(matches!(outcome, LogoutOutcome::Recovered(_)));
    assert_eq!(route, Route::Login);
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
    assert!(store.access_token().is_none());
    assert!(!credentials_path.exists());
}

#[tokio::test]
async fn logout_acknowledged_on_success() {
    let mock_server = MockServer::start().await;

    mount_profile(&mock_server, "A", mover_profile()).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .and(header("Authorization", "Bearer A"))
        .and(body_json(json!({ "refresh": "R" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::new());
    credentials.store(&TokenPair {
        access: "A".to_string(),
        refresh: "R".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials);
    store.initialize().await;

    let (outcome, route) = store.logout().await;

    assert!(matches!(outcome, LogoutOutcome::Acknowledged));
    assert_eq!(route, Route::Login);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn initialize_without_credentials_is_anonymous() {
    let mock_server = MockServer::start().await;
    let store = session_store(
        &mock_server.uri(),
        Arc::new(MemoryCredentialStore::new()),
    );

    assert!(store.is_loading());
    let outcome = store.initialize().await;

    assert!(matches!(outcome, InitOutcome::Anonymous));
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn initialize_recovers_from_rejected_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Token expired" })),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let credentials_path = dir.path().join("credentials.json");
    let credentials = Arc::new(FileCredentialStore::new(&credentials_path));
    credentials.store(&TokenPair {
        access: "stale".to_string(),
        refresh: "staler".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials);

    let outcome = store.initialize().await;

    assert!(matches!(outcome, InitOutcome::Recovered(_)));
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
    assert!(!credentials_path.exists());
}

#[tokio::test]
async fn update_identity_merges_shallow() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, "A", mover_profile()).await;

    let credentials = Arc::new(MemoryCredentialStore::new());
    credentials.store(&TokenPair {
        access: "A".to_string(),
        refresh: "R".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials);
    store.initialize().await;

    let merged = store
        .update_identity(json!({ "first_name": "Maya" }))
        .unwrap();

    assert_eq!(merged.first_name.as_deref(), Some("Maya"));
    // Untouched fields survive the merge, including server-only ones
    assert_eq!(merged.email, "u@x.com");
    assert_eq!(merged.company_name.as_deref(), Some("Holt Moving Co"));
    assert_eq!(merged.extra["rating"], json!(4.8));
    assert_eq!(
        store.current_user().unwrap().first_name.as_deref(),
        Some("Maya")
    );
}

#[tokio::test]
async fn update_identity_is_noop_while_anonymous() {
    let mock_server = MockServer::start().await;
    let store = session_store(
        &mock_server.uri(),
        Arc::new(MemoryCredentialStore::new()),
    );
    store.initialize().await;

    assert!(store.update_identity(json!({ "first_name": "Maya" })).is_none());
    assert!(store.current_user().is_none());
}

#[tokio::test]
async fn register_rejection_propagates_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "company_name": ["This field is required."] })),
        )
        .mount(&mock_server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::new());
    let store = session_store(&mock_server.uri(), credentials.clone());
    store.initialize().await;

    let data = RegisterData {
        email: "m@x.com".to_string(),
        password: "pw".to_string(),
        user_type: UserType::Mover,
        first_name: "Vera".to_string(),
        last_name: "Holt".to_string(),
        phone: None,
        company_name: None,
    };
    let err = store.register(&data).await.unwrap_err();

    match err {
        AuthError::ApiError { status, detail } => {
            assert_eq!(status.as_u16(), 400);
            assert!(detail.contains("company_name"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
    assert!(!store.is_authenticated());
    assert!(credentials.load().is_none());
}

#[tokio::test]
async fn register_routes_customer_to_order_creation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "access": "A", "refresh": "R" })),
        )
        .mount(&mock_server)
        .await;
    mount_profile(
        &mock_server,
        "A",
        json!({ "id": "7", "email": "c@x.com", "user_type": "customer" }),
    )
    .await;

    let store = session_store(
        &mock_server.uri(),
        Arc::new(MemoryCredentialStore::new()),
    );
    store.initialize().await;

    let data = RegisterData {
        email: "c@x.com".to_string(),
        password: "pw".to_string(),
        user_type: UserType::Customer,
        first_name: "Iris".to_string(),
        last_name: "Chen".to_string(),
        phone: None,
        company_name: None,
    };
    let route = store.register(&data).await.unwrap();

    assert_eq!(route, Route::CreateOrder);
}

#[tokio::test]
async fn google_login_unavailable_without_client_id() {
    let mock_server = MockServer::start().await;
    let store = session_store(
        &mock_server.uri(),
        Arc::new(MemoryCredentialStore::new()),
    );
    store.initialize().await;

    assert!(!store.google_enabled());
    assert!(store.google_sign_in_url("https://app.example.com/callback").is_none());

    let err = store.login_with_google("tok", None).await.unwrap_err();
    assert!(matches!(err, AuthError::GoogleUnavailable));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn google_login_routes_admin_home() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/google/"))
        .and(body_json(json!({ "credential": "tok" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A", "refresh": "R" })),
        )
        .mount(&mock_server)
        .await;
    mount_profile(
        &mock_server,
        "A",
        json!({ "id": "9", "email": "a@x.com", "user_type": "admin" }),
    )
    .await;

    let store = session_store(
        &mock_server.uri(),
        Arc::new(MemoryCredentialStore::new()),
    )
    .with_google_client_id(Some("client-123".to_string()));
    store.initialize().await;

    assert!(store.google_enabled());
    let url = store
        .google_sign_in_url("https://app.example.com/callback")
        .unwrap();
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"));

    let route = store.login_with_google("tok", None).await.unwrap();
    assert_eq!(route, Route::AdminDashboard);
}

#[tokio::test]
async fn refresh_rotates_persisted_pair() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token/refresh/"))
        .and(body_json(json!({ "refresh": "R" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A2", "refresh": "R2" })),
        )
        .mount(&mock_server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::new());
    credentials.store(&TokenPair {
        access: "A".to_string(),
        refresh: "R".to_string(),
    });
    let store = session_store(&mock_server.uri(), credentials.clone());

    let renewed = store.refresh().await.unwrap();

    assert_eq!(renewed.access, "A2");
    assert_eq!(
        credentials.load(),
        Some(TokenPair {
            access: "A2".to_string(),
            refresh: "R2".to_string(),
        })
    );
}
