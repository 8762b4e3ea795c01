//! Credential persistence for the session store

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::types::TokenPair;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Durable home for the credential pair.
///
/// The two keys are written together and cleared together. A load that
/// finds only one of them reports the pair as absent; recovery treats any
/// partial state as logged out.
pub trait CredentialStore: Send + Sync {
    /// Load the persisted pair, if both keys are present.
    fn load(&self) -> Option<TokenPair>;

    /// Persist a new pair, replacing any previous one.
    fn store(&self, pair: &TokenPair);

    /// Remove both keys.
    fn clear(&self);
}

/// In-memory store with the lifetime of the running client.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    pair: Mutex<Option<TokenPair>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<TokenPair> {
        self.pair.lock().unwrap().clone()
    }

    fn store(&self, pair: &TokenPair) {
        *self.pair.lock().unwrap() = Some(pair.clone());
    }

    fn clear(&self) {
        *self.pair.lock().unwrap() = None;
    }
}

/// File-backed store: a single JSON document holding the two fixed keys.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<TokenPair> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let doc: Value = serde_json::from_str(&raw).ok()?;
        let access = doc.get(ACCESS_TOKEN_KEY)?.as_str()?;
        let refresh = doc.get(REFRESH_TOKEN_KEY)?.as_str()?;
        Some(TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        })
    }

    fn store(&self, pair: &TokenPair) {
        let mut doc = serde_json::Map::new();
        doc.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(pair.access.clone()));
        doc.insert(REFRESH_TOKEN_KEY.to_string(), Value::String(pair.refresh.clone()));

        if let Err(err) = fs::write(&self.path, Value::Object(doc).to_string()) {
            log::warn!(
                "failed to persist credentials to {}: {}",
                self.path.display(),
                err
            );
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => log::warn!(
                "failed to clear credentials at {}: {}",
                self.path.display(),
                err
            ),
        }
    }
}
