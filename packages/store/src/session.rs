//! # Session — the client-side credential context
//!
//! The token and profile the backend hands out on sign-in are kept in a small
//! key/value store. [`SessionStore`] abstracts that store so the same logic
//! works against process memory ([`crate::MemoryStore`]) and the filesystem
//! ([`crate::FileStore`]). [`Session`] layers typed accessors over the
//! well-known keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] | Bearer token sent with every request |
//! | [`USER_ROLE_KEY`] | Role reported by the backend, or the email when none was sent |
//! | [`USER_NAME_KEY`] | Display name |
//! | [`USER_KEY`] | The whole [`AuthResponse`] as JSON |

use std::future::Future;

use crate::error::StoreError;
use crate::models::AuthResponse;

pub const TOKEN_KEY: &str = "token";
pub const USER_ROLE_KEY: &str = "userRole";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_KEY: &str = "user";

const ALL_KEYS: [&str; 4] = [TOKEN_KEY, USER_ROLE_KEY, USER_NAME_KEY, USER_KEY];

/// Async key/value storage behind a [`Session`].
pub trait SessionStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Typed view over the session keys of a [`SessionStore`].
#[derive(Clone, Debug, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current bearer token, without surrounding whitespace. An empty stored
    /// value counts as absent.
    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()))
    }

    /// Persist a successful sign-in or sign-up.
    pub async fn save_auth(&self, auth: &AuthResponse) -> Result<(), StoreError> {
        let role = auth.role.as_deref().unwrap_or(&auth.email);
        let user = serde_json::to_string(auth)?;

        self.store.set(TOKEN_KEY, &auth.token).await?;
        self.store.set(USER_ROLE_KEY, role).await?;
        self.store.set(USER_NAME_KEY, &auth.name).await?;
        self.store.set(USER_KEY, &user).await?;

        tracing::debug!(user_id = %auth.id, "session saved");
        Ok(())
    }

    /// The stored auth response, if any.
    pub async fn user(&self) -> Result<Option<AuthResponse>, StoreError> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn user_name(&self) -> Result<Option<String>, StoreError> {
        self.store.get(USER_NAME_KEY).await
    }

    pub async fn user_role(&self) -> Result<Option<String>, StoreError> {
        self.store.get(USER_ROLE_KEY).await
    }

    /// Drop only the token, leaving the cached profile in place.
    pub async fn clear_token(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY).await
    }

    /// Drop every session key.
    pub async fn clear(&self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.store.remove(key).await?;
        }
        tracing::debug!("session cleared");
        Ok(())
    }
}
