use reqwest::Method;
use store::{AuthResponse, SessionStore, SignInData, SignUpData, StoreError};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Navigator;

impl<S: SessionStore, N: Navigator> ApiClient<S, N> {
    /// Register a new account. The returned token becomes the active session.
    pub async fn sign_up(&self, data: &SignUpData) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self.post("/sign-up", data).await?;
        self.remember(&auth, "/sign-up").await?;
        Ok(auth)
    }

    /// Log in with email and password. The returned token becomes the active
    /// session.
    pub async fn sign_in(&self, data: &SignInData) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self.post("/sign-in", data).await?;
        self.remember(&auth, "/sign-in").await?;
        Ok(auth)
    }

    /// Forget the local session. The backend keeps no session to end.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.session().clear().await
    }

    async fn remember(&self, auth: &AuthResponse, endpoint: &str) -> Result<(), ApiError> {
        self.session().save_auth(auth).await.map_err(|e| {
            let error = ApiError::Unexpected {
                method: Method::POST,
                url: self.url(endpoint),
                message: e.to_string(),
            };
            error.log();
            error
        })
    }
}
