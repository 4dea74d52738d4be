//! Sign-in state that survives restarts.
//!
//! The session token is kept in the same preference store as the theme mode,
//! under the `token` key. The signed-in user is stored next to it as JSON
//! under the `user` key.

use storefront_theme::preference::{Preferences, USER_KEY};

use crate::api::ApiClient;
use crate::config::StorefrontConfig;
use crate::error::ServiceResult;
use crate::models::{Credentials, LoginResponse, User};

/// An [ApiClient] whose session token is persisted in [Preferences].
pub struct Session {
    client: ApiClient,
    preferences: Preferences,
    user: Option<User>,
}

impl Session {
    /// Create a session for `client`, restoring a persisted token and user.
    pub fn new(mut client: ApiClient, preferences: Preferences) -> Self {
        if let Some(token) = preferences.auth_token() {
            log::debug!("Restoring persisted session token");
            client.set_token(Some(token));
        }
        let user = preferences.value(USER_KEY).and_then(|json| {
            serde_json::from_str(&json)
                .map_err(|e| log::warn!("Ignoring persisted user: {}", e))
                .ok()
        });
        Self {
            client,
            preferences,
            user,
        }
    }

    /// Create a session for the configured backend.
    pub fn from_config(config: &StorefrontConfig, preferences: Preferences) -> ServiceResult<Self> {
        Ok(Self::new(ApiClient::new(&config.api_url)?, preferences))
    }

    /// The API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The preferences holding the token.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The signed-in user, restored from preferences after a restart.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a session token is present.
    pub fn is_authenticated(&self) -> bool {
        self.client.token().is_some()
    }

    /// Sign in and persist the session token.
    pub async fn login(&mut self, credentials: &Credentials) -> ServiceResult<LoginResponse> {
        let response = self.client.login(credentials).await?;
        if let Some(token) = &response.token {
            self.preferences.set_auth_token(token);
        }
        self.user = response.user.clone();
        match &self.user {
            Some(user) => match serde_json::to_string(user) {
                Ok(json) => self.preferences.set_value(USER_KEY, &json),
                Err(e) => log::warn!("Failed to persist signed-in user: {}", e),
            },
            None => self.preferences.remove_value(USER_KEY),
        }
        Ok(response)
    }

    /// Sign out. The local token and user are forgotten even if the backend call fails.
    pub async fn logout(&mut self) -> ServiceResult<()> {
        self.preferences.clear_auth_token();
        self.preferences.remove_value(USER_KEY);
        self.user = None;
        self.client.logout().await?;
        Ok(())
    }
}
