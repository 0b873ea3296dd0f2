//! Login client
//!
//! Drives the full authorization-code flow: builds the redirect with a fresh
//! CSRF state, verifies the state on callback, exchanges the code for a
//! token, asks the bound provider for the identity, and applies the
//! allow/block policy before handing the identity back.

use std::sync::Arc;

use forge_login_http::HttpClient;
use reqwest::header;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::error::{LoginError, LoginResult};
use crate::provider::Provider;
use crate::session::SessionStore;
use crate::state::{generate_state, verify_state};
use crate::types::{ProviderErrorResponse, Token, TokenResponse, User};
use crate::validate::validate_account;

/// Session key the CSRF state lives under
pub const STATE_KEY: &str = "state";

/// A configured login client
///
/// Bound to one provider and one configuration for its lifetime. Holds no
/// per-attempt state of its own; everything short-lived goes through the
/// caller's session store.
pub struct LoginClient {
    provider: Arc<dyn Provider>,
    config: ProviderConfig,
    http: HttpClient,
}

impl std::fmt::Debug for LoginClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginClient")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

impl LoginClient {
    /// Create a client from its three collaborators
    pub fn new(provider: Arc<dyn Provider>, config: ProviderConfig, http: HttpClient) -> Self {
        Self {
            provider,
            config,
            http,
        }
    }

    /// The bound provider
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Build the URL to send the user to, storing a fresh CSRF state
    ///
    /// Overwrites any state a previous redirect left in the session. When
    /// `scopes` is present they are joined with the provider's separator and
    /// appended as a `scope` parameter.
    pub fn redirect(&self, session: &mut dyn SessionStore, scopes: Option<&[&str]>) -> String {
        let state = generate_state();
        session.put(STATE_KEY, state.clone());

        debug!(provider = self.provider.name(), "built authorization redirect");

        self.build_authorize_url(&state, scopes)
    }

    // Parameter order is fixed: some deployments validate the exact query
    // string, so encoding must be deterministic.
    fn build_authorize_url(&self, state: &str, scopes: Option<&[&str]>) -> String {
        let mut url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&state={}",
            self.provider.authorize_url(),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
            urlencoding::encode(state),
        );

        if let Some(scopes) = scopes {
            let joined = scopes.join(self.provider.scope_separator());
            url.push_str(&format!("&scope={}", urlencoding::encode(&joined)));
        }

        url
    }

    /// Complete a callback: verify the state, exchange the code, and return
    /// the validated identity
    ///
    /// The stored state is pulled (read and removed) exactly once, so a
    /// replayed callback fails [`LoginError::InvalidState`] even when the
    /// state value itself is correct.
    pub async fn login(
        &self,
        session: &mut dyn SessionStore,
        state: &str,
        code: &str,
    ) -> LoginResult<User> {
        let stored = session.pull(STATE_KEY).unwrap_or_default();

        if !verify_state(&stored, state) {
            warn!(
                provider = self.provider.name(),
                "state verification failed on callback"
            );
            return Err(LoginError::InvalidState);
        }

        let token = self.exchange_code(code).await?;
        self.identify(token).await
    }

    async fn identify(&self, token: Token) -> LoginResult<User> {
        let profile = self.provider.fetch_profile(&self.http, &token).await?;

        // policy runs between the identity fetch and the email resolution:
        // a rejected account never triggers the email call
        validate_account(profile.id, &self.config)?;

        let email = self
            .provider
            .fetch_email(&self.http, &token, &profile)
            .await?;

        debug!(
            provider = self.provider.name(),
            id = profile.id,
            "login complete"
        );

        Ok(User {
            id: profile.id,
            token,
            email,
            username: profile.username,
            display_name: profile.display_name,
        })
    }

    /// Exchange an authorization code for a token
    pub async fn exchange_code(&self, code: &str) -> LoginResult<Token> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ])
        .await
    }

    /// Obtain a fresh token from a refresh token
    pub async fn refresh_token(&self, refresh: &str) -> LoginResult<Token> {
        self.request_token(&[("grant_type", "refresh_token"), ("refresh_token", refresh)])
            .await
    }

    async fn request_token(&self, grant: &[(&str, &str)]) -> LoginResult<Token> {
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        params.extend_from_slice(grant);

        let response = self
            .http
            .inner()
            .post(self.provider.token_url())
            .header(header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                LoginError::token_rejected("we were unable to retrieve your access token", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error: ProviderErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            let detail = error
                .error_description
                .unwrap_or_else(|| error.error.clone());

            return Err(LoginError::token_malformed(format!(
                "token endpoint returned {status}: {detail}"
            )));
        }

        let data: TokenResponse = response
            .json()
            .await
            .map_err(|e| LoginError::token_rejected("malformed token response", e))?;

        // the token type check is case-sensitive: anything but a plain
        // `bearer` token is unusable for the identity calls that follow
        let access = match (data.access_token, data.token_type.as_deref()) {
            (Some(access), Some("bearer")) => access,
            _ => {
                return Err(LoginError::token_malformed(
                    "no bearer access token was provided",
                ))
            }
        };

        debug!(provider = self.provider.name(), "access token obtained");

        Ok(Token {
            access,
            refresh: data.refresh_token,
            expires_in: data.expires_in,
        })
    }
}
