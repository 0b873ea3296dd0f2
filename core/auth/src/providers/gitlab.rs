//! GitLab identity provider
//!
//! GitLab's `/user` record carries the account email inline together with a
//! `confirmed_at` timestamp, so no second call is needed: the timestamp's
//! presence is what "verified" means here.

use async_trait::async_trait;
use forge_login_http::HttpClient;
use reqwest::header;

use crate::email::{select_verified_email, EmailCandidate};
use crate::error::{LoginError, LoginResult};
use crate::provider::Provider;
use crate::types::{Profile, Token};

/// GitLab identity provider
///
/// # Example
///
/// ```
/// use forge_login::providers::GitLab;
/// use forge_login::provider::Provider;
///
/// let provider = GitLab::new();
/// assert_eq!(provider.name(), "gitlab");
/// assert_eq!(provider.authorize_url(), "https://gitlab.com/oauth/authorize");
/// ```
#[derive(Debug, Clone)]
pub struct GitLab {
    authorize: String,
    token: String,
    api_base: String,
}

impl GitLab {
    /// Create a provider for gitlab.com
    pub fn new() -> Self {
        Self::self_managed("https://gitlab.com")
    }

    /// Create a provider for a self-managed GitLab instance
    ///
    /// `base` is the instance root, e.g. `https://gitlab.example.com`.
    pub fn self_managed(base: &str) -> Self {
        let base = base.trim_end_matches('/');

        Self {
            authorize: format!("{base}/oauth/authorize"),
            token: format!("{base}/oauth/token"),
            api_base: format!("{base}/api/v4"),
        }
    }
}

impl Default for GitLab {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct GitLabUser {
    id: u64,
    username: String,
    name: Option<String>,
    email: Option<String>,
    confirmed_at: Option<String>,
}

#[async_trait]
impl Provider for GitLab {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    fn authorize_url(&self) -> &str {
        &self.authorize
    }

    fn token_url(&self) -> &str {
        &self.token
    }

    async fn fetch_profile(&self, http: &HttpClient, token: &Token) -> LoginResult<Profile> {
        let response = http
            .inner()
            .get(format!("{}/user", self.api_base))
            .bearer_auth(&token.access)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoginError::token_rejected("the provided access token was not valid", e))?
            .error_for_status()
            .map_err(|e| {
                LoginError::token_rejected("the provided access token was not valid", e)
            })?;

        let user: GitLabUser = response
            .json()
            .await
            .map_err(|e| LoginError::token_rejected("malformed user record", e))?;

        Ok(Profile {
            id: user.id,
            username: user.username,
            display_name: user.name,
            email: user.email,
            email_verified: user.confirmed_at.is_some(),
        })
    }

    async fn fetch_email(
        &self,
        _http: &HttpClient,
        _token: &Token,
        profile: &Profile,
    ) -> LoginResult<String> {
        select_verified_email(profile.email.iter().map(|address| EmailCandidate {
            address: address.clone(),
            primary: true,
            verified: profile.email_verified,
        }))
    }
}
