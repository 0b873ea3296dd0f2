//! Bitbucket identity provider
//!
//! Bitbucket keys accounts by UUID; the id is folded to a `u64` before the
//! policy gate sees it. Email addresses come from a paginated listing with
//! `is_primary`/`is_confirmed` flags.

use async_trait::async_trait;
use forge_login_http::HttpClient;
use reqwest::header;

use crate::email::{select_verified_email, EmailCandidate};
use crate::error::{LoginError, LoginResult};
use crate::provider::Provider;
use crate::types::{Profile, Token};
use crate::uuid::account_id_from_uuid;

/// Bitbucket identity provider
///
/// # Example
///
/// ```
/// use forge_login::providers::Bitbucket;
/// use forge_login::provider::Provider;
///
/// let provider = Bitbucket::new();
/// assert_eq!(provider.name(), "bitbucket");
/// assert_eq!(provider.authorize_url(), "https://bitbucket.org/site/oauth2/authorize");
/// ```
#[derive(Debug, Clone)]
pub struct Bitbucket {
    authorize: String,
    token: String,
    api_base: String,
}

impl Bitbucket {
    /// Create a provider for bitbucket.org
    pub fn new() -> Self {
        Self {
            authorize: "https://bitbucket.org/site/oauth2/authorize".to_owned(),
            token: "https://bitbucket.org/site/oauth2/access_token".to_owned(),
            api_base: "https://api.bitbucket.org".to_owned(),
        }
    }
}

impl Default for Bitbucket {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct BitbucketUser {
    uuid: String,
    username: String,
    display_name: Option<String>,
}

#[derive(serde::Deserialize)]
struct BitbucketEmail {
    email: String,
    is_primary: bool,
    is_confirmed: bool,
}

#[derive(serde::Deserialize)]
struct BitbucketEmailPage {
    values: Vec<BitbucketEmail>,
}

#[async_trait]
impl Provider for Bitbucket {
    fn name(&self) -> &'static str {
        "bitbucket"
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
            .get(format!("{}/2.0/user", self.api_base))
            .bearer_auth(&token.access)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoginError::token_rejected("the provided access token was not valid", e))?
            .error_for_status()
            .map_err(|e| {
                LoginError::token_rejected("the provided access token was not valid", e)
            })?;

        let user: BitbucketUser = response
            .json()
            .await
            .map_err(|e| LoginError::token_rejected("malformed user record", e))?;

        let id = account_id_from_uuid(&user.uuid)
            .map_err(|_| LoginError::token_malformed("malformed account uuid"))?;

        Ok(Profile {
            id,
            username: user.username,
            display_name: user.display_name,
            email: None,
            email_verified: false,
        })
    }

    async fn fetch_email(
        &self,
        http: &HttpClient,
        token: &Token,
        _profile: &Profile,
    ) -> LoginResult<String> {
        let response = http
            .inner()
            .get(format!("{}/2.0/user/emails?pagelen=100", self.api_base))
            .bearer_auth(&token.access)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoginError::email_access("email listing request failed", e))?
            .error_for_status()
            .map_err(|e| LoginError::email_access("email listing was refused", e))?;

        let page: BitbucketEmailPage = response
            .json()
            .await
            .map_err(|e| LoginError::email_access("malformed email listing", e))?;

        select_verified_email(page.values.into_iter().map(|e| EmailCandidate {
            address: e.email,
            primary: e.is_primary,
            verified: e.is_confirmed,
        }))
    }
}
