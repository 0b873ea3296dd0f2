//! Provider abstraction
//!
//! One implementation per identity provider. A provider knows its endpoint
//! URLs and how to turn an access token into a [`Profile`] and a contact
//! email; the login client owns everything else (CSRF state, token exchange,
//! policy, assembly of the final [`User`](crate::types::User)).

use async_trait::async_trait;
use forge_login_http::HttpClient;

use crate::error::LoginResult;
use crate::types::{Profile, Token};

/// Contract for identity providers
///
/// Implementations are stateless and may be shared across clients of the same
/// provider type.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g., "github")
    fn name(&self) -> &'static str;

    /// Authorization endpoint URL
    fn authorize_url(&self) -> &str;

    /// Token endpoint URL
    fn token_url(&self) -> &str;

    /// Separator for joining requested scopes
    ///
    /// Stricter deployments validate the exact query string, so the separator
    /// must match what the provider documents.
    fn scope_separator(&self) -> &'static str {
        " "
    }

    /// Fetch the raw account details for the given token
    ///
    /// Fails with [`LoginError::NoAccessToken`](crate::error::LoginError) when
    /// the token is rejected or the response is unusable.
    async fn fetch_profile(&self, http: &HttpClient, token: &Token) -> LoginResult<Profile>;

    /// Resolve the account's contact email address
    ///
    /// Providers whose user record carries the address inline read it from
    /// `profile`; the others make a second authenticated call. A failing
    /// second call reports
    /// [`LoginError::EmailAccessDenied`](crate::error::LoginError), distinct
    /// from a rejected token.
    async fn fetch_email(
        &self,
        http: &HttpClient,
        token: &Token,
        profile: &Profile,
    ) -> LoginResult<String>;
}
