//! GitHub identity provider
//!
//! Uses the REST v3 media type and presents the access token as a bearer
//! header. A separate `/user/emails` call locates the verified primary
//! address; accounts that enabled email privacy get a `noreply` placeholder
//! there, which is rejected.

use async_trait::async_trait;
use forge_login_http::HttpClient;
use reqwest::header;

use crate::email::{select_verified_email, EmailCandidate};
use crate::error::{LoginError, LoginResult};
use crate::provider::Provider;
use crate::types::{Profile, Token};

const ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub identity provider
///
/// # Example
///
/// ```
/// use forge_login::providers::GitHub;
/// use forge_login::provider::Provider;
///
/// let provider = GitHub::new();
/// assert_eq!(provider.name(), "github");
/// assert_eq!(provider.authorize_url(), "https://github.com/login/oauth/authorize");
/// ```
#[derive(Debug, Clone)]
pub struct GitHub {
    authorize: String,
    token: String,
    api_base: String,
}

impl GitHub {
    /// Create a provider for github.com
    pub fn new() -> Self {
        Self {
            authorize: "https://github.com/login/oauth/authorize".to_owned(),
            token: "https://github.com/login/oauth/access_token".to_owned(),
            api_base: "https://api.github.com".to_owned(),
        }
    }

    /// Create a provider for a GitHub Enterprise Server instance
    ///
    /// `base` is the instance root, e.g. `https://github.example.com`. The
    /// REST API of an Enterprise instance lives under `/api/v3`.
    pub fn enterprise(base: &str) -> Self {
        let base = base.trim_end_matches('/');

        Self {
            authorize: format!("{base}/login/oauth/authorize"),
            token: format!("{base}/login/oauth/access_token"),
            api_base: format!("{base}/api/v3"),
        }
    }
}

impl Default for GitHub {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct GitHubUser {
    id: u64,
    login: String,
    name: Option<String>,
}

#[derive(serde::Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

#[async_trait]
impl Provider for GitHub {
    fn name(&self) -> &'static str {
        "github"
    }

    fn authorize_url(&self) -> &str {
        &self.authorize
    }

    fn token_url(&self) -> &str {
        &self.token
    }

    fn scope_separator(&self) -> &'static str {
        // GitHub accepts both separators; comma kept for compatibility with
        // existing deployments
        ","
    }

    async fn fetch_profile(&self, http: &HttpClient, token: &Token) -> LoginResult<Profile> {
        let response = http
            .inner()
            .get(format!("{}/user", self.api_base))
            .bearer_auth(&token.access)
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|e| LoginError::token_rejected("the provided access token was not valid", e))?
            .error_for_status()
            .map_err(|e| {
                LoginError::token_rejected("the provided access token was not valid", e)
            })?;

        let user: GitHubUser = response
            .json()
            .await
            .map_err(|e| LoginError::token_rejected("malformed user record", e))?;

        Ok(Profile {
            id: user.id,
            username: user.login,
            display_name: user.name,
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
            .get(format!("{}/user/emails", self.api_base))
            .bearer_auth(&token.access)
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|e| LoginError::email_access("email listing request failed", e))?
            .error_for_status()
            .map_err(|e| LoginError::email_access("email listing was refused", e))?;

        let emails: Vec<GitHubEmail> = response
            .json()
            .await
            .map_err(|e| LoginError::email_access("malformed email listing", e))?;

        select_verified_email(emails.into_iter().map(|e| EmailCandidate {
            address: e.email,
            primary: e.primary,
            verified: e.verified,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GitHub {
        GitHub {
            authorize: "https://github.com/login/oauth/authorize".to_owned(),
            token: format!("{}/login/oauth/access_token", server.uri()),
            api_base: server.uri(),
        }
    }

    #[test]
    fn test_github_urls() {
        let provider = GitHub::new();

        assert_eq!(provider.name(), "github");
        assert_eq!(
            provider.authorize_url(),
            "https://github.com/login/oauth/authorize"
        );
        assert_eq!(
            provider.token_url(),
            "https://github.com/login/oauth/access_token"
        );
        assert_eq!(provider.scope_separator(), ",");
    }

    #[test]
    fn test_enterprise_urls() {
        let provider = GitHub::enterprise("https://github.example.com/");

        assert_eq!(
            provider.authorize_url(),
            "https://github.example.com/login/oauth/authorize"
        );
        assert_eq!(
            provider.token_url(),
            "https://github.example.com/login/oauth/access_token"
        );
        assert_eq!(provider.api_base, "https://github.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_fetch_profile_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer gho_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12345,
                "login": "octocat",
                "name": "The Octocat"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = provider_for(&server)
            .fetch_profile(&HttpClient::new(), &Token::new("gho_token"))
            .await
            .unwrap();

        assert_eq!(profile.id, 12345);
        assert_eq!(profile.username, "octocat");
        assert_eq!(profile.display_name.as_deref(), Some("The Octocat"));
        assert!(profile.email.is_none());
    }

    #[tokio::test]
    async fn test_fetch_profile_rejected_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .fetch_profile(&HttpClient::new(), &Token::new("bad"))
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::NoAccessToken { .. }));
    }

    #[tokio::test]
    async fn test_fetch_email_selects_primary_verified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "spare@example.com", "primary": false, "verified": true},
                {"email": "octocat@example.com", "primary": true, "verified": true}
            ])))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let profile = Profile {
            id: 1,
            username: "octocat".to_owned(),
            display_name: None,
            email: None,
            email_verified: false,
        };
        let email = provider
            .fetch_email(&HttpClient::new(), &Token::new("t"), &profile)
            .await
            .unwrap();

        assert_eq!(email, "octocat@example.com");
    }

    #[tokio::test]
    async fn test_fetch_email_listing_refused() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let profile = Profile {
            id: 1,
            username: "octocat".to_owned(),
            display_name: None,
            email: None,
            email_verified: false,
        };
        let err = provider
            .fetch_email(&HttpClient::new(), &Token::new("t"), &profile)
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::EmailAccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_fetch_email_noreply_placeholder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "12345+octocat@users.noreply.github.com", "primary": true, "verified": true}
            ])))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let profile = Profile {
            id: 1,
            username: "octocat".to_owned(),
            display_name: None,
            email: None,
            email_verified: false,
        };
        let err = provider
            .fetch_email(&HttpClient::new(), &Token::new("t"), &profile)
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::DisposableEmail));
    }
}
