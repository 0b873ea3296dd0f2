//! Client construction from raw settings

use std::sync::Arc;

use forge_login_http::HttpClient;

use crate::client::LoginClient;
use crate::config::{LoginSettings, ProviderConfig};
use crate::error::{LoginError, LoginResult};
use crate::provider::Provider;
use crate::providers::{Bitbucket, GitHub, GitLab};

/// Builds configured login clients
///
/// Explicit construction, no ambient registry: hand it the raw settings and
/// an HTTP client, get back a ready [`LoginClient`] or a configuration error.
#[derive(Debug, Default)]
pub struct LoginFactory;

impl LoginFactory {
    /// Make a new login client for the named provider
    pub fn make(settings: &LoginSettings, http: HttpClient) -> LoginResult<LoginClient> {
        let provider = Self::provider(&settings.provider)?;
        let config = Self::config(settings)?;

        Ok(LoginClient::new(provider, config, http))
    }

    fn provider(name: &str) -> LoginResult<Arc<dyn Provider>> {
        match name {
            "github" => Ok(Arc::new(GitHub::new())),
            "gitlab" => Ok(Arc::new(GitLab::new())),
            "bitbucket" => Ok(Arc::new(Bitbucket::new())),
            other => Err(LoginError::UnknownProvider(other.to_owned())),
        }
    }

    fn config(settings: &LoginSettings) -> LoginResult<ProviderConfig> {
        let id = settings.id.as_deref().ok_or(LoginError::MissingConfig("id"))?;
        let secret = settings
            .secret
            .as_deref()
            .ok_or(LoginError::MissingConfig("secret"))?;
        let redirect = settings
            .redirect
            .as_deref()
            .ok_or(LoginError::MissingConfig("redirect"))?;

        Ok(ProviderConfig::new(id, secret, redirect)
            .with_allowed(settings.allowed.iter().copied())
            .with_blocked(settings.blocked.iter().copied()))
    }
}
