//! Client configuration

use core::fmt;
use std::collections::HashSet;

/// Configuration bound to a login client for its lifetime
#[derive(Clone)]
pub struct ProviderConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URL the provider sends the user back to
    pub redirect_url: String,
    /// Account ids allowed to log in; empty means everyone
    pub allowed: HashSet<u64>,
    /// Account ids always denied, even when allow-listed
    pub blocked: HashSet<u64>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .field("allowed", &self.allowed)
            .field("blocked", &self.blocked)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration with empty allow and block lists
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            allowed: HashSet::new(),
            blocked: HashSet::new(),
        }
    }

    /// Set the allow list
    pub fn with_allowed(mut self, allowed: impl IntoIterator<Item = u64>) -> Self {
        self.allowed = allowed.into_iter().collect();
        self
    }

    /// Set the block list
    pub fn with_blocked(mut self, blocked: impl IntoIterator<Item = u64>) -> Self {
        self.blocked = blocked.into_iter().collect();
        self
    }
}

/// Raw configuration bundle consumed by the factory
///
/// Mirrors the shape the surrounding application publishes: a provider name
/// plus credential fields that may individually be absent. Loading and merging
/// the bundle from disk or environment is the caller's concern; this type just
/// deserializes from whatever source they use.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LoginSettings {
    /// Provider name: `github`, `gitlab`, or `bitbucket`
    #[serde(default)]
    pub provider: String,
    /// OAuth client ID
    pub id: Option<String>,
    /// OAuth client secret
    pub secret: Option<String>,
    /// Redirect URL
    pub redirect: Option<String>,
    /// Allowed account ids
    #[serde(default)]
    pub allowed: Vec<u64>,
    /// Blocked account ids
    #[serde(default)]
    pub blocked: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = ProviderConfig::new("id", "super-secret", "https://example.com/callback");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_builder_collects_sets() {
        let config = ProviderConfig::new("id", "secret", "url")
            .with_allowed([1, 2, 2])
            .with_blocked([3]);
        assert_eq!(config.allowed.len(), 2);
        assert!(config.blocked.contains(&3));
    }

    #[test]
    fn test_settings_deserialize_defaults() {
        let settings: LoginSettings = serde_json::from_str(
            r#"{"provider":"github","id":"a","secret":"b","redirect":"c"}"#,
        )
        .unwrap();
        assert_eq!(settings.provider, "github");
        assert!(settings.allowed.is_empty());
        assert!(settings.blocked.is_empty());
    }
}
