//! Token and identity value objects

/// Access token material returned by a provider's token endpoint
///
/// Immutable once constructed; the core never persists it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Token {
    /// Access token for API requests
    pub access: String,
    /// Refresh token for obtaining new access tokens (not returned by all providers)
    pub refresh: Option<String>,
    /// Access token lifetime in seconds
    pub expires_in: Option<u64>,
}

impl Token {
    /// Create a token with just an access token
    pub fn new(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
            expires_in: None,
        }
    }

    /// Returns true if a refresh token is available
    pub fn has_refresh_token(&self) -> bool {
        self.refresh.is_some()
    }
}

/// Normalized identity of an authenticated account
///
/// Built only after the policy gate has passed and a verified, primary,
/// non-placeholder email address was found.
#[derive(Debug, Clone)]
pub struct User {
    /// Provider-assigned numeric account id
    pub id: u64,
    /// The token the identity was fetched with
    pub token: Token,
    /// Verified primary email address, returned exactly as the provider sent it
    pub email: String,
    /// Account username (login handle)
    pub username: String,
    /// Display name, when the account has one
    pub display_name: Option<String>,
}

/// Raw account details extracted from a provider's current-user endpoint
///
/// The email fields are only populated by providers whose user record carries
/// the address inline (GitLab); the others resolve it with a second call.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Numeric account id (converted from a UUID for Bitbucket)
    pub id: u64,
    /// Account username
    pub username: String,
    /// Display name, when present
    pub display_name: Option<String>,
    /// Inline email address, when the user record carries one
    pub email: Option<String>,
    /// Whether the inline address is confirmed
    pub email_verified: bool,
}

/// Token endpoint response (for deserialization)
#[derive(Debug, serde::Deserialize)]
pub struct TokenResponse {
    /// Access token
    pub access_token: Option<String>,
    /// Token type; must be exactly `bearer`
    pub token_type: Option<String>,
    /// Refresh token (not always returned)
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds
    pub expires_in: Option<u64>,
}

/// Error body a provider may return alongside a non-2xx status (for deserialization)
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProviderErrorResponse {
    /// Error code
    #[serde(default)]
    pub error: String,
    /// Error description
    #[serde(default)]
    pub error_description: Option<String>,
}
