//! Login error types

/// Coarse classification of login errors
///
/// Lets consumers map failures to responses without matching every variant:
/// `Csrf` and `Token` are request-level failures, `Email` and `Policy` are
/// account-level rejections, `Config` is a construction-time mistake that is
/// never worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginErrorKind {
    /// CSRF state verification failed
    Csrf,
    /// No usable access token could be obtained or the token was rejected
    Token,
    /// The account has no acceptable email address
    Email,
    /// The account was rejected by the allow/block policy
    Policy,
    /// The client was misconfigured
    Config,
}

/// Login-specific errors
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// CSRF state missing, wrong length, or mismatched
    #[error("we could not verify the request was genuine")]
    InvalidState,

    /// Token endpoint unreachable, response malformed or non-bearer, or the
    /// access token was rejected by the identity endpoint
    #[error("no usable access token: {reason}")]
    NoAccessToken {
        /// What went wrong
        reason: String,
        /// Underlying transport error, if one occurred
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The email listing call failed after the identity fetch succeeded
    #[error("unable to access the user's email addresses: {reason}")]
    EmailAccessDenied {
        /// What went wrong
        reason: String,
        /// Underlying transport error, if one occurred
        #[source]
        source: Option<reqwest::Error>,
    },

    /// No primary, verified email address on the account
    #[error("unable to find a verified primary email address")]
    NoVerifiedEmail,

    /// The only qualifying email is a provider-issued placeholder
    #[error("unable to use a no reply primary email address")]
    DisposableEmail,

    /// The account is absent from a non-empty allow list
    #[error("the user {0} is not on the allow list")]
    NotAllowed(u64),

    /// The account is on the block list
    #[error("the user {0} is on the block list")]
    Blocked(u64),

    /// The factory was asked for a provider it does not know
    #[error("unknown login provider: {0}")]
    UnknownProvider(String),

    /// A required configuration field was absent
    #[error("the login configuration is missing the `{0}` field")]
    MissingConfig(&'static str),
}

impl LoginError {
    /// Get the classification of this error
    pub fn kind(&self) -> LoginErrorKind {
        match self {
            LoginError::InvalidState => LoginErrorKind::Csrf,
            LoginError::NoAccessToken { .. } => LoginErrorKind::Token,
            LoginError::EmailAccessDenied { .. }
            | LoginError::NoVerifiedEmail
            | LoginError::DisposableEmail => LoginErrorKind::Email,
            LoginError::NotAllowed(_) | LoginError::Blocked(_) => LoginErrorKind::Policy,
            LoginError::UnknownProvider(_) | LoginError::MissingConfig(_) => LoginErrorKind::Config,
        }
    }

    pub(crate) fn token_rejected(reason: impl Into<String>, source: reqwest::Error) -> Self {
        LoginError::NoAccessToken {
            reason: reason.into(),
            source: Some(source),
        }
    }

    pub(crate) fn token_malformed(reason: impl Into<String>) -> Self {
        LoginError::NoAccessToken {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn email_access(reason: impl Into<String>, source: reqwest::Error) -> Self {
        LoginError::EmailAccessDenied {
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Result type for login operations
pub type LoginResult<T> = Result<T, LoginError>;
