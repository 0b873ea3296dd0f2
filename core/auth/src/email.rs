//! Email qualification
//!
//! Every provider resolves its candidate addresses differently, but the rule
//! for accepting one is the same everywhere and lives here.

use crate::error::{LoginError, LoginResult};

/// One candidate address as reported by a provider
#[derive(Debug, Clone)]
pub struct EmailCandidate {
    /// The address itself
    pub address: String,
    /// Marked as the account's primary address
    pub primary: bool,
    /// Verified (or confirmed) by the provider
    pub verified: bool,
}

/// Pick the account's contact address from its candidates
///
/// Accepts the first candidate that is primary, verified, and contains `@`.
/// A qualifying address containing the `noreply` marker is a provider-issued
/// privacy placeholder and is rejected outright rather than skipped.
pub fn select_verified_email<I>(candidates: I) -> LoginResult<String>
where
    I: IntoIterator<Item = EmailCandidate>,
{
    for candidate in candidates {
        if candidate.primary && candidate.verified && candidate.address.contains('@') {
            if candidate.address.contains("noreply") {
                return Err(LoginError::DisposableEmail);
            }

            return Ok(candidate.address);
        }
    }

    Err(LoginError::NoVerifiedEmail)
}
