//! Allow/block access policy

use crate::config::ProviderConfig;
use crate::error::{LoginError, LoginResult};

/// Check an account id against the configured allow and block lists
///
/// A non-empty allow list admits only its members; the block list is checked
/// afterwards, so an id that fails both gates reports [`LoginError::NotAllowed`].
pub fn validate_account(id: u64, config: &ProviderConfig) -> LoginResult<()> {
    if !config.allowed.is_empty() && !config.allowed.contains(&id) {
        return Err(LoginError::NotAllowed(id));
    }

    if config.blocked.contains(&id) {
        return Err(LoginError::Blocked(id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(allowed: &[u64], blocked: &[u64]) -> ProviderConfig {
        ProviderConfig::new("id", "secret", "url")
            .with_allowed(allowed.iter().copied())
            .with_blocked(blocked.iter().copied())
    }

    #[test]
    fn test_empty_lists_admit_everyone() {
        assert!(validate_account(42, &config(&[], &[])).is_ok());
    }

    #[test]
    fn test_not_on_allow_list() {
        let err = validate_account(3, &config(&[1, 2], &[])).unwrap_err();
        assert!(matches!(err, LoginError::NotAllowed(3)));
    }

    #[test]
    fn test_on_allow_list() {
        assert!(validate_account(2, &config(&[1, 2], &[])).is_ok());
    }

    #[test]
    fn test_blocked() {
        let err = validate_account(3, &config(&[], &[3])).unwrap_err();
        assert!(matches!(err, LoginError::Blocked(3)));
    }

    #[test]
    fn test_allow_list_checked_first() {
        // present on both lists: the allow gate passes, the block gate rejects
        let err = validate_account(3, &config(&[3], &[3])).unwrap_err();
        assert!(matches!(err, LoginError::Blocked(3)));
    }

    #[test]
    fn test_absent_from_allow_and_blocked_reports_not_allowed() {
        let err = validate_account(3, &config(&[1], &[3])).unwrap_err();
        assert!(matches!(err, LoginError::NotAllowed(3)));
    }
}
