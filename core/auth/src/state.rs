//! CSRF state generation and verification
//!
//! The state value binds an authorization redirect to the session that
//! initiated it. It is generated fresh for every redirect, stored in the
//! caller's session, and checked once on callback.

use rand::distr::Alphanumeric;
use rand::Rng;
use subtle::ConstantTimeEq;

/// Required length of a state value
pub const STATE_LENGTH: usize = 40;

/// Generate a new state value
///
/// 40 alphanumeric characters from the thread-local CSPRNG.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Check a stored state against the value the provider echoed back
///
/// The stored value must be exactly [`STATE_LENGTH`] characters. The length
/// gate rejects the degenerate case where an expired session yields an empty
/// string that would otherwise match an attacker-supplied empty `state`.
/// Comparison is constant-time.
pub fn verify_state(stored: &str, returned: &str) -> bool {
    stored.len() == STATE_LENGTH && bool::from(stored.as_bytes().ct_eq(returned.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_length() {
        assert_eq!(generate_state().len(), STATE_LENGTH);
    }

    #[test]
    fn test_state_alphanumeric() {
        let state = generate_state();
        assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_state_unique() {
        assert_ne!(generate_state(), generate_state());
    }

    #[test]
    fn test_verify_exact_match() {
        let state = generate_state();
        assert!(verify_state(&state, &state.clone()));
    }

    #[test]
    fn test_verify_rejects_mutation() {
        let state = generate_state();
        let mut mutated = state.clone().into_bytes();
        mutated[0] = if mutated[0] == b'a' { b'b' } else { b'a' };
        let mutated = String::from_utf8(mutated).unwrap();
        assert!(!verify_state(&state, &mutated));
    }

    #[test]
    fn test_verify_rejects_empty_against_empty() {
        assert!(!verify_state("", ""));
    }

    #[test]
    fn test_verify_rejects_wrong_stored_length() {
        let short = "a".repeat(39);
        assert!(!verify_state(&short, &short.clone()));
        let long = "a".repeat(41);
        assert!(!verify_state(&long, &long.clone()));
    }
}
