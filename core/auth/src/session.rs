//! Session store contract
//!
//! The core keeps exactly one value in the session: the CSRF state, under
//! [`STATE_KEY`](crate::client::STATE_KEY). The store itself is caller-owned;
//! a cookie-backed web session, a server-side cache entry, and the in-memory
//! implementation below all satisfy the contract. Concurrent login attempts
//! must use distinct session instances.

use std::collections::HashMap;

/// Minimal session contract: get, put, and read-and-remove
pub trait SessionStore {
    /// Read a value without removing it
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, overwriting any prior one
    fn put(&mut self, key: &str, value: String);

    /// Read and remove a value in one step
    ///
    /// The client pulls the CSRF state exactly once per callback, which is
    /// what makes the state single-use.
    fn pull(&mut self, key: &str) -> Option<String>;
}

/// HashMap-backed session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn pull(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let mut session = MemorySessionStore::new();
        session.put("state", "abc".to_owned());
        assert_eq!(session.get("state").as_deref(), Some("abc"));
        // get does not consume
        assert_eq!(session.get("state").as_deref(), Some("abc"));
    }

    #[test]
    fn test_pull_removes() {
        let mut session = MemorySessionStore::new();
        session.put("state", "abc".to_owned());
        assert_eq!(session.pull("state").as_deref(), Some("abc"));
        assert_eq!(session.pull("state"), None);
        assert_eq!(session.get("state"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let mut session = MemorySessionStore::new();
        session.put("state", "old".to_owned());
        session.put("state", "new".to_owned());
        assert_eq!(session.pull("state").as_deref(), Some("new"));
    }
}
