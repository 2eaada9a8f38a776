//! Cache key generation.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A deterministic digest of a logical request.
///
/// Built from the HTTP method, the endpoint path and the canonically ordered
/// query parameters, so identical requests always map to the same key no
/// matter how their parameters were assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hash: String,
}

impl CacheKey {
    /// Wrap a raw key string. Mostly useful in tests; production keys come
    /// from [`CacheKey::for_request`].
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Derive the key for a request.
    pub fn for_request(method: &str, path: &str, params: &BTreeMap<String, String>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(b"\n");
        hasher.update(path.as_bytes());
        // BTreeMap iteration is sorted, which makes the digest independent
        // of parameter insertion order.
        for (name, value) in params {
            hasher.update(b"\n");
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
        }
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
