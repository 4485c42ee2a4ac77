//! Sender name resolution
//!
//! [`NameResolver`] is the seam the conversation list resolves sender tokens
//! through. Completion may happen on any thread, or never.
//! [`PooledNameResolver`] is the stock implementation: it answers from a
//! [`ContactNameCache`] on the rayon thread pool.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Completion callback receiving the resolved display name
pub type ResolveCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// Background resolver from raw sender tokens to display names
pub trait NameResolver: Send + Sync {
    /// Resolve `token` and eventually call `on_done` with the display name
    fn resolve(&self, token: &str, on_done: ResolveCallback);
}

/// Thread-safe map from sender tokens to contact display names
#[derive(Debug, Default)]
pub struct ContactNameCache {
    names: RwLock<HashMap<String, String>>,
}

impl ContactNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from `(token, name)` pairs
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names = entries
            .into_iter()
            .map(|(token, name)| (token.into(), name.into()))
            .collect();
        Self {
            names: RwLock::new(names),
        }
    }

    pub fn insert(&self, token: impl Into<String>, name: impl Into<String>) {
        let mut names = self.names.write().unwrap_or_else(|p| p.into_inner());
        names.insert(token.into(), name.into());
    }

    /// Look up the contact name for `token`, if the contact is known
    pub fn lookup(&self, token: &str) -> Option<String> {
        let names = self.names.read().unwrap_or_else(|p| p.into_inner());
        names.get(token.trim()).cloned()
    }

    /// Display name for `token`, falling back to the token itself
    pub fn get_contact_name(&self, token: &str) -> String {
        self.lookup(token).unwrap_or_else(|| token.trim().to_string())
    }

    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Completes immediately on the calling thread
impl NameResolver for ContactNameCache {
    fn resolve(&self, token: &str, on_done: ResolveCallback) {
        on_done(self.get_contact_name(token));
    }
}

/// Resolves names from a [`ContactNameCache`] on the rayon global pool
#[derive(Debug, Clone)]
pub struct PooledNameResolver {
    cache: Arc<ContactNameCache>,
}

impl PooledNameResolver {
    pub fn new(cache: Arc<ContactNameCache>) -> Self {
        Self { cache }
    }
}

impl NameResolver for PooledNameResolver {
    fn resolve(&self, token: &str, on_done: ResolveCallback) {
        let cache = Arc::clone(&self.cache);
        let token = token.to_string();
        rayon::spawn(move || {
            let name = cache.get_contact_name(&token);
            debug!("Resolved {} on pool thread", token);
            on_done(name);
        });
    }
}
