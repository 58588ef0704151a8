//! Persisted credential store for the access/refresh token pair.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session reads the access token from here at call time for every
//! authenticated request, and the auth resolver subscribes to changes so it
//! can revalidate whenever a pair is installed or cleared.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort. When the backend refuses a write the store keeps
//! the pair in memory for the rest of the process lifetime instead of
//! reporting an error; a reload then starts logged-out.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

#[cfg(test)]
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use crate::config::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::net::types::TokenPair;

/// Key/value backend holding persisted strings.
pub trait TokenStorage {
    fn read(&self, key: &str) -> Option<String>;
    /// Returns `false` when the value could not be persisted.
    fn write(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// Process-local storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Browser `localStorage`. Native builds see an always-unavailable store.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            local_storage().is_some_and(|storage| storage.set_item(key, value).is_ok())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            false
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

type Listener = Box<dyn Fn(Option<&TokenPair>) + Send + Sync>;

/// Owner of the current [`TokenPair`].
///
/// Both tokens are written together or cleared together; a half-written pair
/// is never observable through [`TokenStore::get`].
pub struct TokenStore<S> {
    storage: S,
    current: RwLock<Option<TokenPair>>,
    persistent: AtomicBool,
    listeners: Mutex<Vec<Listener>>,
}

impl<S: TokenStorage> TokenStore<S> {
    /// Open the store, loading any pair persisted by a previous page load.
    pub fn new(storage: S) -> Self {
        let current = load_pair(&storage);
        Self {
            storage,
            current: RwLock::new(current),
            persistent: AtomicBool::new(true),
            listeners: Mutex::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn get(&self) -> Option<TokenPair> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current access token, read at call time for authenticated requests.
    pub fn access(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|pair| pair.access.clone())
    }

    /// Install a pair and notify subscribers.
    pub fn set(&self, pair: TokenPair) {
        if self.persistent.load(Ordering::Acquire) {
            let stored = self.storage.write(ACCESS_TOKEN_KEY, &pair.access)
                && self.storage.write(REFRESH_TOKEN_KEY, &pair.refresh);
            if !stored {
                self.storage.remove(ACCESS_TOKEN_KEY);
                self.storage.remove(REFRESH_TOKEN_KEY);
                self.persistent.store(false, Ordering::Release);
                log::warn!("token storage unavailable; credentials kept in memory only");
            }
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(pair.clone());
        log::debug!("token pair installed");
        self.notify(Some(&pair));
    }

    /// Remove both tokens and notify subscribers.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        log::debug!("token pair cleared");
        self.notify(None);
    }

    /// Register a callback invoked after every `set`/`clear`.
    ///
    /// Callbacks run synchronously and must not subscribe further listeners.
    pub fn subscribe(&self, listener: impl Fn(Option<&TokenPair>) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    fn notify(&self, pair: Option<&TokenPair>) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(pair);
        }
    }
}

fn load_pair<S: TokenStorage>(storage: &S) -> Option<TokenPair> {
    let access = storage.read(ACCESS_TOKEN_KEY).filter(|v| !v.is_empty());
    let refresh = storage.read(REFRESH_TOKEN_KEY).filter(|v| !v.is_empty());
    match (access, refresh) {
        (Some(access), Some(refresh)) => Some(TokenPair { access, refresh }),
        (None, None) => None,
        _ => {
            // A lone key is a torn write from an older session; drop it.
            storage.remove(ACCESS_TOKEN_KEY);
            storage.remove(REFRESH_TOKEN_KEY);
            None
        }
    }
}
