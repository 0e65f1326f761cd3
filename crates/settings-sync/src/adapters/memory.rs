//! # In-Memory Save API
//!
//! A [`SaveApi`] backed by process memory, modelling the server's
//! key/value property store and the value-addressed email collection.
//! Used as the test backend and as a scriptable stand-in wherever no real
//! transport is wired up: individual keys can be scripted to fail and the
//! whole endpoint can be taken offline.

use crate::ports::outbound::{SaveApi, SaveResponse, TransportError};
use async_trait::async_trait;
use shared_types::AccountProperty;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory property store with call recording and scriptable failures.
#[derive(Debug, Default)]
pub struct InMemorySaveApi {
    properties: Mutex<HashMap<String, String>>,
    emails: Mutex<Vec<String>>,
    saves: Mutex<Vec<(String, String)>>,
    deletes: Mutex<Vec<String>>,
    failing_keys: Mutex<HashSet<String>>,
    offline: AtomicBool,
}

impl InMemorySaveApi {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one property.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .lock()
            .expect("store lock")
            .insert(key.into(), value.into());
    }

    /// Pre-populate the email collection.
    pub fn seed_emails(&self, emails: &[&str]) {
        *self.emails.lock().expect("store lock") =
            emails.iter().map(|e| (*e).to_string()).collect();
    }

    /// Script every write to this exact key to be rejected.
    pub fn fail_key(&self, key: impl Into<String>) {
        self.failing_keys
            .lock()
            .expect("store lock")
            .insert(key.into());
    }

    /// Clear a scripted failure.
    pub fn heal_key(&self, key: &str) {
        self.failing_keys.lock().expect("store lock").remove(key);
    }

    /// Toggle transport-level failure for all requests.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// The stored value of one property.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.properties.lock().expect("store lock").get(key).cloned()
    }

    /// The email collection as the server now knows it.
    #[must_use]
    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().expect("store lock").clone()
    }

    /// Every save call in order, as `(key, value)`.
    #[must_use]
    pub fn save_calls(&self) -> Vec<(String, String)> {
        self.saves.lock().expect("store lock").clone()
    }

    /// Every delete call in order.
    #[must_use]
    pub fn delete_calls(&self) -> Vec<String> {
        self.deletes.lock().expect("store lock").clone()
    }

    fn check(&self, key: &str) -> Option<Result<SaveResponse, TransportError>> {
        if self.offline.load(Ordering::SeqCst) {
            return Some(Err(TransportError::Network("connection refused".into())));
        }
        if self.failing_keys.lock().expect("store lock").contains(key) {
            return Some(Ok(SaveResponse::error("write rejected")));
        }
        None
    }

    fn apply_save(&self, key: &str, value: &str) {
        let collection = AccountProperty::AdditionalMail.key();
        if key == collection {
            self.emails
                .lock()
                .expect("store lock")
                .push(value.to_string());
            return;
        }
        if let Some(previous) = key.strip_prefix(&format!("{collection}/")) {
            let mut emails = self.emails.lock().expect("store lock");
            if value.is_empty() {
                emails.retain(|e| e != previous);
            } else if let Some(slot) = emails.iter_mut().find(|e| *e == previous) {
                *slot = value.to_string();
            }
            return;
        }
        self.properties
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SaveApi for InMemorySaveApi {
    async fn save(&self, key: &str, value: &str) -> Result<SaveResponse, TransportError> {
        self.saves
            .lock()
            .expect("store lock")
            .push((key.to_string(), value.to_string()));
        if let Some(outcome) = self.check(key) {
            return outcome;
        }
        self.apply_save(key, value);
        Ok(SaveResponse::ok())
    }

    async fn delete(&self, key: &str) -> Result<SaveResponse, TransportError> {
        self.deletes.lock().expect("store lock").push(key.to_string());
        if let Some(outcome) = self.check(key) {
            return outcome;
        }
        let collection = AccountProperty::AdditionalMail.key();
        if let Some(value) = key.strip_prefix(&format!("{collection}/")) {
            self.emails.lock().expect("store lock").retain(|e| e != value);
        } else {
            self.properties.lock().expect("store lock").remove(key);
        }
        Ok(SaveResponse::ok())
    }
}
