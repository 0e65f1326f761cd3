//! Outbound (Driven) ports for the settings sync subsystem.
//!
//! These traits define the dependencies the controllers need: the account
//! save endpoint, the password re-confirmation gate, a time source, the
//! user-visible error channel, and the confirmed-change notifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{AccountProperty, Timestamp};
use thiserror::Error;

/// Transport-level failure of a save or delete request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a server response.
    #[error("Network error: {0}")]
    Network(String),
}

/// Server status of an acknowledged write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// The write was applied.
    Ok,
    /// The server rejected the write.
    Error,
}

/// Response body of an acknowledged write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Applied or rejected.
    pub status: SaveStatus,
    /// Optional human-readable detail from the server.
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveResponse {
    /// An ok response with no detail.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: SaveStatus::Ok,
            message: None,
        }
    }

    /// An error response with detail.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SaveStatus::Error,
            message: Some(message.into()),
        }
    }

    /// Whether the write was applied.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == SaveStatus::Ok
    }
}

/// The account save endpoint: one call per write.
///
/// Scope writes use `key = "<property>Scope"`; additional-email writes use
/// the compound collection addressing built by the collection controller.
#[async_trait]
pub trait SaveApi: Send + Sync {
    /// Write one value under a key.
    async fn save(&self, key: &str, value: &str) -> Result<SaveResponse, TransportError>;

    /// Delete the record addressed by a key.
    async fn delete(&self, key: &str) -> Result<SaveResponse, TransportError>;
}

/// Password re-confirmation gate.
///
/// Every write first awaits this (possibly no-op) step; a rejection is
/// treated identically to a save failure.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Returns true when the user confirmed (or no confirmation was
    /// needed), false when the prompt was rejected or cancelled.
    async fn confirm(&self) -> bool;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Deterministic time source for tests and drivers that inject time.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

impl MockTimeSource {
    /// Create at a fixed initial timestamp.
    #[must_use]
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    /// Advance the clock by `ms`.
    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }

    /// Set the clock to an absolute timestamp.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, std::sync::atomic::Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// User-visible error channel (toast-style).
///
/// Local validation failures never go through here; they stay in the
/// field's helper-text slot.
pub trait ErrorSurface: Send + Sync {
    /// Show a failure message to the user.
    fn show_error(&self, message: &str);
}

/// Notifier for confirmed cross-section changes.
///
/// Implemented by the bus adapter; called only after the server
/// acknowledged the write.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// A property value was confirmed by the server.
    async fn property_confirmed(&self, property: AccountProperty, wire_value: &str);
}
