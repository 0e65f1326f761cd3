//! # Shared Types - Account Settings Vocabulary
//!
//! Single Source of Truth for the types shared by the settings sync
//! subsystem and the event bus:
//!
//! - [`AccountProperty`] - the closed set of editable account properties
//!   and their wire keys (including the `<property>Scope` addressing used
//!   for federation-scope writes)
//! - [`Scope`] - federation visibility levels (private/local/federated/published)
//! - [`VerificationState`] - email verification lifecycle
//! - [`FieldValue`] - the initial/pending/committed slots every synced
//!   field is built on
//! - [`AccountConfig`] - the typed configuration context parsed once from
//!   the server-seeded initial-state bag
//!
//! ## Design Rules
//!
//! - No controller logic lives here; this crate is plain data plus
//!   parsing. Behavior belongs to `settings-sync`.
//! - The server response is the source of truth: `FieldValue::confirm` is
//!   the only way to move the rollback target.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod errors;
pub mod field;
pub mod properties;

pub use config::{
    AccountConfig, AvatarInfo, Capabilities, EmailConfig, LanguageEntry, LanguageInfo, LocaleInfo,
    SeededEmail, SeededFlag, SeededProperty,
};
pub use errors::ConfigError;
pub use field::{FieldValue, PropertyScalar};
pub use properties::{AccountProperty, Scope, VerificationState};

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;
