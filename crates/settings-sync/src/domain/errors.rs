//! # Domain Errors
//!
//! Error taxonomy for the settings sync subsystem. All failures are
//! field/entry-local: one field's failure never blocks or rolls back
//! another field, and nothing here is fatal to the page. There is no
//! retry policy; the next user edit is the recovery path. Local
//! validation failures are not represented here at all, they stay in the
//! field's helper-text slot.

use shared_types::{AccountProperty, Scope};
use thiserror::Error;
use uuid::Uuid;

/// Settings sync error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The password re-confirmation step was rejected or cancelled.
    /// Treated like a save failure with a generic message.
    #[error("Password confirmation required")]
    AuthGateRejected,

    /// Network error or non-ok server status; the field was rolled back.
    #[error("Unable to update {property}: {reason}")]
    SaveFailed {
        /// The property whose save failed.
        property: AccountProperty,
        /// Transport error text or server status detail.
        reason: String,
    },

    /// A delete did not return ok; the entry remains in the list.
    #[error("Unable to delete additional email {value}: {reason}")]
    DeleteFailed {
        /// The confirmed value the delete was addressed by.
        value: String,
        /// Transport error text or server status detail.
        reason: String,
    },

    /// Scope selection outside the property's supported set; rejected
    /// before any network call.
    #[error("Scope {scope} is not available for {property}")]
    ScopeNotSupported {
        /// The property the scope change was attempted on.
        property: AccountProperty,
        /// The rejected scope.
        scope: Scope,
    },

    /// No collection entry with the given key.
    #[error("No additional email entry with key {0}")]
    EntryNotFound(Uuid),

    /// Adding an additional email while the primary field is invalid.
    #[error("Primary email must be valid before adding additional emails")]
    PrimaryInvalid,

    /// Selecting an unverified additional email as notification email,
    /// or promoting one.
    #[error("Email {0} is not verified")]
    EmailNotVerified(String),

    /// Promoting an entry that was never confirmed by the server.
    #[error("Additional email entry has no confirmed value")]
    EntryNotConfirmed,
}
