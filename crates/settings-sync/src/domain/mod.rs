//! Domain layer: controllers, validators, and error types.

pub mod collection;
pub mod errors;
pub mod notification;
pub mod scope;
pub mod sync;
pub mod validators;

pub use collection::{AdditionalEmailEntry, CollectionController, CollectionOutcome, EntryKey};
pub use errors::SettingsError;
pub use notification::NotificationSelectionController;
pub use scope::{supported_scopes, ScopeController};
pub use sync::{
    FieldValidator, Indicator, PropertySyncController, SaveOutcome, SyncDeps, SyncPhase,
    DEBOUNCE_MS, INDICATOR_VISIBLE_MS,
};
