//! # Settings Sync Subsystem
//!
//! Optimistic autosave / reconciliation engine shared by every editable
//! field of the personal-information settings page.
//!
//! ## Purpose
//!
//! Each form section binds user input to one of the controllers in this
//! crate. The controllers debounce keystrokes, validate locally, issue the
//! network write through the [SaveApi](ports::SaveApi) port, and reconcile
//! local state with the server-confirmed state - or roll back to the last
//! known-good value and surface an error.
//!
//! ## Field State Machine
//!
//! ```text
//! [Idle] ──on_input──→ [Editing] ──deadline elapses──→ validate ──→ save
//!                          │                              │           │
//!                          └──── new keystroke re-arms ───┘      ok / fail
//!                                                                    │
//!                                    [Confirmed] ←── ok ──────┬──────┘
//!                                    [RolledBack] ←── fail ───┘
//! ```
//!
//! | Stage | Method | Effect |
//! |-------|--------|--------|
//! | Edit | `PropertySyncController::on_input` | pending = raw, debounce re-armed |
//! | Drive | `PropertySyncController::poll` | validate + save once the deadline elapsed |
//! | Confirm | (internal) | `initial = committed = value`, 2 s checkmark |
//! | Rollback | (internal) | pending reverts to `initial`, 2 s error mark |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | At most one in-flight save per field | `poll` holds `&mut self` across the await |
//! | Entries never leave the list before server confirmation | `CollectionController::remove` |
//! | Active scope is always rendered, even when no longer selectable | `ScopeController` |
//! | At most one notification email | `NotificationSelectionController::select` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - bus broadcaster, in-memory save API, test support  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - AutosaveField (FormSection contract)       │
//! │  ports/outbound.rs - SaveApi, AuthGate, TimeSource, ...         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/validators.rs   - pure per-field predicates             │
//! │  domain/sync.rs         - PropertySyncController                │
//! │  domain/collection.rs   - CollectionController (extra emails)   │
//! │  domain/scope.rs        - ScopeController                       │
//! │  domain/notification.rs - NotificationSelectionController       │
//! │  domain/errors.rs       - SettingsError enum                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{ChangeBroadcaster, InMemorySaveApi};
pub use domain::{
    supported_scopes, AdditionalEmailEntry, CollectionController, CollectionOutcome, EntryKey,
    FieldValidator, Indicator, NotificationSelectionController, PropertySyncController, SaveOutcome,
    ScopeController, SettingsError, SyncDeps, SyncPhase, DEBOUNCE_MS, INDICATOR_VISIBLE_MS,
};
pub use ports::{
    AuthGate, AutosaveField, ChangeNotifier, ErrorSurface, MockTimeSource, SaveApi, SaveResponse,
    SaveStatus, SystemTimeSource, TimeSource, TransportError,
};
