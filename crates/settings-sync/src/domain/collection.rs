//! # Additional Email Collection
//!
//! Manages the dynamic list of additional email addresses. Each entry
//! carries its own [`PropertySyncController`], a per-entry scope and a
//! verification state.
//!
//! ## Server addressing
//!
//! The server identifies collection entries by their confirmed value, not
//! by any client-side id. A blank entry therefore does not exist
//! server-side until its first non-empty save (create-on-first-save);
//! afterwards updates and deletes address `additional_mail/<previous>`.
//! The [`EntryKey`] is a client-side surrogate only and never goes over
//! the wire.

use super::errors::SettingsError;
use super::sync::{PropertySyncController, SaveOutcome, SyncDeps};
use shared_types::{AccountProperty, Scope, SeededEmail, VerificationState};
use std::fmt;
use tracing::{debug, error};
use uuid::Uuid;

/// Stable client-side identity of one collection entry.
///
/// Survives edits and reorderings; meaningless to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey(Uuid);

impl EntryKey {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The raw uuid, for diagnostics.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One additional email address.
pub struct AdditionalEmailEntry {
    key: EntryKey,
    sync: PropertySyncController<String>,
    scope: Scope,
    verification: VerificationState,
}

impl AdditionalEmailEntry {
    /// Client-side identity.
    pub fn key(&self) -> EntryKey {
        self.key
    }

    /// Live editor value.
    pub fn value(&self) -> &str {
        self.sync.value()
    }

    /// Last server-confirmed value; empty until the first save.
    pub fn confirmed(&self) -> &str {
        self.sync.confirmed()
    }

    /// Whether the entry exists server-side yet.
    pub fn is_persisted(&self) -> bool {
        !self.sync.confirmed().is_empty()
    }

    /// Verification state of the confirmed address.
    pub fn verification(&self) -> VerificationState {
        self.verification
    }

    /// Per-entry visibility scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The field controller, for rendering state (indicator, helper text).
    pub fn sync(&self) -> &PropertySyncController<String> {
        &self.sync
    }
}

/// Per-entry result of one [`CollectionController::poll`] pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// The entry's save was confirmed. `previous` is the value the server
    /// knew before the save (empty for a freshly created entry); callers
    /// that track addresses by value (notification selection) migrate on
    /// this.
    Confirmed {
        key: EntryKey,
        previous: String,
        value: String,
    },
    /// The entry's save failed and the field rolled back.
    RolledBack { key: EntryKey, error: SettingsError },
    /// The entry's value failed local validation; nothing was sent.
    RejectedLocally { key: EntryKey },
}

/// Controller for the whole additional-email list.
pub struct CollectionController {
    entries: Vec<AdditionalEmailEntry>,
    deps: SyncDeps,
}

impl CollectionController {
    /// Build from the server-seeded entries.
    pub fn from_config(seeded: &[SeededEmail], deps: SyncDeps) -> Self {
        let entries = seeded
            .iter()
            .map(|email| AdditionalEmailEntry {
                key: EntryKey::generate(),
                sync: email_sync(email.value.clone(), deps.clone()),
                scope: email.scope,
                verification: email.verification(),
            })
            .collect();
        Self { entries, deps }
    }

    /// All entries, in display order.
    pub fn entries(&self) -> &[AdditionalEmailEntry] {
        &self.entries
    }

    /// Look up one entry.
    pub fn entry(&self, key: EntryKey) -> Option<&AdditionalEmailEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    fn entry_mut(&mut self, key: EntryKey) -> Result<&mut AdditionalEmailEntry, SettingsError> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or(SettingsError::EntryNotFound(key.as_uuid()))
    }

    /// Append a blank entry.
    ///
    /// Refused while the primary email is invalid, so the list cannot grow
    /// under a broken primary.
    pub fn add(&mut self, primary_is_valid: bool) -> Result<EntryKey, SettingsError> {
        if !primary_is_valid {
            return Err(SettingsError::PrimaryInvalid);
        }
        let key = EntryKey::generate();
        self.entries.push(AdditionalEmailEntry {
            key,
            sync: email_sync(String::new(), self.deps.clone()),
            scope: Scope::Local,
            verification: VerificationState::NotVerified,
        });
        debug!(%key, "Additional email entry added");
        Ok(key)
    }

    /// Record a keystroke on one entry.
    pub fn on_input(&mut self, key: EntryKey, raw: String) -> Result<(), SettingsError> {
        self.entry_mut(key)?.sync.on_input(raw);
        Ok(())
    }

    /// Drive all entry state machines once.
    ///
    /// A confirmed save of a changed value resets that entry's
    /// verification, since verification binds to the exact address.
    pub async fn poll(&mut self) -> Vec<CollectionOutcome> {
        let mut outcomes = Vec::new();
        for entry in &mut self.entries {
            let previous = entry.sync.confirmed().to_string();
            let Some(outcome) = entry.sync.poll().await else {
                continue;
            };
            match outcome {
                SaveOutcome::Confirmed => {
                    let value = entry.sync.confirmed().to_string();
                    if value != previous {
                        entry.verification = VerificationState::NotVerified;
                    }
                    outcomes.push(CollectionOutcome::Confirmed {
                        key: entry.key,
                        previous,
                        value,
                    });
                }
                SaveOutcome::RolledBack(error) => {
                    outcomes.push(CollectionOutcome::RolledBack {
                        key: entry.key,
                        error,
                    });
                }
                SaveOutcome::RejectedLocally => {
                    outcomes.push(CollectionOutcome::RejectedLocally { key: entry.key });
                }
            }
        }
        outcomes
    }

    /// Remove one entry.
    ///
    /// A never-persisted entry is dropped locally without any network
    /// traffic. A persisted one is deleted server-side first; on failure
    /// the entry stays in the list so the view keeps matching the server.
    pub async fn remove(&mut self, key: EntryKey) -> Result<(), SettingsError> {
        let position = self
            .entries
            .iter()
            .position(|e| e.key == key)
            .ok_or(SettingsError::EntryNotFound(key.as_uuid()))?;
        let confirmed = self.entries[position].sync.confirmed().to_string();

        if confirmed.is_empty() {
            self.entries.remove(position);
            return Ok(());
        }

        if !self.deps.gate.confirm().await {
            return Err(self.surface(SettingsError::AuthGateRejected));
        }
        let wire_key = format!("{}/{}", AccountProperty::AdditionalMail.key(), confirmed);
        let failure = match self.deps.save.delete(&wire_key).await {
            Ok(response) if response.is_ok() => {
                self.entries.remove(position);
                debug!(%key, value = %confirmed, "Additional email deleted");
                return Ok(());
            }
            Ok(response) => response
                .message
                .unwrap_or_else(|| "server returned error status".into()),
            Err(transport) => transport.to_string(),
        };
        Err(self.surface(SettingsError::DeleteFailed {
            value: confirmed,
            reason: failure,
        }))
    }

    /// Swap one verified entry with the primary email.
    ///
    /// Two writes: the entry's address becomes the primary, then the old
    /// primary takes the entry's slot (or the slot is deleted when the old
    /// primary was empty). If the second write fails, the first is
    /// compensated so the server never keeps a half-applied swap.
    pub async fn promote(
        &mut self,
        key: EntryKey,
        primary: &mut PropertySyncController<String>,
    ) -> Result<(), SettingsError> {
        let entry = self.entry_mut(key)?;
        if !entry.is_persisted() {
            return Err(SettingsError::EntryNotConfirmed);
        }
        if entry.verification != VerificationState::Verified {
            return Err(SettingsError::EmailNotVerified(
                entry.sync.confirmed().to_string(),
            ));
        }
        let promoted = entry.sync.confirmed().to_string();
        let demoted = primary.confirmed().to_string();

        if !self.deps.gate.confirm().await {
            return Err(self.surface(SettingsError::AuthGateRejected));
        }

        let primary_key = AccountProperty::Email.key();
        if let Some(reason) = write_failure(&self.deps, primary_key, &promoted).await {
            return Err(self.surface(SettingsError::SaveFailed {
                property: AccountProperty::Email,
                reason,
            }));
        }

        // Second leg: the promoted value's slot receives the old primary.
        // Writing an empty value deletes the slot.
        let slot_key = format!("{}/{}", AccountProperty::AdditionalMail.key(), promoted);
        if let Some(reason) = write_failure(&self.deps, &slot_key, &demoted).await {
            // Put the primary back so the swap is all-or-nothing. A failed
            // compensation leaves the server authoritative either way.
            if let Some(undo) = write_failure(&self.deps, primary_key, &demoted).await {
                error!(reason = %undo, "Promote compensation failed");
            }
            return Err(self.surface(SettingsError::SaveFailed {
                property: AccountProperty::AdditionalMail,
                reason,
            }));
        }

        primary.adopt_confirmed(promoted.clone());
        if demoted.is_empty() {
            self.entries.retain(|e| e.key != key);
        } else {
            let entry = self.entry_mut(key)?;
            entry.sync.adopt_confirmed(demoted);
            // The old primary was the account's login address, which the
            // server only accepts verified.
            entry.verification = VerificationState::Verified;
        }
        debug!(%key, value = %promoted, "Additional email promoted to primary");
        Ok(())
    }

    /// Mark a verification round as started.
    pub fn begin_verification(&mut self, key: EntryKey) -> Result<(), SettingsError> {
        let entry = self.entry_mut(key)?;
        if !entry.is_persisted() {
            return Err(SettingsError::EntryNotConfirmed);
        }
        entry.verification = VerificationState::InProgress;
        Ok(())
    }

    /// Record a completed verification.
    pub fn mark_verified(&mut self, key: EntryKey) -> Result<(), SettingsError> {
        let entry = self.entry_mut(key)?;
        if !entry.is_persisted() {
            return Err(SettingsError::EntryNotConfirmed);
        }
        entry.verification = VerificationState::Verified;
        Ok(())
    }

    /// Set an entry's visibility scope locally (persisted by the caller's
    /// scope controller).
    pub fn set_scope(&mut self, key: EntryKey, scope: Scope) -> Result<(), SettingsError> {
        self.entry_mut(key)?.scope = scope;
        Ok(())
    }

    fn surface(&self, error: SettingsError) -> SettingsError {
        let message = error.to_string();
        self.deps.errors.show_error(&message);
        error!(cause = %message, "Additional email operation failed");
        error
    }
}

async fn write_failure(deps: &SyncDeps, key: &str, value: &str) -> Option<String> {
    match deps.save.save(key, value).await {
        Ok(response) if response.is_ok() => None,
        Ok(response) => Some(
            response
                .message
                .unwrap_or_else(|| "server returned error status".into()),
        ),
        Err(transport) => Some(transport.to_string()),
    }
}

fn email_sync(confirmed: String, deps: SyncDeps) -> PropertySyncController<String> {
    PropertySyncController::new(AccountProperty::AdditionalMail, confirmed, deps)
        .with_validator(super::sync::FieldValidator::Email)
}
