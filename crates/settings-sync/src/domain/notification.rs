//! # Notification Email Selection
//!
//! At most one address receives notifications and password resets. An
//! empty persisted selection means "use the primary email"; a non-empty
//! one names a verified additional address. Selecting the active choice
//! again toggles back to the primary.

use super::errors::SettingsError;
use super::sync::SyncDeps;
use shared_types::{AccountProperty, VerificationState};
use tracing::{debug, error};

/// Selector for the notification address.
pub struct NotificationSelectionController {
    /// `None` means the primary email is used.
    selection: Option<String>,
    deps: SyncDeps,
}

impl NotificationSelectionController {
    /// Seed from the persisted selection; empty means primary.
    pub fn new(persisted: Option<String>, deps: SyncDeps) -> Self {
        let selection = persisted.filter(|s| !s.is_empty());
        Self { selection, deps }
    }

    /// The currently selected address, or `None` for the primary.
    pub fn current(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Whether the given address is the active selection.
    #[must_use]
    pub fn is_selected(&self, email: &str) -> bool {
        self.selection.as_deref() == Some(email)
    }

    /// Select an address (or toggle the active selection off, reverting to
    /// the primary).
    ///
    /// Unverified additional addresses are refused before any write; the
    /// primary needs no verification check.
    pub async fn select(
        &mut self,
        email: &str,
        verification: VerificationState,
        is_primary: bool,
    ) -> Result<(), SettingsError> {
        let target = if is_primary || self.is_selected(email) {
            String::new()
        } else {
            if verification != VerificationState::Verified {
                return Err(SettingsError::EmailNotVerified(email.to_string()));
            }
            email.to_string()
        };
        self.persist(target).await
    }

    /// Follow a confirmed rename of an additional address: when the old
    /// value was selected, move the selection to the new one (or back to
    /// the primary when the address was deleted).
    pub async fn migrate(&mut self, old: &str, new: &str) -> Result<(), SettingsError> {
        if !self.is_selected(old) {
            return Ok(());
        }
        self.persist(new.to_string()).await
    }

    async fn persist(&mut self, target: String) -> Result<(), SettingsError> {
        let previous = self.selection.clone();
        // Optimistic: the radio moves immediately.
        self.selection = if target.is_empty() {
            None
        } else {
            Some(target.clone())
        };

        let key = AccountProperty::NotificationEmail.key();
        let failure = if !self.deps.gate.confirm().await {
            Some(SettingsError::AuthGateRejected)
        } else {
            match self.deps.save.save(key, &target).await {
                Ok(response) if response.is_ok() => None,
                Ok(response) => Some(SettingsError::SaveFailed {
                    property: AccountProperty::NotificationEmail,
                    reason: response
                        .message
                        .unwrap_or_else(|| "server returned error status".into()),
                }),
                Err(transport) => Some(SettingsError::SaveFailed {
                    property: AccountProperty::NotificationEmail,
                    reason: transport.to_string(),
                }),
            }
        };

        match failure {
            None => {
                debug!(target = %target, "Notification email selection confirmed");
                Ok(())
            }
            Some(cause) => {
                self.selection = previous;
                let message = cause.to_string();
                self.deps.errors.show_error(&message);
                error!(cause = %message, "Notification email selection failed, reverted");
                Err(cause)
            }
        }
    }
}
