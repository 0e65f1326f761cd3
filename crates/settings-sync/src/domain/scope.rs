//! # Federation Scope Propagation
//!
//! Per-property scope selection with optimistic apply. The selectable set
//! is derived from the property's declared subset and the server's
//! capability flags; a scope change is applied locally first, persisted
//! under `<property>Scope`, and rolled back on failure.

use super::errors::SettingsError;
use super::sync::SyncDeps;
use shared_types::{AccountProperty, Capabilities, Scope};
use tracing::{debug, error};

/// The scopes a property may currently offer.
///
/// Unpublished properties (biography, headline, organisation, role) never
/// exceed LOCAL regardless of flags. For the rest, FEDERATED requires
/// trusted-server federation and PUBLISHED requires lookup-server upload.
#[must_use]
pub fn supported_scopes(property: AccountProperty, capabilities: &Capabilities) -> Vec<Scope> {
    property
        .default_scopes()
        .iter()
        .copied()
        .filter(|scope| match scope {
            Scope::Private | Scope::Local => true,
            Scope::Federated => capabilities.federation_enabled,
            Scope::Published => capabilities.lookup_server_upload_enabled,
        })
        .collect()
}

/// Scope selector for one property (or one collection entry).
pub struct ScopeController {
    property: AccountProperty,
    active: Scope,
    capabilities: Capabilities,
    /// Confirmed entry value, for collection entries whose scope endpoint
    /// is value-addressed. `None` for single-valued properties.
    entry_value: Option<String>,
    deps: SyncDeps,
}

impl ScopeController {
    /// Selector for a single-valued property.
    pub fn new(
        property: AccountProperty,
        active: Scope,
        capabilities: Capabilities,
        deps: SyncDeps,
    ) -> Self {
        Self {
            property,
            active,
            capabilities,
            entry_value: None,
            deps,
        }
    }

    /// Selector for one additional-email entry, addressed by its confirmed
    /// value.
    pub fn for_collection_entry(
        active: Scope,
        entry_value: String,
        capabilities: Capabilities,
        deps: SyncDeps,
    ) -> Self {
        Self {
            property: AccountProperty::AdditionalMail,
            active,
            capabilities,
            entry_value: Some(entry_value),
            deps,
        }
    }

    /// The property whose scope this selector owns.
    pub fn property(&self) -> AccountProperty {
        self.property
    }

    /// The currently active scope.
    pub fn active(&self) -> Scope {
        self.active
    }

    /// The menu of currently selectable scopes.
    #[must_use]
    pub fn selectable(&self) -> Vec<Scope> {
        supported_scopes(self.property, &self.capabilities)
    }

    /// Whether a scope may be selected right now.
    #[must_use]
    pub fn is_selectable(&self, scope: Scope) -> bool {
        self.selectable().contains(&scope)
    }

    /// Replace the capability flags (e.g. after a server config reload).
    ///
    /// The active scope is left untouched even if it is no longer
    /// selectable; the server remains authoritative for already-persisted
    /// scopes.
    pub fn update_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    /// Adopt an externally confirmed entry value (after a collection entry
    /// save) so future scope writes address the right slot.
    pub fn set_entry_value(&mut self, value: String) {
        self.entry_value = Some(value);
    }

    /// Change the active scope.
    ///
    /// Unsupported scopes are rejected before any side effect. Supported
    /// ones are applied optimistically, persisted, and rolled back with a
    /// surfaced error if the server refuses.
    pub async fn change_scope(&mut self, scope: Scope) -> Result<(), SettingsError> {
        if !self.is_selectable(scope) {
            return Err(SettingsError::ScopeNotSupported {
                property: self.property,
                scope,
            });
        }
        let previous = self.active;
        if scope == previous {
            return Ok(());
        }
        self.active = scope;

        let key = self.wire_key();
        let failure = if !self.deps.gate.confirm().await {
            Some(SettingsError::AuthGateRejected)
        } else {
            match self.deps.save.save(&key, scope.as_str()).await {
                Ok(response) if response.is_ok() => None,
                Ok(response) => Some(SettingsError::SaveFailed {
                    property: self.property,
                    reason: response
                        .message
                        .unwrap_or_else(|| "server returned error status".into()),
                }),
                Err(transport) => Some(SettingsError::SaveFailed {
                    property: self.property,
                    reason: transport.to_string(),
                }),
            }
        };

        match failure {
            None => {
                debug!(property = %self.property, scope = %scope, "Scope change confirmed");
                Ok(())
            }
            Some(cause) => {
                self.active = previous;
                let message = cause.to_string();
                self.deps.errors.show_error(&message);
                error!(property = %self.property, scope = %scope, cause = %message,
                    "Scope change failed, reverted");
                Err(cause)
            }
        }
    }

    fn wire_key(&self) -> String {
        match &self.entry_value {
            Some(value) => format!("{}/{}", self.property.scope_key(), value),
            None => self.property.scope_key(),
        }
    }
}
