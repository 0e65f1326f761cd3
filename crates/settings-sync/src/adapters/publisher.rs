//! # Change Broadcaster
//!
//! Bridges the controllers' [`ChangeNotifier`] port onto the shared event
//! bus. Only the properties other sections react to (display name,
//! organisation, profile visibility, avatar) produce events; every other
//! confirmation is dropped here.

use crate::ports::outbound::ChangeNotifier;
use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus, SettingsEvent};
use shared_types::AccountProperty;
use std::sync::Arc;
use tracing::warn;

/// [`ChangeNotifier`] adapter that publishes confirmed changes to the bus.
pub struct ChangeBroadcaster {
    bus: Arc<InMemoryEventBus>,
}

impl ChangeBroadcaster {
    /// Wrap a bus handle.
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    fn event_for(property: AccountProperty, wire_value: &str) -> Option<SettingsEvent> {
        match property {
            AccountProperty::DisplayName => Some(SettingsEvent::DisplayNameUpdated {
                value: wire_value.to_string(),
            }),
            AccountProperty::Organisation => Some(SettingsEvent::OrganisationUpdated {
                value: wire_value.to_string(),
            }),
            AccountProperty::ProfileEnabled => Some(SettingsEvent::ProfileEnabledUpdated {
                enabled: wire_value == "1",
            }),
            AccountProperty::Avatar => match wire_value.parse() {
                Ok(version) => Some(SettingsEvent::AvatarUpdated { version }),
                Err(_) => {
                    warn!(value = %wire_value, "Avatar confirmation carried a non-numeric version");
                    None
                }
            },
            _ => None,
        }
    }
}

#[async_trait]
impl ChangeNotifier for ChangeBroadcaster {
    async fn property_confirmed(&self, property: AccountProperty, wire_value: &str) {
        if let Some(event) = Self::event_for(property, wire_value) {
            self.bus.publish(event).await;
        }
    }
}
