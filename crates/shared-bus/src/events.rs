//! # Settings Events
//!
//! Typed payloads for the cross-section notifications. Each variant
//! corresponds to one confirmed account change another section may care
//! about.

use serde::{Deserialize, Serialize};

/// All events that can be published to the bus.
///
/// Published only after the server confirmed the underlying write;
/// subscribers can treat payloads as the new baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// The display name was confirmed by the server.
    DisplayNameUpdated {
        /// The new confirmed display name.
        value: String,
    },

    /// The organisation was confirmed by the server.
    OrganisationUpdated {
        /// The new confirmed organisation.
        value: String,
    },

    /// Profile visibility was toggled and confirmed.
    ProfileEnabledUpdated {
        /// Whether the public profile page is now enabled.
        enabled: bool,
    },

    /// The avatar changed; carries the new cache-busting version.
    AvatarUpdated {
        /// The new avatar version.
        version: u64,
    },
}

impl SettingsEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::DisplayNameUpdated { .. } => EventTopic::DisplayName,
            Self::OrganisationUpdated { .. } => EventTopic::Organisation,
            Self::ProfileEnabledUpdated { .. } => EventTopic::ProfileEnabled,
            Self::AvatarUpdated { .. } => EventTopic::Avatar,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `display-name:updated`
    DisplayName,
    /// `organisation:updated`
    Organisation,
    /// `profile-enabled:updated`
    ProfileEnabled,
    /// `avatar:updated`
    Avatar,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SettingsEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
