//! # Shared Bus - Cross-Section Settings Events
//!
//! Independent form sections on the settings page react to each other's
//! confirmed changes (the header avatar re-renders when the avatar section
//! saves, the profile preview updates when the display name changes)
//! without direct coupling. This crate is the typed message-passing layer
//! between them: named topics, typed payloads, filtered subscriptions.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ FormSection A│                    │ FormSection B│
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Events are fire-and-forget notifications of *confirmed* state: a
//! section publishes only after the server acknowledged the write, so
//! subscribers never observe optimistic values that may roll back.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SettingsEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before old events are dropped.
///
/// A settings page emits at most a handful of events per user action, so
/// the buffer stays small.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
