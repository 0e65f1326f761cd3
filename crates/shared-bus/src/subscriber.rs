//! # Event Subscriber
//!
//! Receiving side of the bus: filtered [`Subscription`] handles and the
//! [`EventStream`] wrapper for combinator-style consumption. Lagged
//! receivers skip dropped events silently; a settings page only ever
//! cares about the most recent confirmed state.

use crate::events::{EventFilter, SettingsEvent};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// One subscriber's handle onto the bus.
///
/// Events not matching the filter are consumed and discarded here, so
/// callers only ever see their own topics. Dropping the handle
/// unregisters it from the bus's subscription accounting.
pub struct Subscription {
    receiver: broadcast::Receiver<SettingsEvent>,
    filter: EventFilter,
    /// Shared accounting map on the bus, keyed by topic set.
    registry: Arc<RwLock<HashMap<String, usize>>>,
    registry_key: String,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<SettingsEvent>,
        filter: EventFilter,
        registry: Arc<RwLock<HashMap<String, usize>>>,
        registry_key: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            registry,
            registry_key,
        }
    }

    /// Wait for the next matching event.
    ///
    /// Returns `None` once the bus is gone. Lag (a slow subscriber whose
    /// buffer overflowed) is logged and skipped, not treated as an error.
    pub async fn recv(&mut self) -> Option<SettingsEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, events dropped");
                }
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    ///
    /// `Ok(None)` means no matching event is currently buffered.
    pub fn try_recv(&mut self) -> Result<Option<SettingsEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            }
        }
    }

    /// The filter this subscription was created with.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.write() {
            if let Some(count) = registry.get_mut(&self.registry_key) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    registry.remove(&self.registry_key);
                }
            }
        }
        debug!(topics = %self.registry_key, "Subscription dropped");
    }
}

/// [`Subscription`] adapted to `tokio_stream::Stream`.
pub struct EventStream {
    subscription: Subscription,
}

impl EventStream {
    /// Wrap a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// The filter of the underlying subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        self.subscription.filter()
    }
}

impl Stream for EventStream {
    type Item = SettingsEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.subscription.try_recv() {
            Ok(Some(event)) => Poll::Ready(Some(event)),
            Ok(None) => {
                // broadcast::Receiver has no poll-based API; re-schedule
                // immediately and retry on the next pass.
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(SubscriptionError::Closed) => Poll::Ready(None),
        }
    }
}
