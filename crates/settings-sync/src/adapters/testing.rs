//! Test doubles for the outbound ports, shared by unit and integration
//! tests.

use crate::ports::outbound::{AuthGate, ChangeNotifier, ErrorSurface};
use async_trait::async_trait;
use shared_types::AccountProperty;
use std::sync::Mutex;

/// Gate that always confirms (no password prompt configured).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuthGate;

#[async_trait]
impl AuthGate for NoopAuthGate {
    async fn confirm(&self) -> bool {
        true
    }
}

/// Gate that always rejects, as if the user cancelled the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingAuthGate;

#[async_trait]
impl AuthGate for RejectingAuthGate {
    async fn confirm(&self) -> bool {
        false
    }
}

/// Error surface that records every surfaced message.
#[derive(Debug, Default)]
pub struct RecordingErrorSurface {
    messages: Mutex<Vec<String>>,
}

impl RecordingErrorSurface {
    /// All surfaced messages, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("messages lock").clone()
    }
}

impl ErrorSurface for RecordingErrorSurface {
    fn show_error(&self, message: &str) {
        self.messages
            .lock()
            .expect("messages lock")
            .push(message.to_string());
    }
}

/// Notifier that records confirmed changes instead of broadcasting them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    confirmed: Mutex<Vec<(AccountProperty, String)>>,
}

impl RecordingNotifier {
    /// All confirmations, in order.
    #[must_use]
    pub fn confirmed(&self) -> Vec<(AccountProperty, String)> {
        self.confirmed.lock().expect("notifier lock").clone()
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn property_confirmed(&self, property: AccountProperty, wire_value: &str) {
        self.confirmed
            .lock()
            .expect("notifier lock")
            .push((property, wire_value.to_string()));
    }
}
