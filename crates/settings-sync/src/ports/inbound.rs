//! Inbound port: the contract a form section drives its text fields
//! through, independent of the concrete controller type.

use crate::domain::sync::{Indicator, PropertySyncController, SaveOutcome};
use async_trait::async_trait;

/// A debounced, autosaving text field as seen by the rendering layer.
///
/// Object-safe so a section can hold its heterogeneous fields as
/// `Vec<Box<dyn AutosaveField>>` and drive them uniformly from one loop.
#[async_trait]
pub trait AutosaveField: Send {
    /// Record a keystroke.
    fn on_input(&mut self, raw: String);

    /// Drive the debounce/save machine once.
    async fn poll(&mut self) -> Option<SaveOutcome>;

    /// The value the input element should display.
    fn display_value(&self) -> String;

    /// Inline validation helper text, if any.
    fn helper_text(&self) -> Option<&'static str>;

    /// The transient save indicator.
    fn indicator(&self) -> Indicator;
}

#[async_trait]
impl AutosaveField for PropertySyncController<String> {
    fn on_input(&mut self, raw: String) {
        PropertySyncController::on_input(self, raw);
    }

    async fn poll(&mut self) -> Option<SaveOutcome> {
        PropertySyncController::poll(self).await
    }

    fn display_value(&self) -> String {
        self.value().clone()
    }

    fn helper_text(&self) -> Option<&'static str> {
        PropertySyncController::helper_text(self)
    }

    fn indicator(&self) -> Indicator {
        PropertySyncController::indicator(self)
    }
}
