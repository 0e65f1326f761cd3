//! # Property Sync Controller
//!
//! One controller per editable field. Owns the field's
//! [`FieldValue`] slots and mediates every edit through the
//! debounce -> validate -> save -> reconcile/rollback pipeline.
//!
//! ## Timing
//!
//! The controller never spawns timers. `on_input` arms a single deadline
//! (trailing-edge debounce: each keystroke replaces the previous one) and
//! the owning section drives the machine by calling [`poll`] from its
//! event loop. Time comes from the injected [`TimeSource`], so tests run
//! against a deterministic clock.
//!
//! ## In-flight saves
//!
//! `poll` holds `&mut self` across the awaited network call, so one
//! controller can never have two saves in flight. The "latest response
//! wins" race of overlapping writes therefore cannot occur per field.
//!
//! [`poll`]: PropertySyncController::poll

use super::errors::SettingsError;
use super::validators;
use crate::ports::outbound::{ChangeNotifier, ErrorSurface, SaveApi, TimeSource};
use crate::ports::AuthGate;
use shared_types::{AccountProperty, FieldValue, PropertyScalar, Timestamp};
use std::sync::Arc;
use tracing::{debug, error};

/// Trailing-edge debounce window after the last keystroke.
pub const DEBOUNCE_MS: u64 = 500;

/// How long the transient checkmark / error indicator stays visible.
pub const INDICATOR_VISIBLE_MS: u64 = 2000;

/// Observable phase of the field state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing pending.
    Idle,
    /// The user edited; the debounce deadline is armed.
    Editing,
    /// A save is in flight.
    Saving,
}

/// Transient save-result indicator as the view should render it.
///
/// Success and error are mutually exclusive and disappear after
/// [`INDICATOR_VISIBLE_MS`]; the next edit clears them immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Nothing to show.
    None,
    /// Checkmark: the last save was confirmed.
    Success,
    /// Error mark: the last save rolled back.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndicatorState {
    None,
    Success { since: Timestamp },
    Error { since: Timestamp },
}

/// Local validation applied before any network call.
///
/// Empty values always pass (the empty string signals a delete for
/// optional single-valued fields); a failing non-empty value aborts the
/// save locally with helper text, no toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidator {
    /// RFC-5322-ish email grammar with the 320-byte limits.
    Email,
    /// Absolute URL.
    Url,
    /// Phone grammar, region-aware when a default region is configured.
    Phone {
        /// Default region for national-format numbers.
        default_region: Option<String>,
    },
    /// Twitter/X handle.
    Twitter,
    /// Fediverse handle (`user@host`).
    Fediverse,
}

impl FieldValidator {
    /// Run the predicate.
    #[must_use]
    pub fn is_valid(&self, raw: &str) -> bool {
        match self {
            Self::Email => validators::validate_email(raw),
            Self::Url => validators::validate_url(raw),
            Self::Phone { default_region } => {
                validators::validate_phone(raw, default_region.as_deref())
            }
            Self::Twitter => validators::validate_twitter(raw),
            Self::Fediverse => validators::validate_fediverse(raw),
        }
    }

    /// Inline helper text shown when the predicate fails.
    #[must_use]
    pub fn helper_text(&self) -> &'static str {
        match self {
            Self::Email => "Please enter a valid email address",
            Self::Url => "Please enter a valid website address",
            Self::Phone { .. } => "Please enter a valid phone number",
            Self::Twitter => "Please enter a valid Twitter handle",
            Self::Fediverse => "Please enter a valid Fediverse handle",
        }
    }
}

/// The outbound dependencies shared by all controllers of one page.
#[derive(Clone)]
pub struct SyncDeps {
    /// The account save endpoint.
    pub save: Arc<dyn SaveApi>,
    /// Password re-confirmation gate.
    pub gate: Arc<dyn AuthGate>,
    /// Toast-style error channel.
    pub errors: Arc<dyn ErrorSurface>,
    /// Clock.
    pub time: Arc<dyn TimeSource>,
    /// Confirmed-change notifier (bus adapter); optional because most
    /// properties have no cross-section listeners.
    pub notifier: Option<Arc<dyn ChangeNotifier>>,
}

/// Result of one driven save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Server confirmed; the value is the new baseline.
    Confirmed,
    /// Save failed; the field was rolled back and an error surfaced.
    RolledBack(SettingsError),
    /// Local validation failed; nothing was sent.
    RejectedLocally,
}

/// Debounce/validate/save/reconcile engine for one field.
pub struct PropertySyncController<T: PropertyScalar> {
    property: AccountProperty,
    field: FieldValue<T>,
    validator: Option<FieldValidator>,
    phase: SyncPhase,
    deadline: Option<Timestamp>,
    indicator: IndicatorState,
    helper_text: Option<&'static str>,
    deps: SyncDeps,
}

impl<T: PropertyScalar> PropertySyncController<T> {
    /// Create a controller seeded with the server-confirmed value.
    pub fn new(property: AccountProperty, server_value: T, deps: SyncDeps) -> Self {
        Self {
            property,
            field: FieldValue::new(server_value),
            validator: None,
            phase: SyncPhase::Idle,
            deadline: None,
            indicator: IndicatorState::None,
            helper_text: None,
            deps,
        }
    }

    /// Attach a local validator.
    #[must_use]
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The property this controller owns.
    pub fn property(&self) -> AccountProperty {
        self.property
    }

    /// The live editor value.
    pub fn value(&self) -> &T {
        self.field.pending()
    }

    /// The last server-confirmed value (rollback target).
    pub fn confirmed(&self) -> &T {
        self.field.initial()
    }

    /// Whether the live value differs from the confirmed one.
    pub fn is_dirty(&self) -> bool {
        self.field.is_dirty()
    }

    /// Observable phase of the state machine.
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Current inline helper text, if local validation failed.
    pub fn helper_text(&self) -> Option<&'static str> {
        self.helper_text
    }

    /// The transient indicator as it should render right now.
    pub fn indicator(&self) -> Indicator {
        let now = self.deps.time.now();
        match self.indicator {
            IndicatorState::Success { since } if now < since + INDICATOR_VISIBLE_MS => {
                Indicator::Success
            }
            IndicatorState::Error { since } if now < since + INDICATOR_VISIBLE_MS => {
                Indicator::Error
            }
            _ => Indicator::None,
        }
    }

    /// Whether the pending value would pass local validation.
    ///
    /// Empty values count as valid (delete signal); fields without a
    /// validator are always valid.
    pub fn is_valid(&self) -> bool {
        let pending = self.field.pending();
        if pending.is_empty_value() {
            return true;
        }
        match &self.validator {
            Some(v) => v.is_valid(&pending.to_wire()),
            None => true,
        }
    }

    /// Record a keystroke: store the pending value and (re)arm the single
    /// debounce deadline. Clears the indicator and stale helper text.
    pub fn on_input(&mut self, raw: T) {
        let now = self.deps.time.now();
        self.field.edit(raw);
        self.deadline = Some(now + DEBOUNCE_MS);
        self.phase = SyncPhase::Editing;
        self.indicator = IndicatorState::None;
        self.helper_text = None;
    }

    /// Whether the debounce deadline has elapsed.
    pub fn is_due(&self) -> bool {
        matches!(self.deadline, Some(d) if self.deps.time.now() >= d)
    }

    /// Drive the state machine.
    ///
    /// Returns `None` while nothing is due. Once the deadline elapsed:
    /// validates locally (aborting with helper text on failure), then runs
    /// the save pipeline and reconciles or rolls back.
    pub async fn poll(&mut self) -> Option<SaveOutcome> {
        if !self.is_due() {
            return None;
        }
        self.deadline = None;
        // Stale validation display from the previous attempt is cleared
        // before each new attempt.
        self.helper_text = None;

        let pending = self.field.pending().clone();
        if let Some(validator) = &self.validator {
            if !pending.is_empty_value() && !validator.is_valid(&pending.to_wire()) {
                debug!(property = %self.property, "Local validation failed, save skipped");
                self.helper_text = Some(validator.helper_text());
                self.phase = SyncPhase::Idle;
                return Some(SaveOutcome::RejectedLocally);
            }
        }

        self.phase = SyncPhase::Saving;
        let outcome = self.save_value(pending).await;
        self.phase = SyncPhase::Idle;
        Some(outcome)
    }

    /// Adopt a value confirmed elsewhere (promote swap, bus reaction) as
    /// the new baseline without issuing a write.
    pub fn adopt_confirmed(&mut self, value: T) {
        self.field.confirm(value);
        self.deadline = None;
        self.phase = SyncPhase::Idle;
    }

    /// The wire key this field saves under.
    ///
    /// Single-valued fields use the property key. Additional-email entries
    /// use the collection key for the first save (create-on-first-save:
    /// the entry does not exist server-side until its first non-empty
    /// save) and previous-value addressing afterwards, because the server
    /// identifies collection entries by value, not by a surrogate id.
    fn save_key(&self) -> String {
        match self.property {
            AccountProperty::AdditionalMail => {
                let previous = self.field.initial().to_wire();
                if previous.is_empty() {
                    self.property.key().to_string()
                } else {
                    format!("{}/{}", self.property.key(), previous)
                }
            }
            p => p.key().to_string(),
        }
    }

    async fn save_value(&mut self, value: T) -> SaveOutcome {
        let key = self.save_key();
        let wire = value.to_wire();

        if !self.deps.gate.confirm().await {
            return self.fail(SettingsError::AuthGateRejected);
        }

        let result = self.deps.save.save(&key, &wire).await;
        match result {
            Ok(response) if response.is_ok() => {
                self.field.confirm(value);
                self.indicator = IndicatorState::Success {
                    since: self.deps.time.now(),
                };
                debug!(property = %self.property, key = %key, "Save confirmed");
                if let Some(notifier) = &self.deps.notifier {
                    notifier.property_confirmed(self.property, &wire).await;
                }
                SaveOutcome::Confirmed
            }
            Ok(response) => self.fail(SettingsError::SaveFailed {
                property: self.property,
                reason: response
                    .message
                    .unwrap_or_else(|| "server returned error status".into()),
            }),
            Err(transport) => self.fail(SettingsError::SaveFailed {
                property: self.property,
                reason: transport.to_string(),
            }),
        }
    }

    /// Rollback to the last confirmed value and surface the failure.
    fn fail(&mut self, cause: SettingsError) -> SaveOutcome {
        self.field.rollback();
        self.indicator = IndicatorState::Error {
            since: self.deps.time.now(),
        };
        let message = cause.to_string();
        self.deps.errors.show_error(&message);
        error!(property = %self.property, cause = %message, "Save failed, field rolled back");
        SaveOutcome::RolledBack(cause)
    }
}
