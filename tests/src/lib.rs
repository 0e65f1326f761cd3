//! # Settings Sync Test Suite
//!
//! Unified test crate for the flows that span more than one crate:
//!
//! ```text
//! tests/src/integration/
//! ├── autosave_flow.rs       # debounce -> validate -> save -> reconcile
//! ├── email_collection.rs    # additional emails incl. promote and delete
//! ├── scope_federation.rs    # scope menus and optimistic scope changes
//! ├── notification_email.rs  # notification selection and migration
//! ├── bus_events.rs          # cross-section events over the shared bus
//! └── page_bootstrap.rs      # seeded-config parsing into live controllers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p settings-tests
//! cargo test -p settings-tests integration::email_collection::
//! ```

pub mod integration;

/// Shared fixtures for the integration scenarios.
pub mod support {
    use settings_sync::adapters::testing::{NoopAuthGate, RecordingErrorSurface};
    use settings_sync::{InMemorySaveApi, MockTimeSource, SyncDeps};
    use std::sync::Arc;

    /// The wired backend a scenario runs against.
    pub struct Harness {
        pub save: Arc<InMemorySaveApi>,
        pub time: Arc<MockTimeSource>,
        pub errors: Arc<RecordingErrorSurface>,
        pub deps: SyncDeps,
    }

    impl Harness {
        /// Fresh backend at t=0 with a no-op auth gate.
        #[must_use]
        pub fn new() -> Self {
            // Honors RUST_LOG when a scenario needs tracing output.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
            let save = Arc::new(InMemorySaveApi::new());
            let time = Arc::new(MockTimeSource::new(0));
            let errors = Arc::new(RecordingErrorSurface::default());
            let deps = SyncDeps {
                save: save.clone(),
                gate: Arc::new(NoopAuthGate),
                errors: errors.clone(),
                time: time.clone(),
                notifier: None,
            };
            Self {
                save,
                time,
                errors,
                deps,
            }
        }
    }

    impl Default for Harness {
        fn default() -> Self {
            Self::new()
        }
    }
}
