//! # Autosave Flow
//!
//! End-to-end behavior of one debounced field against the in-memory
//! backend: keystroke coalescing, validation gating, server reconcile,
//! rollback, and the transient indicators.

#[cfg(test)]
mod tests {
    use crate::support::Harness;
    use settings_sync::adapters::testing::RejectingAuthGate;
    use settings_sync::{
        FieldValidator, Indicator, PropertySyncController, SaveOutcome, DEBOUNCE_MS,
        INDICATOR_VISIBLE_MS,
    };
    use shared_types::AccountProperty;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_typing_session_produces_one_save() {
        let h = Harness::new();
        let mut field = PropertySyncController::new(
            AccountProperty::DisplayName,
            "Jane".to_string(),
            h.deps.clone(),
        );

        // A realistic typing burst: every keystroke re-arms the window.
        for (elapsed, text) in [(0, "Jane "), (120, "Jane D"), (240, "Jane Doe")] {
            h.time.set(elapsed);
            field.on_input(text.to_string());
            assert!(field.poll().await.is_none());
        }
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(field.poll().await, Some(SaveOutcome::Confirmed));

        assert_eq!(h.save.save_calls().len(), 1);
        assert_eq!(h.save.value("displayname"), Some("Jane Doe".to_string()));
        assert_eq!(field.confirmed(), "Jane Doe");
        assert_eq!(field.indicator(), Indicator::Success);
    }

    #[tokio::test]
    async fn test_invalid_then_corrected_website() {
        let h = Harness::new();
        let mut field = PropertySyncController::new(
            AccountProperty::Website,
            String::new(),
            h.deps.clone(),
        )
        .with_validator(FieldValidator::Url);

        field.on_input("not a url".into());
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(field.poll().await, Some(SaveOutcome::RejectedLocally));
        assert!(field.helper_text().is_some());
        assert!(h.save.save_calls().is_empty());
        // Validation failure is inline only, never a toast.
        assert!(h.errors.messages().is_empty());

        field.on_input("https://example.com/blog".into());
        assert!(field.helper_text().is_none());
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(field.poll().await, Some(SaveOutcome::Confirmed));
        assert_eq!(
            h.save.value("website"),
            Some("https://example.com/blog".to_string())
        );
    }

    #[tokio::test]
    async fn test_clearing_an_optional_field_saves_empty() {
        let h = Harness::new();
        h.save.seed("phone", "+4930123456");
        let mut field = PropertySyncController::new(
            AccountProperty::Phone,
            "+4930123456".to_string(),
            h.deps.clone(),
        )
        .with_validator(FieldValidator::Phone {
            default_region: Some("DE".into()),
        });

        field.on_input(String::new());
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(field.poll().await, Some(SaveOutcome::Confirmed));
        assert_eq!(h.save.value("phone"), Some(String::new()));
    }

    #[tokio::test]
    async fn test_server_rejection_rolls_back_and_toasts() {
        let h = Harness::new();
        h.save.fail_key("email");
        let mut field = PropertySyncController::new(
            AccountProperty::Email,
            "old@example.com".to_string(),
            h.deps.clone(),
        )
        .with_validator(FieldValidator::Email);

        field.on_input("new@example.com".into());
        h.time.advance(DEBOUNCE_MS);
        assert!(matches!(
            field.poll().await,
            Some(SaveOutcome::RolledBack(_))
        ));

        assert_eq!(field.value(), "old@example.com");
        assert_eq!(field.indicator(), Indicator::Error);
        assert_eq!(h.errors.messages().len(), 1);

        // Error indicator expires like the success one.
        h.time.advance(INDICATOR_VISIBLE_MS);
        assert_eq!(field.indicator(), Indicator::None);
    }

    #[tokio::test]
    async fn test_cancelled_password_prompt_behaves_like_save_failure() {
        let h = Harness::new();
        let mut deps = h.deps.clone();
        deps.gate = Arc::new(RejectingAuthGate);
        let mut field =
            PropertySyncController::new(AccountProperty::Address, "Berlin".to_string(), deps);

        field.on_input("Hamburg".into());
        h.time.advance(DEBOUNCE_MS);
        assert!(matches!(
            field.poll().await,
            Some(SaveOutcome::RolledBack(_))
        ));
        assert_eq!(field.value(), "Berlin");
        assert!(h.save.save_calls().is_empty());
        assert_eq!(h.errors.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_during_error_window_clears_indicator() {
        let h = Harness::new();
        h.save.fail_key("organisation");
        let mut field = PropertySyncController::new(
            AccountProperty::Organisation,
            String::new(),
            h.deps.clone(),
        );

        field.on_input("ACME".into());
        h.time.advance(DEBOUNCE_MS);
        field.poll().await;
        assert_eq!(field.indicator(), Indicator::Error);

        h.save.heal_key("organisation");
        field.on_input("ACME GmbH".into());
        assert_eq!(field.indicator(), Indicator::None);
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(field.poll().await, Some(SaveOutcome::Confirmed));
        assert_eq!(field.indicator(), Indicator::Success);
    }
}
