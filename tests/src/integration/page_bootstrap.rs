//! # Page Bootstrap
//!
//! Parsing the server-seeded configuration bag and wiring the full set of
//! controllers from it, the way the settings page does at load time.

#[cfg(test)]
mod tests {
    use crate::support::Harness;
    use serde_json::json;
    use settings_sync::{
        CollectionController, NotificationSelectionController, PropertySyncController,
        SaveOutcome, ScopeController, DEBOUNCE_MS,
    };
    use shared_types::{AccountConfig, AccountProperty, Scope, VerificationState};

    fn seeded_bag() -> serde_json::Value {
        json!({
            "displayName": { "name": "displayname", "value": "Jane Doe", "scope": "v2-federated" },
            "emailMap": {
                "primaryEmail": { "name": "email", "value": "jane@example.com", "scope": "v2-federated" },
                "additionalEmails": [
                    { "value": "extra@example.com", "scope": "v2-local", "verified": 2 }
                ],
                "notificationEmail": "extra@example.com"
            },
            "phone": { "name": "phone", "value": "+4930123456", "scope": "v2-local" },
            "location": { "name": "address", "value": "Berlin", "scope": "v2-local" },
            "website": { "name": "website", "value": "", "scope": "v2-private" },
            "twitter": { "name": "twitter", "value": "", "scope": "v2-private" },
            "fediverse": { "name": "fediverse", "value": "", "scope": "v2-private" },
            "organisation": { "name": "organisation", "value": "ACME", "scope": "v2-local" },
            "role": { "name": "role", "value": "Engineer", "scope": "v2-local" },
            "headline": { "name": "headline", "value": "", "scope": "v2-private" },
            "biography": { "name": "biography", "value": "", "scope": "v2-private" },
            "profileEnabled": { "name": "profile_enabled", "value": true, "scope": "v2-local" },
            "avatar": { "scope": "v2-federated", "version": 3, "generated": false },
            "languageMap": {
                "activeLanguage": { "code": "en", "name": "English" },
                "commonLanguages": [{ "code": "de", "name": "Deutsch" }],
                "allLanguages": []
            },
            "localeMap": {
                "activeLocale": { "code": "en_US", "name": "English (US)" },
                "otherLocales": []
            },
            "federationEnabled": true,
            "lookupServerUploadEnabled": false
        })
    }

    #[tokio::test]
    async fn test_controllers_wire_up_from_the_seeded_bag() {
        let config = AccountConfig::from_json(&seeded_bag()).unwrap();
        let h = Harness::new();

        let mut display_name = PropertySyncController::new(
            AccountProperty::DisplayName,
            config.display_name.value.clone(),
            h.deps.clone(),
        );
        let coll =
            CollectionController::from_config(&config.emails.additional_emails, h.deps.clone());
        let notify = NotificationSelectionController::new(
            Some(config.emails.notification_email.clone()),
            h.deps.clone(),
        );
        let scope = ScopeController::new(
            AccountProperty::DisplayName,
            config.display_name.scope,
            config.capabilities,
            h.deps.clone(),
        );

        assert_eq!(display_name.confirmed(), "Jane Doe");
        assert_eq!(coll.entries().len(), 1);
        assert_eq!(
            coll.entries()[0].verification(),
            VerificationState::Verified
        );
        assert_eq!(notify.current(), Some("extra@example.com"));
        assert_eq!(scope.active(), Scope::Federated);
        // Lookup upload is off, so Published never shows up.
        assert!(!scope.is_selectable(Scope::Published));
        assert!(scope.is_selectable(Scope::Federated));

        // The page is immediately editable.
        display_name.on_input("Jane A. Doe".into());
        h.time.advance(DEBOUNCE_MS);
        assert_eq!(display_name.poll().await, Some(SaveOutcome::Confirmed));
        assert_eq!(
            h.save.value("displayname"),
            Some("Jane A. Doe".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_section_fails_parsing() {
        let mut bag = seeded_bag();
        bag.as_object_mut().unwrap().remove("emailMap");
        let err = AccountConfig::from_json(&bag).unwrap_err();
        assert!(err.to_string().contains("emailMap"));
    }
}
