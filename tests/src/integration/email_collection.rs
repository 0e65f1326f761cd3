//! # Additional Email Collection
//!
//! Scenarios across the collection controller and the in-memory backend:
//! create-on-first-save, value-addressed updates and deletes, promote
//! swaps, and the verification lifecycle.

#[cfg(test)]
mod tests {
    use crate::support::Harness;
    use settings_sync::{
        CollectionController, CollectionOutcome, PropertySyncController, DEBOUNCE_MS,
    };
    use shared_types::{AccountProperty, Scope, SeededEmail, VerificationState};

    fn seeded(value: &str, verified: u8) -> SeededEmail {
        SeededEmail {
            value: value.to_string(),
            scope: Scope::Local,
            verified,
        }
    }

    #[tokio::test]
    async fn test_full_entry_lifecycle() {
        let h = Harness::new();
        let mut coll = CollectionController::from_config(&[], h.deps.clone());

        // Create
        let key = coll.add(true).unwrap();
        coll.on_input(key, "extra@example.com".into()).unwrap();
        h.time.advance(DEBOUNCE_MS);
        coll.poll().await;
        assert_eq!(h.save.emails(), vec!["extra@example.com"]);

        // Update addresses the previous value
        coll.on_input(key, "renamed@example.com".into()).unwrap();
        h.time.advance(DEBOUNCE_MS);
        coll.poll().await;
        assert_eq!(h.save.emails(), vec!["renamed@example.com"]);

        // Delete addresses the confirmed value
        coll.remove(key).await.unwrap();
        assert!(h.save.emails().is_empty());
        assert!(coll.entries().is_empty());
    }

    #[tokio::test]
    async fn test_two_entries_are_independent() {
        let h = Harness::new();
        let mut coll = CollectionController::from_config(
            &[seeded("a@example.com", 2), seeded("b@example.com", 0)],
            h.deps.clone(),
        );
        let first = coll.entries()[0].key();
        let second = coll.entries()[1].key();

        coll.on_input(second, "b2@example.com".into()).unwrap();
        h.time.advance(DEBOUNCE_MS);
        let outcomes = coll.poll().await;
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            &outcomes[0],
            CollectionOutcome::Confirmed { key, .. } if *key == second
        ));

        // The untouched entry keeps its verification.
        assert_eq!(
            coll.entry(first).unwrap().verification(),
            VerificationState::Verified
        );
        assert_eq!(h.save.emails(), vec!["a@example.com", "b2@example.com"]);
    }

    #[tokio::test]
    async fn test_editing_resets_verification_and_requires_reverify() {
        let h = Harness::new();
        let mut coll =
            CollectionController::from_config(&[seeded("a@example.com", 2)], h.deps.clone());
        let key = coll.entries()[0].key();

        coll.on_input(key, "a2@example.com".into()).unwrap();
        h.time.advance(DEBOUNCE_MS);
        coll.poll().await;
        assert_eq!(
            coll.entry(key).unwrap().verification(),
            VerificationState::NotVerified
        );

        coll.begin_verification(key).unwrap();
        coll.mark_verified(key).unwrap();
        assert_eq!(
            coll.entry(key).unwrap().verification(),
            VerificationState::Verified
        );
    }

    #[tokio::test]
    async fn test_promote_swaps_server_state() {
        let h = Harness::new();
        h.save.seed("email", "primary@example.com");
        h.save.seed_emails(&["extra@example.com"]);
        let mut coll =
            CollectionController::from_config(&[seeded("extra@example.com", 2)], h.deps.clone());
        let key = coll.entries()[0].key();
        let mut primary = PropertySyncController::new(
            AccountProperty::Email,
            "primary@example.com".to_string(),
            h.deps.clone(),
        );

        coll.promote(key, &mut primary).await.unwrap();
        assert_eq!(h.save.value("email"), Some("extra@example.com".to_string()));
        assert_eq!(h.save.emails(), vec!["primary@example.com"]);
        assert_eq!(primary.confirmed(), "extra@example.com");
    }

    #[tokio::test]
    async fn test_promote_with_empty_primary_consumes_the_entry() {
        let h = Harness::new();
        h.save.seed_emails(&["extra@example.com"]);
        let mut coll =
            CollectionController::from_config(&[seeded("extra@example.com", 2)], h.deps.clone());
        let key = coll.entries()[0].key();
        let mut primary =
            PropertySyncController::new(AccountProperty::Email, String::new(), h.deps.clone());

        coll.promote(key, &mut primary).await.unwrap();
        assert_eq!(h.save.value("email"), Some("extra@example.com".to_string()));
        // The slot write was empty, which deletes the entry server-side.
        assert!(h.save.emails().is_empty());
        assert!(coll.entries().is_empty());
    }

    #[tokio::test]
    async fn test_blank_entry_never_touches_the_server() {
        let h = Harness::new();
        let mut coll = CollectionController::from_config(&[], h.deps.clone());
        let key = coll.add(true).unwrap();

        // Abandoned before any valid input.
        coll.on_input(key, "half-typed".into()).unwrap();
        h.time.advance(DEBOUNCE_MS);
        let outcomes = coll.poll().await;
        assert!(matches!(
            outcomes[0],
            CollectionOutcome::RejectedLocally { .. }
        ));

        coll.remove(key).await.unwrap();
        assert!(h.save.save_calls().is_empty());
        assert!(h.save.delete_calls().is_empty());
    }
}
