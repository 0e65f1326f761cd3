//! # Cross-Section Events
//!
//! Confirmed changes flowing from a field controller through the
//! broadcaster onto the shared bus, and arriving at filtered subscribers
//! in other sections.

#[cfg(test)]
mod tests {
    use crate::support::Harness;
    use settings_sync::{ChangeBroadcaster, PropertySyncController, DEBOUNCE_MS};
    use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SettingsEvent};
    use shared_types::AccountProperty;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_confirmed_display_name_reaches_other_sections() {
        let h = Harness::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let mut profile_section =
            bus.subscribe(EventFilter::topics(vec![EventTopic::DisplayName]));

        let mut deps = h.deps.clone();
        deps.notifier = Some(Arc::new(ChangeBroadcaster::new(bus)));
        let mut field =
            PropertySyncController::new(AccountProperty::DisplayName, "Jane".to_string(), deps);

        field.on_input("Jane Doe".into());
        h.time.advance(DEBOUNCE_MS);
        field.poll().await;

        let event = timeout(Duration::from_secs(1), profile_section.recv())
            .await
            .expect("event within timeout")
            .expect("subscription open");
        assert_eq!(
            event,
            SettingsEvent::DisplayNameUpdated {
                value: "Jane Doe".into()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_save_publishes_nothing() {
        let h = Harness::new();
        h.save.fail_key("displayname");
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());

        let mut deps = h.deps.clone();
        deps.notifier = Some(Arc::new(ChangeBroadcaster::new(bus.clone())));
        let mut field =
            PropertySyncController::new(AccountProperty::DisplayName, "Jane".to_string(), deps);

        field.on_input("Jane Doe".into());
        h.time.advance(DEBOUNCE_MS);
        field.poll().await;

        assert!(sub.try_recv().unwrap().is_none());
        assert_eq!(bus.events_published(), 0);
    }

    #[tokio::test]
    async fn test_filtered_subscriber_ignores_other_topics() {
        let h = Harness::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let mut header = bus.subscribe(EventFilter::topics(vec![EventTopic::DisplayName]));

        let mut deps = h.deps.clone();
        deps.notifier = Some(Arc::new(ChangeBroadcaster::new(bus)));
        let mut organisation =
            PropertySyncController::new(AccountProperty::Organisation, String::new(), deps);

        organisation.on_input("ACME".into());
        h.time.advance(DEBOUNCE_MS);
        organisation.poll().await;

        assert!(header.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_event_stream_delivers_profile_toggle() {
        let h = Harness::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let mut stream =
            bus.event_stream(EventFilter::topics(vec![EventTopic::ProfileEnabled]));

        let mut deps = h.deps.clone();
        deps.notifier = Some(Arc::new(ChangeBroadcaster::new(bus)));
        let mut toggle =
            PropertySyncController::new(AccountProperty::ProfileEnabled, true, deps);

        toggle.on_input(false);
        h.time.advance(DEBOUNCE_MS);
        toggle.poll().await;

        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("event within timeout")
            .expect("stream open");
        assert_eq!(event, SettingsEvent::ProfileEnabledUpdated { enabled: false });
    }

    #[tokio::test]
    async fn test_multiple_sections_receive_the_same_event() {
        let h = Harness::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let mut header = bus.subscribe(EventFilter::topics(vec![EventTopic::DisplayName]));
        let mut profile = bus.subscribe(EventFilter::topics(vec![EventTopic::DisplayName]));

        let mut deps = h.deps.clone();
        deps.notifier = Some(Arc::new(ChangeBroadcaster::new(bus)));
        let mut field =
            PropertySyncController::new(AccountProperty::DisplayName, String::new(), deps);

        field.on_input("Jane".into());
        h.time.advance(DEBOUNCE_MS);
        field.poll().await;

        for sub in [&mut header, &mut profile] {
            assert_eq!(
                sub.try_recv().unwrap(),
                Some(SettingsEvent::DisplayNameUpdated {
                    value: "Jane".into()
                })
            );
        }
    }
}
