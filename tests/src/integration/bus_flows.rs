//! # Event Flows
//!
//! Domain events wrapped in envelopes, published through the channel
//! registry and received by consumer groups on the in-memory broker.
//!
//! ## Flows Tested:
//!
//! 1. **Login event fan-out**: token claims → `user_login` → two groups
//! 2. **Scan event encoding**: optional fields omitted on the wire
//! 3. **Concurrent producers**: many tasks, one publisher, no lost sends
//! 4. **Shutdown**: held handles fail after `close_all`
//! 5. **Poison message**: undecodable payload surfaces as `Decode`

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use shared_bus::{BrokerError, EventChannelRegistry, InMemoryBroker};
    use shared_types::{
        EventEnvelope, EventTopic, EventType, InventoryEvent, Role, ScanEvent, UserEvent,
    };
    use wh_01_token_service::{SigningSecret, TokenApi, TokenService, TokenServiceConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const RECV_TIMEOUT: Duration = Duration::from_millis(500);

    fn registry() -> (EventChannelRegistry<InMemoryBroker>, InMemoryBroker) {
        let broker = InMemoryBroker::new();
        let registry =
            EventChannelRegistry::new(vec!["kafka-1:9092".to_string()], broker.clone()).unwrap();
        (registry, broker)
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_login_event_reaches_every_group() {
        let (registry, _broker) = registry();
        let tokens = TokenService::new(TokenServiceConfig::new(
            SigningSecret::new("bus-flow-secret").unwrap(),
        ));

        let token = tokens
            .issue_with_default_tier(
                "USR-2024-001",
                "operator",
                Role::WarehouseOperator,
                Duration::from_secs(60),
            )
            .unwrap();
        let claims = tokens.validate(&token).unwrap();

        let topic = EventType::UserLogin.topic().as_str();
        let analytics = registry.subscriber(topic, "analytics").unwrap();
        let audit = registry.subscriber(topic, "audit").unwrap();

        let envelope = EventEnvelope::wrap(
            EventType::UserLogin,
            UserEvent {
                user_id: claims.user_id.clone(),
                action: "login".to_string(),
                changes: serde_json::Map::new(),
            },
        );
        registry
            .publisher(envelope.topic().as_str())
            .unwrap()
            .publish(&envelope)
            .await
            .unwrap();

        for subscriber in [&analytics, &audit] {
            let (received, message) = timeout(RECV_TIMEOUT, subscriber.recv_envelope::<UserEvent>())
                .await
                .expect("timeout")
                .unwrap();
            assert_eq!(received, envelope);
            assert_eq!(message.key, envelope.event_id.to_string().into_bytes());
            subscriber.commit(&message).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_scan_event_wire_format() {
        let (registry, _broker) = registry();
        let subscriber = registry.subscriber(EventTopic::Scan.as_str(), "validator").unwrap();
        let publisher = registry.publisher(EventTopic::Scan.as_str()).unwrap();

        let envelope = EventEnvelope::wrap(
            EventType::BarcodeScanned,
            ScanEvent {
                scan_id: "SCN-1".to_string(),
                user_id: "USR-3".to_string(),
                item_id: None,
                scan_type: "barcode".to_string(),
                result: "unknown_item".to_string(),
                location: "DOCK-2".to_string(),
                device_id: "HH-17".to_string(),
            },
        );
        publisher.publish(&envelope).await.unwrap();

        let message = timeout(RECV_TIMEOUT, subscriber.recv())
            .await
            .expect("timeout")
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&message.value).unwrap();

        assert_eq!(json["eventType"], "barcode_scanned");
        assert_eq!(json["data"]["scanId"], "SCN-1");
        assert!(json["data"].get("itemId").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_producers_share_one_publisher() {
        let (registry, broker) = registry();
        let registry = Arc::new(registry);
        let topic = EventTopic::Inventory.as_str();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    let envelope = EventEnvelope::wrap(
                        EventType::StockUpdated,
                        InventoryEvent {
                            item_id: format!("ITEM-{i}"),
                            action: "stock_updated".to_string(),
                            changes: serde_json::Map::new(),
                            user_id: "USR-1".to_string(),
                        },
                    );
                    registry
                        .publisher(topic)
                        .unwrap()
                        .publish(&envelope)
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(registry.publisher_count(), 1);
        assert_eq!(broker.published(topic), 16);
    }

    #[tokio::test]
    async fn test_held_handles_fail_after_close_all() {
        let (registry, _broker) = registry();
        let publisher = registry.publisher(EventTopic::Shipment.as_str()).unwrap();
        let subscriber = registry
            .subscriber(EventTopic::Shipment.as_str(), "notifier")
            .unwrap();

        let report = registry.close_all().await;
        assert_eq!(report.attempted, 2);
        assert!(report.is_clean());

        assert!(matches!(
            publisher.send(b"k", b"v").await,
            Err(BrokerError::Closed { .. })
        ));
        assert!(matches!(
            timeout(RECV_TIMEOUT, subscriber.recv()).await.expect("timeout"),
            Err(BrokerError::Closed { .. })
        ));
        assert!(matches!(
            registry.publisher(EventTopic::Shipment.as_str()),
            Err(BrokerError::RegistryClosed)
        ));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_decode_error() {
        let (registry, _broker) = registry();
        let topic = EventTopic::Inventory.as_str();
        let subscriber = registry.subscriber(topic, "indexer").unwrap();

        registry
            .publisher(topic)
            .unwrap()
            .send(b"poison", b"{not json")
            .await
            .unwrap();

        assert!(matches!(
            timeout(RECV_TIMEOUT, subscriber.recv_envelope::<InventoryEvent>())
                .await
                .expect("timeout"),
            Err(BrokerError::Decode(_))
        ));
    }
}
