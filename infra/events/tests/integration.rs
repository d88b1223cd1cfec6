use machex_event_bus::*;

#[derive(Clone, Debug, PartialEq)]
struct TestEvent(u64);

#[tokio::test]
async fn test_event_flow() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    let event = TestEvent(42);
    bus.publish(event.clone()).unwrap();

    let received = rx.recv().await.unwrap();
    assert_eq!(*received, event);
}

#[tokio::test]
async fn test_publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    // Channel is created lazily; sending into it with no subscribers reports 0.
    // A later subscriber must not see the earlier event.
    let mut rx = bus.subscribe::<TestEvent>().unwrap();
    drop(rx);

    let delivered = bus.publish(TestEvent(1)).unwrap();
    assert_eq!(delivered, 0);

    rx = bus.subscribe::<TestEvent>().unwrap();
    bus.publish(TestEvent(2)).unwrap();
    assert_eq!(rx.recv().await.unwrap().0, 2);
}

#[tokio::test]
async fn test_receiver_lagged_recovery() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<TestEvent>(capacity).unwrap();

    let total_messages = 100;
    for i in 0..total_messages {
        bus.publish(TestEvent(i)).unwrap();
    }

    let first_received = rx.recv_event().await.expect("receiver should recover from lag");

    assert!(
        first_received.0 >= (total_messages - capacity as u64),
        "Should have skipped to the fresh tail of the buffer. Expected >= {}, got {}",
        total_messages - capacity as u64,
        first_received.0
    );

    let second_received = rx.recv_event().await.expect("Should continue receiving");
    assert_eq!(second_received.0, first_received.0 + 1);
}

#[tokio::test]
async fn test_zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<TestEvent>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}

#[tokio::test]
async fn test_multiple_subscribers_fan_out() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<TestEvent>().unwrap();
    let mut rx2 = bus.subscribe::<TestEvent>().unwrap();

    let delivered = bus.publish(TestEvent(7)).unwrap();
    assert_eq!(delivered, 2);

    assert_eq!(rx1.recv().await.unwrap().0, 7);
    assert_eq!(rx2.recv().await.unwrap().0, 7);
}

#[tokio::test]
async fn test_shutdown_closes_channels() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    assert_eq!(bus.shutdown(), 1);

    assert!(rx.recv_event().await.is_none(), "receiver should observe channel closure");
}
