// Engine lifecycle: background refresh loop, event channel, shutdown.

mod common;

use common::{raw_booking, ScriptedSource};
use meetingflow_core::config::EngineConfig;
use meetingflow_core::engine::Engine;
use meetingflow_core::events::EngineEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

fn fast_config() -> EngineConfig {
    EngineConfig {
        debounce: Duration::from_millis(10),
        refresh_interval: Duration::from_millis(50),
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn test_started_engine_publishes_list_and_feed_events() {
    let source = Arc::new(ScriptedSource::new(1, 10));
    source.set_bookings("mt-0", vec![raw_booking("bk-1", 5)]);

    let (tx, mut rx) = mpsc::channel(32);
    let engine = Engine::new(source, fast_config(), Some(tx)).unwrap();
    engine.start();

    let mut saw_list = false;
    let mut saw_feed = false;
    while !(saw_list && saw_feed) {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("engine should publish events")
            .expect("channel should stay open");
        match event {
            EngineEvent::ListUpdated(snapshot) => {
                assert_eq!(snapshot.items.len(), 10);
                saw_list = true;
            }
            EngineEvent::FeedRebuilt {
                entries,
                failed_parents,
            } => {
                assert_eq!(failed_parents, 0);
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].booking.id, "bk-1");
                saw_feed = true;
            }
            EngineEvent::EngineError(message) => panic!("unexpected error: {}", message),
        }
    }

    engine.stop();
}

#[tokio::test]
async fn test_stop_terminates_the_refresh_loop() {
    let source = Arc::new(ScriptedSource::new(1, 10));
    let (tx, mut rx) = mpsc::channel(32);
    let engine = Engine::new(source.clone(), fast_config(), Some(tx)).unwrap();

    engine.start();
    sleep(Duration::from_millis(120)).await;
    engine.stop();

    // Let any pass that was mid-flight finish, then drain.
    sleep(Duration::from_millis(120)).await;
    while rx.try_recv().is_ok() {}
    let calls_after_stop = source.page_call_count();

    sleep(Duration::from_millis(150)).await;
    assert_eq!(source.page_call_count(), calls_after_stop);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_records_changed_signal_rebuilds_immediately() {
    let source = Arc::new(ScriptedSource::new(1, 10));
    source.set_bookings("mt-3", vec![raw_booking("bk-9", 12)]);

    let (tx, mut rx) = mpsc::channel(32);
    let engine = Engine::new(source.clone(), fast_config(), Some(tx)).unwrap();

    // No background loop running; the signal alone must do a full pass.
    engine.notify_records_changed().await.unwrap();

    assert_eq!(engine.list.snapshot().await.items.len(), 10);
    let feed = engine.feed.feed().await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].parent_id, "mt-3");

    let mut saw_feed_event = false;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, EngineEvent::FeedRebuilt { .. }) {
            saw_feed_event = true;
        }
    }
    assert!(saw_feed_event);
}

#[tokio::test]
async fn test_engine_rejects_invalid_configuration() {
    let source = Arc::new(ScriptedSource::new(1, 10));
    let config = EngineConfig {
        api_base: "not a url".to_string(),
        ..EngineConfig::default()
    };

    assert!(Engine::new(source, config, None).is_err());
}
