use std::io;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use wordfreq_core::SortKey;
use wordfreq_engine::{EngineHandle, EngineSettings, EngineState, TextSource};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Text source that takes long enough for mid-flight requests to land.
struct SlowSource {
    text: String,
    delay: Duration,
}

impl SlowSource {
    fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            delay: Duration::from_millis(300),
        })
    }
}

#[async_trait]
impl TextSource for SlowSource {
    async fn text(&self) -> io::Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(self.text.clone())
    }
}

fn drain_until(rx: &Receiver<EngineState>, target: &EngineState) -> Vec<EngineState> {
    let mut seen = Vec::new();
    loop {
        let state = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("state before timeout");
        seen.push(state.clone());
        if state == *target {
            return seen;
        }
    }
}

fn assert_quiet(rx: &Receiver<EngineState>) {
    assert_eq!(rx.recv_timeout(Duration::from_millis(250)).ok(), None);
}

#[test]
fn text_change_mid_flight_cancels_and_restarts() {
    init_logging();
    let engine = EngineHandle::new(SlowSource::new("one one"), EngineSettings::default());
    let rx = engine.states().subscribe();

    engine.request_load();
    drain_until(&rx, &EngineState::CountingWords);
    engine.set_text_source(Arc::new("two two three".to_string()));

    // The in-flight run acknowledges the cancellation before the
    // replacement starts, and the replacement recounts from scratch.
    assert_eq!(
        drain_until(&rx, &EngineState::Finished),
        vec![
            EngineState::Cancelling,
            EngineState::Cancelled,
            EngineState::UpdateStarted,
            EngineState::CountingWords,
            EngineState::BuildingIndex,
            EngineState::UpdatingRows,
            EngineState::Finished,
        ]
    );
    assert_quiet(&rx);

    let rows = engine.rows().get();
    let listed: Vec<(&str, u64)> = rows
        .iter()
        .map(|row| (row.word.as_str(), row.frequency))
        .collect();
    assert_eq!(listed, vec![("two", 2), ("three", 1)]);
}

#[test]
fn sort_change_mid_flight_queues_without_cancelling() {
    init_logging();
    let engine = EngineHandle::new(SlowSource::new("abc abc aaa"), EngineSettings::default());
    let rx = engine.states().subscribe();

    engine.request_load();
    drain_until(&rx, &EngineState::CountingWords);
    engine.set_sort_key(SortKey::Alphabetical);

    // The in-flight run completes normally, then the queued request reruns
    // against the cached frequency map.
    assert_eq!(
        drain_until(&rx, &EngineState::Finished),
        vec![
            EngineState::BuildingIndex,
            EngineState::UpdatingRows,
            EngineState::Finished,
        ]
    );
    assert_eq!(
        drain_until(&rx, &EngineState::Finished),
        vec![
            EngineState::UpdateStarted,
            EngineState::BuildingIndex,
            EngineState::UpdatingRows,
            EngineState::Finished,
        ]
    );
    assert_quiet(&rx);

    let rows = engine.rows().get();
    let words: Vec<&str> = rows.iter().map(|row| row.word.as_str()).collect();
    assert_eq!(words, vec!["aaa", "abc"]);
}

#[test]
fn strictest_queued_request_wins() {
    init_logging();
    let engine = EngineHandle::new(SlowSource::new("one one two"), EngineSettings::default());
    let rx = engine.states().subscribe();

    engine.request_load();
    drain_until(&rx, &EngineState::CountingWords);
    // A cache-reusing request followed by a cache-clearing one must merge
    // into a single clearing replacement that still honors the new key.
    engine.set_sort_key(SortKey::ByLength);
    engine.set_text_source(Arc::new("bb a ccc a".to_string()));

    let tail = drain_until(&rx, &EngineState::Finished);
    assert_eq!(
        tail,
        vec![
            EngineState::Cancelling,
            EngineState::Cancelled,
            EngineState::UpdateStarted,
            EngineState::CountingWords,
            EngineState::BuildingIndex,
            EngineState::UpdatingRows,
            EngineState::Finished,
        ]
    );
    assert_quiet(&rx);

    let rows = engine.rows().get();
    let listed: Vec<(&str, u64)> = rows
        .iter()
        .map(|row| (row.word.as_str(), row.frequency))
        .collect();
    assert_eq!(listed, vec![("a", 2), ("bb", 1), ("ccc", 1)]);
}

#[test]
fn repeated_invalidations_coalesce_into_one_replacement() {
    init_logging();
    let engine = EngineHandle::new(SlowSource::new("first"), EngineSettings::default());
    let rx = engine.states().subscribe();

    engine.request_load();
    drain_until(&rx, &EngineState::CountingWords);
    engine.set_text_source(Arc::new("second".to_string()));
    engine.set_text_source(Arc::new("third third".to_string()));

    let tail = drain_until(&rx, &EngineState::Finished);
    let cancels = tail
        .iter()
        .filter(|state| **state == EngineState::Cancelling)
        .count();
    let starts = tail
        .iter()
        .filter(|state| **state == EngineState::UpdateStarted)
        .count();
    assert_eq!(cancels, 1);
    assert_eq!(starts, 1);
    assert_quiet(&rx);

    let rows = engine.rows().get();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].word, "third");
    assert_eq!(rows[0].frequency, 2);
}
