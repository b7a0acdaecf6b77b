use freqshift::core::StreamSri;
use freqshift::engine::{StreamLifecycle, StreamTracker};
use std::sync::Arc;
use std::thread;

#[test]
fn test_streams_on_separate_threads_do_not_interfere() {
    let tracker = Arc::new(StreamTracker::new());
    let mut handles = vec![];

    for t in 0..8 {
        let tracker = tracker.clone();
        handles.push(thread::spawn(move || {
            let id = format!("stream-{}", t);
            let sri = StreamSri::new(id.as_str()).with_xdelta(1.0 + t as f64);
            let mut expected = 0.0;
            for _ in 0..500 {
                let plan = tracker.begin_block(&id, &sri, false).unwrap();
                assert_eq!(plan.phase, expected);
                assert_eq!(plan.interval, 1.0 + t as f64);
                expected = (expected + 0.01 * (t + 1) as f64) % 6.0;
                tracker.finish_block(&id, expected, false);
            }
            (id, expected)
        }));
    }

    for handle in handles {
        let (id, expected) = handle.join().unwrap();
        assert_eq!(tracker.phase(&id), Some(expected));
        assert_eq!(tracker.lifecycle(&id), StreamLifecycle::Active);
    }
    assert_eq!(tracker.active_streams(), 8);
}

#[test]
fn test_closing_one_stream_keeps_others() {
    let tracker = StreamTracker::new();
    for id in ["a", "b"] {
        tracker.begin_block(id, &StreamSri::new(id), true).unwrap();
        tracker.finish_block(id, 1.5, false);
    }

    tracker.finish_block("a", 0.0, true);

    assert_eq!(tracker.lifecycle("a"), StreamLifecycle::Closed);
    assert_eq!(tracker.phase("b"), Some(1.5));
    assert_eq!(tracker.active_streams(), 1);
}
