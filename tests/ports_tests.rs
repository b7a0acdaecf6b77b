use freqshift::buffers::BufferPool;
use freqshift::core::{SampleMode, StreamSri, Timestamp};
use freqshift::ports::{input, output, StreamMessage, WaitMode};
use num_complex::Complex;
use std::time::{Duration, Instant};
use tokio_test::{assert_pending, assert_ready, task};

#[tokio::test]
async fn test_non_blocking_returns_immediately() {
    let (_upstream, mut port) = input::channel("in", 4, BufferPool::new(16));
    assert!(port.get_packet(WaitMode::NonBlocking).await.is_none());
    assert_eq!(port.name(), "in");
}

#[tokio::test]
async fn test_bounded_wait_times_out() {
    let (_upstream, mut port) = input::channel("in", 4, BufferPool::new(16));

    let start = Instant::now();
    let block = port.get_packet(WaitMode::Bounded(Duration::from_millis(30))).await;

    assert!(block.is_none());
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn test_bounded_wait_returns_queued_block() {
    let (mut upstream, mut port) = input::channel("in", 4, BufferPool::new(16));
    upstream.push_packet(&[1.0], Timestamp::default(), false, "s").await.unwrap();

    let block = port.get_packet(WaitMode::Bounded(Duration::from_secs(5))).await;
    assert_eq!(block.unwrap().data.as_slice(), &[1.0]);
}

#[tokio::test]
async fn test_blocking_waits_for_data() {
    let (mut upstream, mut port) = input::channel("in", 4, BufferPool::new(16));

    let mut acquire = task::spawn(port.get_packet(WaitMode::Blocking));
    assert_pending!(acquire.poll());

    upstream.push_packet(&[1.0, 2.0], Timestamp::default(), false, "s").await.unwrap();
    assert!(acquire.is_woken());

    let block = assert_ready!(acquire.poll()).unwrap();
    assert_eq!(block.data.as_slice(), &[1.0, 2.0]);
}

#[tokio::test]
async fn test_blocking_returns_none_when_upstream_gone() {
    let (upstream, mut port) = input::channel("in", 4, BufferPool::new(16));
    drop(upstream);
    assert!(port.get_packet(WaitMode::Blocking).await.is_none());
}

#[tokio::test]
async fn test_sri_changed_flag() {
    let (mut upstream, mut port) = input::channel("in", 8, BufferPool::new(16));

    // packet without a descriptor gets the default one
    upstream.push_packet(&[0.0], Timestamp::default(), false, "s").await.unwrap();
    upstream.push_packet(&[0.0], Timestamp::default(), false, "s").await.unwrap();
    upstream.push_sri(StreamSri::new("s").with_xdelta(0.5).with_mode(SampleMode::Complex));
    upstream.push_packet(&[0.0, 0.0], Timestamp::default(), true, "s").await.unwrap();
    // end-of-stream forgot the descriptor
    upstream.push_packet(&[0.0], Timestamp::default(), false, "s").await.unwrap();

    let first = port.get_packet(WaitMode::NonBlocking).await.unwrap();
    assert!(first.sri_changed);
    assert_eq!(first.sri, StreamSri::new("s"));

    let second = port.get_packet(WaitMode::NonBlocking).await.unwrap();
    assert!(!second.sri_changed);

    let third = port.get_packet(WaitMode::NonBlocking).await.unwrap();
    assert!(third.sri_changed);
    assert_eq!(third.sri.xdelta, 0.5);
    assert!(third.eos);

    let fourth = port.get_packet(WaitMode::NonBlocking).await.unwrap();
    assert!(fourth.sri_changed);
    assert_eq!(fourth.sri.mode, SampleMode::Real);
}

#[tokio::test]
async fn test_dropping_block_releases_buffer() {
    let pool = BufferPool::new(16);
    let (mut upstream, mut port) = input::channel("in", 4, pool.clone());

    upstream.push_packet(&[1.0; 8], Timestamp::default(), false, "s").await.unwrap();
    assert_eq!(pool.outstanding(), 1);

    let block = port.get_packet(WaitMode::NonBlocking).await.unwrap();
    assert_eq!(block.data.len(), 8);
    assert_eq!(pool.outstanding(), 1);

    drop(block);
    assert_eq!(pool.outstanding(), 0);
    assert_eq!(upstream.pool().pool_size(), 1);
}

#[tokio::test]
async fn test_push_to_closed_port_fails() {
    let (mut upstream, port) = input::channel("in", 4, BufferPool::new(16));
    drop(port);
    let result = upstream.push_packet(&[1.0], Timestamp::default(), false, "s").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_output_port_forwards_in_order() {
    let (out_port, mut rx) = output::channel("out", 4);
    let sri = StreamSri::new("s").with_mode(SampleMode::Complex);

    out_port.push_sri(sri.clone()).await;
    out_port
        .push_packet(vec![Complex::new(1.0, 1.0)], Timestamp::new(5.0, 0.0), false, "s")
        .await;

    assert_eq!(rx.recv().await.unwrap(), StreamMessage::Sri(sri));
    match rx.recv().await.unwrap() {
        StreamMessage::Packet(block) => {
            assert_eq!(block.data, vec![Complex::new(1.0, 1.0)]);
            assert_eq!(block.timestamp.as_secs_f64(), 5.0);
        }
        other => panic!("expected packet, got {:?}", other),
    }
}

#[tokio::test]
async fn test_output_port_without_consumer_discards() {
    let (out_port, rx) = output::channel("out", 1);
    drop(rx);
    // must not fail or hang
    out_port.push_packet(vec![Complex::new(0.0, 0.0)], Timestamp::default(), false, "s").await;
    out_port.push_packet(vec![Complex::new(0.0, 0.0)], Timestamp::default(), false, "s").await;
    assert_eq!(out_port.name(), "out");
}
