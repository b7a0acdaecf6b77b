use anyhow::Result;
use freqshift::buffers::BufferPool;
use freqshift::core::{SampleMode, StreamSri, Timestamp};
use freqshift::engine::ProcessThread;
use freqshift::nodes::FreqShift;
use freqshift::observability::{MetricsCollector, PipelineMonitor};
use freqshift::ports::{input, output, StreamMessage};
use freqshift::ComponentConfig;
use std::f64::consts::TAU;
use tracing::info;

const SAMPLE_RATE: f64 = 8000.0;
const TONE_HZ: f64 = 1000.0;
const BLOCK_LEN: usize = 256;
const BLOCKS: usize = 4;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Optional JSON config path; otherwise shift the tone up by 250 Hz
    let config = match std::env::args().nth(1) {
        Some(path) => ComponentConfig::load(path)?,
        None => ComponentConfig {
            frequency_shift: 250.0,
            ..ComponentConfig::default()
        },
    };
    info!(shift_hz = config.frequency_shift, "starting frequency shift demo");

    let pool = BufferPool::new(BLOCK_LEN);
    let (mut upstream, in_port) = input::channel("dataFloat_in", config.port_capacity, pool.clone());
    let (out_port, mut downstream) = output::channel("dataFloat_out", config.port_capacity);

    let node = FreqShift::with_config(in_port, out_port, &config);
    let mut collector = MetricsCollector::new();
    collector.register(node.metrics());
    let monitor = PipelineMonitor::new(collector);

    let thread = ProcessThread::start(node, config.noop_delay());

    let consumer = tokio::spawn(async move {
        while let Some(message) = downstream.recv().await {
            match message {
                StreamMessage::Sri(sri) => {
                    info!(stream_id = %sri.stream_id, mode = ?sri.mode, xdelta = sri.xdelta, "stream announced");
                }
                StreamMessage::Packet(block) => {
                    let power = block.data.iter().map(|s| s.norm_sqr()).sum::<f32>()
                        / block.data.len().max(1) as f32;
                    info!(len = block.data.len(), power, eos = block.eos, "block received");
                    if block.eos {
                        break;
                    }
                }
            }
        }
    });

    upstream.push_sri(
        StreamSri::new("tone")
            .with_xdelta(1.0 / SAMPLE_RATE)
            .with_mode(SampleMode::Real),
    );
    for b in 0..BLOCKS {
        let data: Vec<f32> = (0..BLOCK_LEN)
            .map(|k| {
                let n = (b * BLOCK_LEN + k) as f64;
                (TAU * TONE_HZ * n / SAMPLE_RATE).cos() as f32
            })
            .collect();
        upstream
            .push_packet(&data, Timestamp::now(), b + 1 == BLOCKS, "tone")
            .await?;
    }

    consumer.await?;
    thread.stop(config.stop_timeout()).await?;

    println!("{}", monitor.generate_report());
    println!("Buffers outstanding: {}", pool.outstanding());
    Ok(())
}
