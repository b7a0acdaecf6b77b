//! Frequency-shift component.
//!
//! Each cycle acquires one block, mixes it with a complex exponential at the
//! configured shift frequency and forwards the complex result with the
//! block's timestamp, end-of-stream flag and stream identifier unchanged.
//! Carrier phase continues across blocks of the same stream.

use crate::config::ComponentConfig;
use crate::core::{DataBlock, ProcessingNode, Property, SampleMode, Samples, ServiceStatus};
use crate::dsp;
use crate::engine::{StreamLifecycle, StreamTracker};
use crate::observability::NodeMetrics;
use crate::ports::{InPort, OutPort, WaitMode};
use crate::resilience::FaultPolicy;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{trace, warn};

pub struct FreqShift {
    input: InPort,
    output: OutPort,
    tracker: Arc<StreamTracker>,
    frequency_shift: Property<f64>,
    sample_rate: Property<f64>,
    wait_mode: WaitMode,
    fault_policy: FaultPolicy,
    metrics: Arc<NodeMetrics>,
}

impl FreqShift {
    pub fn new(input: InPort, output: OutPort) -> Self {
        Self::with_config(input, output, &ComponentConfig::default())
    }

    pub fn with_config(input: InPort, output: OutPort, config: &ComponentConfig) -> Self {
        Self {
            input,
            output,
            tracker: Arc::new(StreamTracker::new()),
            frequency_shift: Property::new(config.frequency_shift),
            sample_rate: Property::new(0.0),
            wait_mode: config.wait_mode(),
            fault_policy: config.fault_policy,
            metrics: Arc::new(NodeMetrics::new("freq_shift")),
        }
    }

    /// Handle for reading and updating the shift; takes effect on the next cycle
    pub fn frequency_shift(&self) -> Property<f64> {
        self.frequency_shift.clone()
    }

    /// Reciprocal of the most recent valid sample interval (0 until the first block)
    pub fn sample_rate(&self) -> Property<f64> {
        self.sample_rate.clone()
    }

    pub fn tracker(&self) -> Arc<StreamTracker> {
        self.tracker.clone()
    }

    pub fn metrics(&self) -> Arc<NodeMetrics> {
        self.metrics.clone()
    }

    pub fn wait_mode(&self) -> WaitMode {
        self.wait_mode
    }

    pub fn set_wait_mode(&mut self, wait_mode: WaitMode) {
        self.wait_mode = wait_mode;
    }

    pub fn fault_policy(&self) -> FaultPolicy {
        self.fault_policy
    }

    pub fn set_fault_policy(&mut self, fault_policy: FaultPolicy) {
        self.fault_policy = fault_policy;
    }

    async fn process_block(&mut self, block: &DataBlock, shift: f64) {
        let samples = match block.samples() {
            Ok(samples) => samples,
            Err(e) => {
                warn!(stream_id = %block.stream_id, "{}, dropping block", e);
                self.metrics.record_fault();
                if block.sri_changed {
                    self.tracker.mark_changed(&block.stream_id);
                }
                self.drop_block(block).await;
                return;
            }
        };

        let plan = match self.tracker.begin_block(&block.stream_id, &block.sri, block.sri_changed) {
            Ok(plan) => plan,
            Err(e) => {
                self.metrics.record_fault();
                match self.fault_policy {
                    FaultPolicy::Drop => {
                        warn!(stream_id = %block.stream_id, xdelta = block.sri.xdelta, "{}, dropping block", e);
                        self.drop_block(block).await;
                    }
                    FaultPolicy::PassThrough => {
                        warn!(stream_id = %block.stream_id, xdelta = block.sri.xdelta, "{}, forwarding unmixed", e);
                        self.pass_through(block, &samples).await;
                    }
                }
                return;
            }
        };

        self.sample_rate.set(1.0 / plan.interval);

        let carrier = dsp::generate(plan.interval, shift, plan.phase, samples.len());
        let mixed = dsp::mix(&samples, &carrier.samples);
        let len = mixed.len();

        if let Some(sri) = plan.announce {
            trace!(stream_id = %block.stream_id, xdelta = sri.xdelta, "announcing stream");
            self.output.push_sri(sri).await;
        }
        self.output
            .push_packet(mixed, block.timestamp, block.eos, &block.stream_id)
            .await;

        self.tracker.finish_block(&block.stream_id, carrier.next_phase, block.eos);
        self.metrics.record_block_processed(len);
    }

    /// Discard a faulted block. End-of-stream still closes an active stream
    /// and is forwarded as an empty packet so downstream sees it terminate.
    async fn drop_block(&mut self, block: &DataBlock) {
        if block.eos && self.tracker.close(&block.stream_id) {
            self.output
                .push_packet(Vec::new(), block.timestamp, true, &block.stream_id)
                .await;
        }
    }

    /// Forward a faulted block unmixed; phase state is left as it was.
    async fn pass_through(&mut self, block: &DataBlock, samples: &Samples<'_>) {
        let active = self.tracker.lifecycle(&block.stream_id) == StreamLifecycle::Active;
        if !active || block.sri_changed {
            let mut sri = block.sri.clone();
            sri.mode = SampleMode::Complex;
            self.output.push_sri(sri).await;
        }

        self.output
            .push_packet(samples.to_complex(), block.timestamp, block.eos, &block.stream_id)
            .await;

        if block.eos {
            self.tracker.close(&block.stream_id);
        }
    }
}

#[async_trait]
impl ProcessingNode for FreqShift {
    async fn on_create(&mut self, config: Value) -> Result<()> {
        if let Some(shift) = config["frequency_shift"].as_f64() {
            self.frequency_shift.set(shift);
        }
        if let Some(secs) = config["wait_timeout_secs"].as_f64() {
            self.wait_mode = WaitMode::from_timeout_secs(secs);
        }
        if !config["fault_policy"].is_null() {
            self.fault_policy = serde_json::from_value(config["fault_policy"].clone())
                .context("Invalid fault_policy")?;
        }
        Ok(())
    }

    async fn service(&mut self) -> Result<ServiceStatus> {
        // read once so a concurrent update never lands mid-block
        let shift = self.frequency_shift.get();

        let Some(block) = self.input.get_packet(self.wait_mode).await else {
            self.metrics.record_idle();
            return Ok(ServiceStatus::Noop);
        };

        let start = self.metrics.start_processing();
        self.process_block(&block, shift).await;
        self.metrics.finish_processing(start);

        Ok(ServiceStatus::Normal)
    }
}
