//! Per-stream state that must survive block boundaries.
//!
//! Each stream identifier owns a phase accumulator, its current sample
//! interval and the descriptor last announced downstream. The map itself and
//! every entry sit behind their own locks, so blocks of different streams can
//! be processed from different tasks without interfering. Blocks of one
//! stream are expected to be processed one at a time, in order.

use crate::core::{SampleMode, StreamSri};
use crate::engine::state::StreamLifecycle;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
struct StreamEntry {
    phase: f64,
    xdelta: f64,
    /// Authoritative descriptor forwarded downstream
    announced: Option<StreamSri>,
    needs_announce: bool,
}

impl StreamEntry {
    fn new() -> Self {
        Self {
            phase: 0.0,
            xdelta: 0.0,
            announced: None,
            needs_announce: true,
        }
    }
}

#[derive(Debug, Default)]
struct StreamTable {
    active: HashMap<String, Arc<Mutex<StreamEntry>>>,
    /// Most recent identifier torn down by end-of-stream
    last_closed: Option<String>,
}

/// What the processing cycle needs to mix one block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPlan {
    /// Validated sample interval in seconds
    pub interval: f64,
    /// Phase at which this block's carrier starts
    pub phase: f64,
    /// Descriptor to forward before this block's data, if any
    pub announce: Option<StreamSri>,
}

#[derive(Debug, Default)]
pub struct StreamTracker {
    table: Mutex<StreamTable>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StreamTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a block's descriptor and plan its mixing.
    ///
    /// An invalid sample interval leaves any existing state untouched and
    /// does not activate an unseen stream. If the faulted block carried a
    /// changed descriptor, the next valid block is announced again.
    pub fn begin_block(&self, stream_id: &str, sri: &StreamSri, sri_changed: bool) -> Result<BlockPlan> {
        let interval = match sri.sample_interval() {
            Ok(interval) => interval,
            Err(e) => {
                if sri_changed {
                    self.mark_changed(stream_id);
                }
                return Err(e);
            }
        };

        let entry = self.activate(stream_id);
        let mut state = lock(&entry);
        state.xdelta = interval;

        let announce = if state.needs_announce || sri_changed {
            let mut forwarded = sri.clone();
            forwarded.mode = SampleMode::Complex;
            state.announced = Some(forwarded.clone());
            state.needs_announce = false;
            Some(forwarded)
        } else {
            None
        };

        Ok(BlockPlan {
            interval,
            phase: state.phase,
            announce,
        })
    }

    /// Force the next valid block of an active stream to re-announce its
    /// descriptor. Used when a block carrying a changed descriptor is dropped.
    pub fn mark_changed(&self, stream_id: &str) {
        if let Some(entry) = self.entry(stream_id) {
            lock(&entry).needs_announce = true;
        }
    }

    /// Record the phase reached by a mixed block, or tear the stream down on end-of-stream
    pub fn finish_block(&self, stream_id: &str, next_phase: f64, eos: bool) {
        if eos {
            self.close(stream_id);
            return;
        }
        if let Some(entry) = self.entry(stream_id) {
            lock(&entry).phase = next_phase;
        }
    }

    /// Discard a stream's state. Returns false if the stream was not active.
    pub fn close(&self, stream_id: &str) -> bool {
        let mut table = lock(&self.table);
        if table.active.remove(stream_id).is_some() {
            table.last_closed = Some(stream_id.to_string());
            debug!(stream_id, "stream closed");
            true
        } else {
            false
        }
    }

    pub fn lifecycle(&self, stream_id: &str) -> StreamLifecycle {
        let table = lock(&self.table);
        if table.active.contains_key(stream_id) {
            StreamLifecycle::Active
        } else if table.last_closed.as_deref() == Some(stream_id) {
            StreamLifecycle::Closed
        } else {
            StreamLifecycle::Unseen
        }
    }

    pub fn phase(&self, stream_id: &str) -> Option<f64> {
        self.entry(stream_id).map(|entry| lock(&entry).phase)
    }

    pub fn sample_interval(&self, stream_id: &str) -> Option<f64> {
        self.entry(stream_id).map(|entry| lock(&entry).xdelta)
    }

    pub fn announced_sri(&self, stream_id: &str) -> Option<StreamSri> {
        self.entry(stream_id).and_then(|entry| lock(&entry).announced.clone())
    }

    pub fn active_streams(&self) -> usize {
        lock(&self.table).active.len()
    }

    fn entry(&self, stream_id: &str) -> Option<Arc<Mutex<StreamEntry>>> {
        lock(&self.table).active.get(stream_id).cloned()
    }

    fn activate(&self, stream_id: &str) -> Arc<Mutex<StreamEntry>> {
        let mut table = lock(&self.table);
        if let Some(entry) = table.active.get(stream_id) {
            return entry.clone();
        }

        let previous = if table.last_closed.as_deref() == Some(stream_id) {
            table.last_closed = None;
            StreamLifecycle::Closed
        } else {
            StreamLifecycle::Unseen
        };
        debug_assert!(previous.can_transition_to(&StreamLifecycle::Active));
        debug!(stream_id, from = previous.name(), "stream activated");

        let entry = Arc::new(Mutex::new(StreamEntry::new()));
        table.active.insert(stream_id.to_string(), entry.clone());
        entry
    }
}
