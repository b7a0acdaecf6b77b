use crate::buffers::BufferPool;
use crate::core::{DataBlock, StreamSri, Timestamp};
use super::WaitMode;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::trace;

/// Create a connected upstream sender and input port
pub fn channel(name: impl Into<String>, capacity: usize, pool: BufferPool) -> (StreamSender, InPort) {
    let (tx, rx) = mpsc::channel(capacity);
    let sender = StreamSender {
        tx,
        pool,
        streams: HashMap::new(),
    };
    let port = InPort {
        name: name.into(),
        rx,
    };
    (sender, port)
}

#[derive(Debug)]
struct SenderStream {
    sri: StreamSri,
    changed: bool,
}

/// Upstream side of an input port.
///
/// Keeps the current descriptor of every open stream and stamps it onto each
/// packet, flagging the first packet after a descriptor change.
pub struct StreamSender {
    tx: mpsc::Sender<DataBlock>,
    pool: BufferPool,
    streams: HashMap<String, SenderStream>,
}

impl StreamSender {
    pub fn push_sri(&mut self, sri: StreamSri) {
        self.streams.insert(
            sri.stream_id.clone(),
            SenderStream { sri, changed: true },
        );
    }

    /// Queue one block, waiting for space if the port is full
    pub async fn push_packet(
        &mut self,
        data: &[f32],
        timestamp: Timestamp,
        eos: bool,
        stream_id: &str,
    ) -> Result<()> {
        let stream = self
            .streams
            .entry(stream_id.to_string())
            .or_insert_with(|| SenderStream {
                sri: StreamSri::new(stream_id),
                changed: true,
            });

        let sri = stream.sri.clone();
        let sri_changed = stream.changed;
        stream.changed = false;
        if eos {
            self.streams.remove(stream_id);
        }

        let mut buffer = self.pool.get();
        buffer.extend_from_slice(data);

        let block = DataBlock {
            data: buffer,
            sri,
            sri_changed,
            timestamp,
            eos,
            stream_id: stream_id.to_string(),
        };

        self.tx
            .send(block)
            .await
            .map_err(|_| anyhow!("Input port closed for stream {}", stream_id))
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }
}

/// Receiving side of a block stream
pub struct InPort {
    name: String,
    rx: mpsc::Receiver<DataBlock>,
}

impl InPort {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquire the next block, or `None` if none arrived within `wait`.
    ///
    /// A disconnected upstream also yields `None`. The returned block owns
    /// its storage; dropping it releases the storage back to the pool.
    pub async fn get_packet(&mut self, wait: WaitMode) -> Option<DataBlock> {
        let block = match wait {
            WaitMode::NonBlocking => self.rx.try_recv().ok(),
            WaitMode::Blocking => self.rx.recv().await,
            WaitMode::Bounded(limit) => timeout(limit, self.rx.recv()).await.ok().flatten(),
        };
        if block.is_none() {
            trace!(port = %self.name, "no data available");
        }
        block
    }
}
