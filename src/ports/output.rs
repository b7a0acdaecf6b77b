use crate::core::{ComplexBlock, StreamSri, Timestamp};
use num_complex::Complex;
use tokio::sync::mpsc;
use tracing::debug;

/// What an output port forwards downstream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    Sri(StreamSri),
    Packet(ComplexBlock),
}

/// Create an output port and the receiver for its downstream consumer
pub fn channel(name: impl Into<String>, capacity: usize) -> (OutPort, mpsc::Receiver<StreamMessage>) {
    let (tx, rx) = mpsc::channel(capacity);
    (OutPort { name: name.into(), tx }, rx)
}

/// Complex-sample output port.
///
/// A port whose consumer has gone away keeps accepting data and discards it,
/// the same as an unconnected port.
pub struct OutPort {
    name: String,
    tx: mpsc::Sender<StreamMessage>,
}

impl OutPort {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn push_sri(&self, sri: StreamSri) {
        self.forward(StreamMessage::Sri(sri)).await;
    }

    pub async fn push_packet(
        &self,
        data: Vec<Complex<f32>>,
        timestamp: Timestamp,
        eos: bool,
        stream_id: &str,
    ) {
        self.forward(StreamMessage::Packet(ComplexBlock {
            data,
            timestamp,
            eos,
            stream_id: stream_id.to_string(),
        }))
        .await;
    }

    async fn forward(&self, message: StreamMessage) {
        if self.tx.send(message).await.is_err() {
            debug!(port = %self.name, "downstream disconnected, discarding");
        }
    }
}
