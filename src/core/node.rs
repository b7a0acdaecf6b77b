use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Outcome of one processing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// Work was done; invoke again immediately
    Normal,
    /// No data was available; wait before invoking again
    Noop,
}

/// Base trait for components driven by a service loop
#[async_trait]
pub trait ProcessingNode: Send {
    /// Called once when the node is instantiated with config from JSON
    async fn on_create(&mut self, config: Value) -> Result<()>;

    /// Run one acquire/process/emit cycle.
    ///
    /// An `Err` is an unrecoverable internal fault; routine conditions such
    /// as an empty queue or a bad block are reported through the returned
    /// status and logging instead.
    async fn service(&mut self) -> Result<ServiceStatus>;

    /// Called once after the service loop has stopped
    async fn on_destroy(&mut self) -> Result<()> {
        Ok(())
    }
}
