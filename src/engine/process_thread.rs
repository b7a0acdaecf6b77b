use crate::core::{ProcessingNode, ServiceStatus};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Drives a node's service function on a dedicated tokio task.
///
/// After a `Normal` cycle the node is invoked again immediately; after a
/// `Noop` cycle the loop sleeps for the configured delay. Dropping the
/// thread without calling [`ProcessThread::stop`] also ends the loop at the
/// next cycle boundary.
pub struct ProcessThread<N> {
    handle: JoinHandle<Result<N>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl<N: ProcessingNode + 'static> ProcessThread<N> {
    pub fn start(node: N, noop_delay: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(service_loop(node, noop_delay, shutdown_rx));
        Self { handle, shutdown_tx }
    }

    /// True once the loop has exited, either stopped or failed
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal shutdown and hand the node back once the current cycle completes.
    ///
    /// A cycle blocked in acquisition longer than `timeout` is aborted; any
    /// block it held is released as the task unwinds.
    pub async fn stop(self, timeout: Duration) -> Result<N> {
        let _ = self.shutdown_tx.send(());

        let mut handle = self.handle;
        match tokio::time::timeout(timeout, &mut handle).await {
            Ok(joined) => {
                let mut node = joined.context("Service loop panicked")??;
                node.on_destroy().await?;
                Ok(node)
            }
            Err(_) => {
                handle.abort();
                Err(anyhow!("Service loop did not stop within {:?}", timeout))
            }
        }
    }
}

async fn service_loop<N: ProcessingNode>(
    mut node: N,
    noop_delay: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<N> {
    loop {
        if !matches!(shutdown_rx.try_recv(), Err(broadcast::error::TryRecvError::Empty)) {
            break;
        }

        match node.service().await {
            Ok(ServiceStatus::Normal) => tokio::task::yield_now().await,
            Ok(ServiceStatus::Noop) => {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(noop_delay) => {}
                }
            }
            Err(e) => {
                error!(error = %e, "service function failed");
                return Err(e);
            }
        }
    }

    debug!("service loop stopped");
    Ok(node)
}
