use std::collections::HashMap;
use std::sync::Arc;
use super::NodeMetrics;

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub node_id: String,
    pub blocks_processed: u64,
    pub samples_processed: u64,
    pub faults_count: u64,
    pub idle_cycles: u64,
    pub avg_latency_us: u64,
}

#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: HashMap<String, Arc<NodeMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, metrics: Arc<NodeMetrics>) {
        self.metrics.insert(metrics.node_id().to_string(), metrics);
    }

    pub fn snapshot(&self) -> HashMap<String, MetricsSnapshot> {
        self.metrics
            .iter()
            .map(|(id, metrics)| {
                (
                    id.clone(),
                    MetricsSnapshot {
                        node_id: metrics.node_id().to_string(),
                        blocks_processed: metrics.blocks_processed(),
                        samples_processed: metrics.samples_processed(),
                        faults_count: metrics.faults_count(),
                        idle_cycles: metrics.idle_cycles(),
                        avg_latency_us: metrics.avg_latency_us(),
                    },
                )
            })
            .collect()
    }

    pub fn get_node_metrics(&self, node_id: &str) -> Option<Arc<NodeMetrics>> {
        self.metrics.get(node_id).cloned()
    }
}
