use super::MetricsCollector;

pub struct PipelineMonitor {
    collector: MetricsCollector,
}

impl PipelineMonitor {
    pub fn new(collector: MetricsCollector) -> Self {
        Self { collector }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.collector.snapshot();

        if snapshot.is_empty() {
            return "No nodes registered".to_string();
        }

        let mut ids: Vec<_> = snapshot.keys().collect();
        ids.sort();

        let mut report = String::from("=== Component Metrics ===\n");
        for node_id in ids {
            let metrics = &snapshot[node_id];
            report.push_str(&format!(
                "\n[{}]\n  Blocks: {} ({} samples)\n  Faults: {}\n  Idle cycles: {}\n  Avg Latency: {}μs\n",
                node_id,
                metrics.blocks_processed,
                metrics.samples_processed,
                metrics.faults_count,
                metrics.idle_cycles,
                metrics.avg_latency_us
            ));
        }

        report
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }
}
