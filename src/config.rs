use crate::error::Error;
use crate::ports::WaitMode;
use crate::resilience::FaultPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings for one frequency-shift component and the loop that drives it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Shift applied to every block, in Hz
    pub frequency_shift: f64,

    /// Acquisition wait: 0 non-blocking, negative blocking, positive bounded (seconds)
    pub wait_timeout_secs: f64,

    pub fault_policy: FaultPolicy,

    /// Depth of the input and output block queues
    pub port_capacity: usize,

    /// Sleep after a cycle that found no data
    pub noop_delay_ms: u64,

    /// Grace period for the service loop to exit on stop
    pub stop_timeout_ms: u64,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            frequency_shift: 0.0,
            wait_timeout_secs: 0.1,
            fault_policy: FaultPolicy::Drop,
            port_capacity: 16,
            noop_delay_ms: 100,
            stop_timeout_ms: 1000,
        }
    }
}

impl ComponentConfig {
    pub fn from_json(config: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(config)
            .context("Failed to deserialize component config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .context(format!("Failed to read config from {:?}", path))?;
        let value: Value = serde_json::from_str(&json)
            .context(format!("Failed to parse config in {:?}", path))?;
        Self::from_json(value)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.frequency_shift.is_finite() {
            return Err(Error::Config(format!(
                "frequency_shift must be finite, got {}",
                self.frequency_shift
            )));
        }
        if self.port_capacity == 0 {
            return Err(Error::Config("port_capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn wait_mode(&self) -> WaitMode {
        WaitMode::from_timeout_secs(self.wait_timeout_secs)
    }

    pub fn noop_delay(&self) -> Duration {
        Duration::from_millis(self.noop_delay_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = ComponentConfig::from_json(serde_json::json!({
            "frequency_shift": 250.0
        }))
        .unwrap();

        assert_eq!(config.frequency_shift, 250.0);
        assert_eq!(config.fault_policy, FaultPolicy::Drop);
        assert_eq!(config.wait_mode(), WaitMode::Bounded(Duration::from_millis(100)));
        assert_eq!(config.port_capacity, 16);
    }

    #[test]
    fn test_oversized_wait_timeout_means_blocking() {
        let config = ComponentConfig::from_json(serde_json::json!({
            "wait_timeout_secs": 1e20
        }))
        .unwrap();

        assert_eq!(config.wait_mode(), WaitMode::Blocking);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ComponentConfig::from_json(serde_json::json!({ "port_capacity": 0 }));
        assert!(result.is_err());
    }
}
