use std::time::Duration;

/// How long block acquisition may suspend the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Return immediately if nothing is queued
    NonBlocking,
    /// Suspend until a block arrives or upstream disconnects
    Blocking,
    /// Suspend up to the given duration
    Bounded(Duration),
}

impl WaitMode {
    /// Map a timeout in seconds: zero is non-blocking, negative is blocking,
    /// positive is a bounded wait. NaN is treated as non-blocking, and a
    /// timeout too large for a [`Duration`] as blocking.
    pub fn from_timeout_secs(secs: f64) -> Self {
        if secs < 0.0 {
            WaitMode::Blocking
        } else if secs > 0.0 {
            match Duration::try_from_secs_f64(secs) {
                Ok(timeout) => WaitMode::Bounded(timeout),
                Err(_) => WaitMode::Blocking,
            }
        } else {
            WaitMode::NonBlocking
        }
    }
}

impl Default for WaitMode {
    fn default() -> Self {
        WaitMode::Bounded(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_mapping() {
        assert_eq!(WaitMode::from_timeout_secs(0.0), WaitMode::NonBlocking);
        assert_eq!(WaitMode::from_timeout_secs(-1.0), WaitMode::Blocking);
        assert_eq!(
            WaitMode::from_timeout_secs(0.25),
            WaitMode::Bounded(Duration::from_millis(250))
        );
        assert_eq!(WaitMode::from_timeout_secs(f64::INFINITY), WaitMode::Blocking);
        assert_eq!(WaitMode::from_timeout_secs(f64::NAN), WaitMode::NonBlocking);
    }

    #[test]
    fn test_oversized_timeout_blocks() {
        assert_eq!(WaitMode::from_timeout_secs(1e20), WaitMode::Blocking);
        assert_eq!(WaitMode::from_timeout_secs(f64::MAX), WaitMode::Blocking);
    }
}
