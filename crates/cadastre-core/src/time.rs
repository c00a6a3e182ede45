//! Wall-clock seam for record-creation timestamps.

use crate::types::Timestamp;

/// Supplies the current time to the registry.
///
/// The registry reads the clock exactly once per successful registration.
/// Production code uses [`SystemTimeSource`]; tests inject a fixed source so
/// timestamps are deterministic.
pub trait TimeSource: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        // The system clock predating 1970 is a misconfiguration; clamp
        // rather than propagate a negative timestamp.
        now.max(0) as Timestamp
    }
}

/// Fixed time source for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub Timestamp);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemTimeSource.now() > 1_577_836_800);
    }

    #[test]
    fn fixed_source_returns_its_value() {
        assert_eq!(FixedTimeSource(42).now(), 42);
    }
}
