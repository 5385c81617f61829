//! Simulated network latency for the mock collaborators.

use std::time::Duration;

/// Fixed pauses applied before each simulated backend action resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub sign_in: Duration,
    pub sign_up: Duration,
    pub generate: Duration,
    pub load: Duration,
    pub save: Duration,
    pub delete: Duration,
    pub toggle: Duration,
}

impl MockLatency {
    /// Delays matching a slow real backend.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            sign_in: Duration::from_millis(1000),
            sign_up: Duration::from_millis(1000),
            generate: Duration::from_millis(2000),
            load: Duration::from_millis(500),
            save: Duration::from_millis(500),
            delete: Duration::from_millis(300),
            toggle: Duration::from_millis(300),
        }
    }

    /// No delays at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            sign_in: Duration::ZERO,
            sign_up: Duration::ZERO,
            generate: Duration::ZERO,
            load: Duration::ZERO,
            save: Duration::ZERO,
            delete: Duration::ZERO,
            toggle: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
