use ragdoll_core::SyncConfig;
use std::time::Duration;

/// Fixed cosmetic pause between phases so the operator can read the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingController {
    delay: Duration,
}

impl PacingController {
    pub fn new(seconds: f64) -> Self {
        Self {
            delay: seconds_to_duration(seconds),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.pace_delay_seconds)
    }

    pub fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        sleep(self.delay).await;
    }

    pub async fn pause_for(&self, seconds: f64) {
        sleep(seconds_to_duration(seconds)).await;
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// Negative, NaN and out-of-range values become no pause at all.
fn seconds_to_duration(seconds: f64) -> Duration {
    if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}
