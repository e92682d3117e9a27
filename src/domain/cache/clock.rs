//! Time source for cache timestamps

use std::fmt::Debug;

/// Supplies the current time in whole seconds since the Unix epoch
pub trait Clock: Send + Sync + Debug {
    fn now_epoch_seconds(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}
