//! Cache domain - TTL store abstraction and time source

mod clock;
mod repository;

pub use clock::{Clock, SystemClock};
pub use repository::{CacheEntry, CacheStore, CacheStoreExt};

#[cfg(test)]
pub use clock::mock::ManualClock;
#[cfg(test)]
pub use repository::mock::MockCacheStore;
