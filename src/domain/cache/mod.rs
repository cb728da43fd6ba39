//! Cache domain - Time source and freshness reporting

mod clock;
mod info;

pub use clock::{Clock, SystemClock};
pub use info::CacheInfo;

#[cfg(test)]
pub use clock::mock::ManualClock;
