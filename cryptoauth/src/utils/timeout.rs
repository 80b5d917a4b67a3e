// cryptoauth-rs/cryptoauth/src/utils/timeout.rs
//! Millisecond helpers. Device timing tables are in ms; `std` wants `Duration`.

use std::time::Duration;

/// Datasheet milliseconds as a `Duration`.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Block the current thread. Used by the default `Physical::delay_ms`.
pub fn sleep_ms(delay: u32) {
    if delay > 0 {
        std::thread::sleep(ms(u64::from(delay)));
    }
}
