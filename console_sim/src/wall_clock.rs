use std::time::Instant;

use led_control::bsp::clock::Clock;

/// Millisecond clock backed by the monotonic clock of the OS. Truncation
/// to u32 makes it wrap around like a firmware millisecond timer.
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    /// Factory function to create a wall clock
    pub fn create() -> Self {
        return WallClock {
            start: Instant::now(),
        };
    }
}

impl Clock for WallClock {
    fn now_millis(&self) -> u32 {
        return self.start.elapsed().as_millis() as u32;
    }
}
