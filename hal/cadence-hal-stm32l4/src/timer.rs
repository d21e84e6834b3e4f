//! Millisecond counters on the embassy time driver
//!
//! The servo deadlines only need a stoppable millisecond count, so each
//! counter accumulates uptime from the embassy time driver instead of
//! owning a hardware timer.

use embassy_time::Instant;

use cadence_hal::Counter;

/// Stoppable millisecond counter
pub struct MillisCounter {
    /// Milliseconds counted in earlier running spans
    accumulated: u64,
    /// Start of the current running span
    running_since: Option<Instant>,
}

impl MillisCounter {
    /// Create a stopped counter at zero
    pub const fn new() -> Self {
        Self {
            accumulated: 0,
            running_since: None,
        }
    }

    fn total_ms(&self) -> u64 {
        let running = self
            .running_since
            .map(|since| since.elapsed().as_millis())
            .unwrap_or(0);
        self.accumulated + running
    }
}

impl Default for MillisCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Counter for MillisCounter {
    fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed().as_millis();
        }
    }

    fn count(&self) -> u16 {
        // Wraps at 65536 like a 16-bit hardware counter
        self.total_ms() as u16
    }
}
