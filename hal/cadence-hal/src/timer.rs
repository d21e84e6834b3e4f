//! Millisecond counter abstractions
//!
//! Each servo owns one counter channel. Counters tick once per millisecond,
//! wrap at 65536 and hold their value while stopped.

/// Free-running 16-bit millisecond counter
pub trait Counter {
    /// Start (or resume) counting from the current value
    fn start(&mut self);

    /// Stop counting, holding the current value
    fn stop(&mut self);

    /// Current count in milliseconds, wrapping at 65536
    fn count(&self) -> u16;
}
