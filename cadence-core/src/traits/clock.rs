//! Per-servo time source
//!
//! Each servo has its own millisecond counter so that motion deadlines of
//! the two axes never share a clock.

use crate::state::Actor;

/// Monotonic per-actor millisecond counter
///
/// Counts wrap at 65536. A stopped counter holds its value and resumes
/// from it when started again.
pub trait TimeSource {
    /// Current tick of the actor's counter
    fn now(&self, actor: Actor) -> u16;

    /// Start (or resume) the actor's counter
    fn start(&mut self, actor: Actor);

    /// Stop the actor's counter
    fn stop(&mut self, actor: Actor);
}
