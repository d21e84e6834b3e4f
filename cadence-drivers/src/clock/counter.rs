//! Time source over two hardware counters
//!
//! Each servo keeps its own counter so pausing one servo freezes only
//! that servo's motion deadlines.

use cadence_core::state::Actor;
use cadence_core::traits::TimeSource;
use cadence_hal::Counter;

/// One millisecond counter per servo
pub struct CounterClock<A, B> {
    first: A,
    second: B,
}

impl<A: Counter, B: Counter> CounterClock<A, B> {
    /// Create a clock from two counters; their run state is left as is
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Counter, B: Counter> TimeSource for CounterClock<A, B> {
    fn now(&self, actor: Actor) -> u16 {
        match actor {
            Actor::First => self.first.count(),
            Actor::Second => self.second.count(),
        }
    }

    fn start(&mut self, actor: Actor) {
        match actor {
            Actor::First => self.first.start(),
            Actor::Second => self.second.start(),
        }
    }

    fn stop(&mut self, actor: Actor) {
        match actor {
            Actor::First => self.first.stop(),
            Actor::Second => self.second.stop(),
        }
    }
}
