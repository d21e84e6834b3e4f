//! Servo channel identifiers

/// Number of independently controlled servos
pub const SERVO_COUNT: usize = 2;

/// One of the two servo-motion channels
///
/// The derive order is also the evaluation order inside a scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actor {
    /// Servo 0, driven by the first terminal letter
    First,
    /// Servo 1, driven by the second terminal letter
    Second,
}

impl Actor {
    /// Both actors in evaluation order
    pub const ALL: [Actor; SERVO_COUNT] = [Actor::First, Actor::Second];

    /// Zero-based channel index
    pub const fn index(self) -> usize {
        match self {
            Actor::First => 0,
            Actor::Second => 1,
        }
    }
}

impl core::fmt::Display for Actor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.index())
    }
}
