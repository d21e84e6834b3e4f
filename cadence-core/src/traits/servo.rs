//! Servo output trait
//!
//! Abstracts the PWM channel pair that positions the two servos.

use crate::motion::Position;
use crate::state::Actor;

/// Trait for the actuator output stage
///
/// Implementations map a discrete [`Position`] to the calibrated
/// duty cycle for that preset and write it to the actor's channel.
/// The servo starts moving as soon as the output changes.
pub trait ServoDriver {
    /// Drive the actor's output to the given position preset
    fn set_output(&mut self, actor: Actor, position: Position);

    /// Take the actor whose output last failed to update, clearing it
    ///
    /// Outputs that cannot fail keep the default.
    fn take_fault(&mut self) -> Option<Actor> {
        None
    }
}
