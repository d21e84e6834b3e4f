//! Owned aggregate of both servo states

use super::actor::{Actor, SERVO_COUNT};
use super::servo::ServoState;

/// Both servo records, indexed by [`Actor`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoBank {
    servos: [ServoState; SERVO_COUNT],
}

impl ServoBank {
    /// Create a bank with both servos idle at home
    pub const fn new() -> Self {
        Self {
            servos: [ServoState::new(), ServoState::new()],
        }
    }

    /// State of one servo
    pub fn get(&self, actor: Actor) -> &ServoState {
        &self.servos[actor.index()]
    }

    /// Mutable state of one servo
    pub fn get_mut(&mut self, actor: Actor) -> &mut ServoState {
        &mut self.servos[actor.index()]
    }

    /// Check if at least one servo is running a recipe
    pub fn any_running(&self) -> bool {
        self.servos.iter().any(ServoState::is_running)
    }
}
