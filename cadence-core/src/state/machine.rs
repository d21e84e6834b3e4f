//! Servo run status state machine
//!
//! A servo is created idle, runs on `Begin`/`Continue`, pauses on `Pause`
//! and goes back to idle when its recipe finishes. It is never running
//! and paused at the same time.

use super::events::ServoEvent;

/// Run status of one servo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoStatus {
    /// No recipe in progress; cursor at the start of the current recipe
    #[default]
    Idle,
    /// Recipe instructions are consumed whenever the servo is ready
    Running,
    /// Recipe suspended by the operator; cursor preserved
    Paused,
}

impl ServoStatus {
    /// Check if the interpreter may consume instructions
    pub fn is_running(&self) -> bool {
        matches!(self, ServoStatus::Running)
    }

    /// Process an event and return the next status
    pub fn transition(self, event: ServoEvent) -> Self {
        use ServoEvent::*;
        use ServoStatus::*;

        match (self, event) {
            // Begin always (re)starts
            (_, Begin) => Running,

            (Idle, Continue) => Running,
            (Paused, Continue) => Running,

            (Running, Pause) => Paused,

            (Running, RecipeFinished) => Idle,

            // Default: stay in current status
            _ => self,
        }
    }
}
