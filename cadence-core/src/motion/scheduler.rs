//! Non-blocking motion scheduler
//!
//! Converts a position change into a servo output write plus a completion
//! deadline on the actor's own counter. There is no position feedback:
//! a servo is "ready" once the time budgeted for its last move has elapsed.
//!
//! Recipe moves never block. Manual jogs use [`MotionScheduler::jog`], which
//! waits out the move with a blocking delay before returning.

use embedded_hal::delay::DelayNs;

use super::position::{JogDirection, Position};
use crate::config::MotionTiming;
use crate::state::{Actor, MotionDeadline, ServoState};
use crate::traits::{ServoDriver, TimeSource};

/// Which timing budget a move uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveProfile {
    /// Operator-initiated single step
    Jog,
    /// Move issued by a recipe instruction
    Recipe,
}

/// A jog that cannot be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogError {
    /// The servo is already at the preset limit in that direction
    AtLimit {
        position: Position,
        direction: JogDirection,
    },
}

/// Time budget in milliseconds for moving between two presets
///
/// Scales linearly with the number of preset steps crossed.
pub fn calculate_delay(
    timing: &MotionTiming,
    from: Position,
    to: Position,
    profile: MoveProfile,
) -> u16 {
    timing
        .step_ms(profile)
        .saturating_mul(from.steps_to(to) as u16)
}

/// Issues servo moves and tracks when they complete
///
/// Owns the time source and the servo outputs; servo state is passed in
/// per call so each actor's record stays with its owner.
pub struct MotionScheduler<T, S> {
    clock: T,
    servos: S,
    timing: MotionTiming,
}

impl<T: TimeSource, S: ServoDriver> MotionScheduler<T, S> {
    /// Create a scheduler over a time source and servo outputs
    pub fn new(clock: T, servos: S, timing: MotionTiming) -> Self {
        Self {
            clock,
            servos,
            timing,
        }
    }

    /// Configured motion timing
    pub fn timing(&self) -> &MotionTiming {
        &self.timing
    }

    /// Servo outputs
    pub fn servos(&self) -> &S {
        &self.servos
    }

    /// Resume the actor's counter
    pub fn start_clock(&mut self, actor: Actor) {
        self.clock.start(actor);
    }

    /// Freeze the actor's counter
    pub fn stop_clock(&mut self, actor: Actor) {
        self.clock.stop(actor);
    }

    /// Command a move and record its deadline without waiting
    ///
    /// The output is written immediately. Returns the time budgeted for
    /// the move. The servo's run status is left untouched.
    pub fn request_move(
        &mut self,
        actor: Actor,
        servo: &mut ServoState,
        target: Position,
        profile: MoveProfile,
    ) -> u16 {
        self.servos.set_output(actor, target);

        let duration = calculate_delay(&self.timing, servo.position(), target, profile);
        let start = self.clock.now(actor);
        servo.set_motion(target, MotionDeadline::new(start, duration));

        duration
    }

    /// Take the actor whose servo output last failed to update
    pub fn take_output_fault(&mut self) -> Option<Actor> {
        self.servos.take_fault()
    }

    /// Check if the actor's last move is presumed complete
    pub fn ready(&self, actor: Actor, servo: &ServoState) -> bool {
        servo.deadline().is_elapsed(self.clock.now(actor))
    }

    /// Send the servo back to its home position without waiting
    ///
    /// Does nothing when the servo is already home, so the deadline of an
    /// already-reset servo is left alone.
    pub fn home(&mut self, actor: Actor, servo: &mut ServoState) -> u16 {
        if servo.position() == Position::HOME {
            return 0;
        }
        self.request_move(actor, servo, Position::HOME, MoveProfile::Recipe)
    }

    /// Move one preset in `direction` and block until the move completes
    ///
    /// Rejected at the limits without touching the output.
    pub fn jog<D: DelayNs>(
        &mut self,
        actor: Actor,
        servo: &mut ServoState,
        direction: JogDirection,
        delay: &mut D,
    ) -> Result<Position, JogError> {
        let position = servo.position();
        let target = position.jog(direction).ok_or(JogError::AtLimit {
            position,
            direction,
        })?;

        let duration = self.request_move(actor, servo, target, MoveProfile::Jog);
        delay.delay_ms(duration as u32);

        // The move has been waited out in full
        servo.clear_deadline();
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClock, FakeDelay, RecordingServos};
    use proptest::prelude::*;

    fn scheduler() -> (FakeClock, MotionScheduler<FakeClock, RecordingServos>) {
        let clock = FakeClock::new();
        let sched = MotionScheduler::new(
            clock.clone(),
            RecordingServos::new(),
            MotionTiming::default(),
        );
        (clock, sched)
    }

    fn pos(index: u8) -> Position {
        Position::new(index).unwrap()
    }

    #[test]
    fn test_move_to_current_position_is_instant() {
        let (_clock, mut sched) = scheduler();
        let mut servo = ServoState::new();

        let duration = sched.request_move(Actor::First, &mut servo, Position::HOME, MoveProfile::Recipe);
        assert_eq!(duration, 0);
        assert!(sched.ready(Actor::First, &servo));
    }

    #[test]
    fn test_ready_after_budgeted_time() {
        let (clock, mut sched) = scheduler();
        let mut servo = ServoState::new();
        clock.set(Actor::First, 1000);

        let duration = sched.request_move(Actor::First, &mut servo, pos(3), MoveProfile::Recipe);
        assert_eq!(duration, 3 * MotionTiming::default().recipe_step_ms);
        assert_eq!(servo.position(), pos(3));
        assert_eq!(servo.deadline(), MotionDeadline::new(1000, duration));

        clock.advance(Actor::First, duration - 1);
        assert!(!sched.ready(Actor::First, &servo));

        clock.advance(Actor::First, 1);
        assert!(sched.ready(Actor::First, &servo));
    }

    #[test]
    fn test_output_written_immediately() {
        let (_clock, mut sched) = scheduler();
        let mut servo = ServoState::new();

        sched.request_move(Actor::Second, &mut servo, pos(4), MoveProfile::Recipe);
        assert_eq!(sched.servos().last(Actor::Second), Some(pos(4)));
        assert_eq!(sched.servos().last(Actor::First), None);
    }

    #[test]
    fn test_ready_is_per_actor() {
        let (clock, mut sched) = scheduler();
        let mut first = ServoState::new();
        let mut second = ServoState::new();

        sched.request_move(Actor::First, &mut first, pos(5), MoveProfile::Recipe);
        sched.request_move(Actor::Second, &mut second, pos(1), MoveProfile::Recipe);

        clock.advance(Actor::Second, 200);
        assert!(sched.ready(Actor::Second, &second));
        assert!(!sched.ready(Actor::First, &first));
    }

    #[test]
    fn test_ready_across_counter_wrap() {
        let (clock, mut sched) = scheduler();
        let mut servo = ServoState::new();
        clock.set(Actor::First, 65_300);

        sched.request_move(Actor::First, &mut servo, pos(2), MoveProfile::Recipe);
        clock.advance(Actor::First, 300); // wraps to 64
        assert!(!sched.ready(Actor::First, &servo));
        clock.advance(Actor::First, 100);
        assert!(sched.ready(Actor::First, &servo));
    }

    #[test]
    fn test_jog_blocks_for_move() {
        let (clock, mut sched) = scheduler();
        let mut servo = ServoState::new();
        let mut delay = FakeDelay::new(clock.clone());

        let target = sched
            .jog(Actor::First, &mut servo, JogDirection::Right, &mut delay)
            .unwrap();
        assert_eq!(target, pos(1));
        assert_eq!(delay.total_ms(), MotionTiming::default().jog_step_ms as u32);
        assert!(sched.ready(Actor::First, &servo));
    }

    #[test]
    fn test_jog_rejected_at_limits() {
        let (_clock, mut sched) = scheduler();
        let mut servo = ServoState::new();
        let mut delay = FakeDelay::new(FakeClock::new());

        let result = sched.jog(Actor::First, &mut servo, JogDirection::Left, &mut delay);
        assert_eq!(
            result,
            Err(JogError::AtLimit {
                position: Position::HOME,
                direction: JogDirection::Left,
            })
        );
        assert_eq!(servo.position(), Position::HOME);
        assert_eq!(sched.servos().writes(), 0);
        assert_eq!(delay.total_ms(), 0);

        sched.request_move(Actor::First, &mut servo, Position::MAX, MoveProfile::Recipe);
        let writes = sched.servos().writes();
        let result = sched.jog(Actor::First, &mut servo, JogDirection::Right, &mut delay);
        assert!(matches!(result, Err(JogError::AtLimit { .. })));
        assert_eq!(servo.position(), Position::MAX);
        assert_eq!(sched.servos().writes(), writes);
    }

    #[test]
    fn test_home_skips_when_already_home() {
        let (_clock, mut sched) = scheduler();
        let mut servo = ServoState::new();

        assert_eq!(sched.home(Actor::First, &mut servo), 0);
        assert_eq!(sched.servos().writes(), 0);

        sched.request_move(Actor::First, &mut servo, pos(2), MoveProfile::Recipe);
        assert_eq!(sched.home(Actor::First, &mut servo), 400);
        assert_eq!(servo.position(), Position::HOME);
    }

    proptest! {
        #[test]
        fn prop_delay_is_linear_in_steps(a in 0u8..6, b in 0u8..6) {
            let timing = MotionTiming::default();
            let (from, to) = (pos(a), pos(b));
            let steps = a.abs_diff(b) as u16;

            prop_assert_eq!(
                calculate_delay(&timing, from, to, MoveProfile::Jog),
                steps * timing.jog_step_ms
            );
            prop_assert_eq!(
                calculate_delay(&timing, from, to, MoveProfile::Recipe),
                steps * timing.recipe_step_ms
            );
        }
    }
}
