//! Mutable per-servo record
//!
//! Holds the position, recipe cursor, loop context and the in-flight
//! motion deadline for one servo. Only the motion scheduler and the
//! interpreter acting on behalf of that servo mutate it.

use super::events::ServoEvent;
use super::machine::ServoStatus;
use crate::motion::Position;

/// Bookkeeping for the single active LOOP ... END_LOOP block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopContext {
    /// Cursor of the first instruction of the loop body
    pub return_cursor: u8,
    /// Repetitions still owed after the current pass through the body
    pub remaining: i8,
}

/// Timing of the last issued move
///
/// The servo is presumed to have arrived once `duration` milliseconds
/// have elapsed on the actor's counter since `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionDeadline {
    /// Counter value when the move was issued
    pub start: u16,
    /// Expected move time in milliseconds
    pub duration: u16,
}

impl MotionDeadline {
    /// Create a deadline starting at `start`
    pub const fn new(start: u16, duration: u16) -> Self {
        Self { start, duration }
    }

    /// Check if the move is complete at counter value `now`
    ///
    /// Uses modular subtraction, so a counter wrap between `start` and
    /// `now` is handled for any duration below 65536 ms.
    pub fn is_elapsed(&self, now: u16) -> bool {
        now.wrapping_sub(self.start) >= self.duration
    }
}

/// State of one servo
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoState {
    status: ServoStatus,
    position: Position,
    recipe_index: u8,
    cursor: u8,
    loop_context: Option<LoopContext>,
    deadline: MotionDeadline,
}

impl ServoState {
    /// Create an idle servo at home running recipe 0
    pub const fn new() -> Self {
        Self {
            status: ServoStatus::Idle,
            position: Position::HOME,
            recipe_index: 0,
            cursor: 0,
            loop_context: None,
            deadline: MotionDeadline::new(0, 0),
        }
    }

    /// Current run status
    pub fn status(&self) -> ServoStatus {
        self.status
    }

    /// Check if recipe instructions may be consumed
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Last commanded position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Index of the active recipe in the catalog
    pub fn recipe_index(&self) -> u8 {
        self.recipe_index
    }

    /// Index of the next instruction to execute
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Active loop, if inside LOOP ... END_LOOP
    pub fn loop_context(&self) -> Option<LoopContext> {
        self.loop_context
    }

    /// Deadline of the last issued move
    pub fn deadline(&self) -> MotionDeadline {
        self.deadline
    }

    /// Apply a lifecycle event and return the new status
    pub fn apply(&mut self, event: ServoEvent) -> ServoStatus {
        self.status = self.status.transition(event);
        self.status
    }

    /// Reset after a recipe completes or is force-restarted
    ///
    /// Clears the cursor and loop context and leaves the servo idle. The
    /// motion deadline is kept, since the servo may still be travelling.
    /// Unless `restart` is set, the next recipe in the catalog becomes
    /// active, wrapping to 0 after the last of `recipe_count`.
    pub fn fixup(&mut self, restart: bool, recipe_count: u8) {
        if !restart {
            self.recipe_index = if self.recipe_index + 1 >= recipe_count {
                0
            } else {
                self.recipe_index + 1
            };
        }
        self.status = ServoStatus::Idle;
        self.cursor = 0;
        self.loop_context = None;
    }

    pub(crate) fn set_motion(&mut self, target: Position, deadline: MotionDeadline) {
        self.position = target;
        self.deadline = deadline;
    }

    pub(crate) fn clear_deadline(&mut self) {
        self.deadline = MotionDeadline::default();
    }

    pub(crate) fn advance(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    pub(crate) fn jump_to(&mut self, cursor: u8) {
        self.cursor = cursor;
    }

    pub(crate) fn set_loop_context(&mut self, context: Option<LoopContext>) {
        self.loop_context = context;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_servo_is_idle_at_home() {
        let servo = ServoState::new();
        assert_eq!(servo.status(), ServoStatus::Idle);
        assert_eq!(servo.position(), Position::HOME);
        assert_eq!(servo.cursor(), 0);
        assert!(servo.loop_context().is_none());
        assert_eq!(servo.deadline(), MotionDeadline::default());
        assert_eq!(servo, ServoState::default());
    }

    #[test]
    fn test_fixup_advances_and_wraps_recipe() {
        let mut servo = ServoState::new();
        servo.fixup(false, 3);
        assert_eq!(servo.recipe_index(), 1);
        servo.fixup(false, 3);
        assert_eq!(servo.recipe_index(), 2);
        servo.fixup(false, 3);
        assert_eq!(servo.recipe_index(), 0);
    }

    #[test]
    fn test_fixup_restart_keeps_recipe() {
        let mut servo = ServoState::new();
        servo.fixup(false, 4);
        servo.apply(ServoEvent::Continue);
        servo.advance();
        servo.set_loop_context(Some(LoopContext {
            return_cursor: 1,
            remaining: 2,
        }));

        servo.fixup(true, 4);
        assert_eq!(servo.recipe_index(), 1);
        assert_eq!(servo.cursor(), 0);
        assert!(servo.loop_context().is_none());
        assert_eq!(servo.status(), ServoStatus::Idle);
    }

    #[test]
    fn test_fixup_is_idempotent_apart_from_recipe() {
        let mut servo = ServoState::new();
        servo.fixup(false, 5);
        let before = servo.clone();

        servo.fixup(false, 5);
        assert_eq!(servo.recipe_index(), before.recipe_index() + 1);
        assert_eq!(servo.status(), before.status());
        assert_eq!(servo.cursor(), before.cursor());
        assert_eq!(servo.loop_context(), before.loop_context());
        assert_eq!(servo.deadline(), before.deadline());
        assert_eq!(servo.position(), before.position());
    }

    #[test]
    fn test_fixup_keeps_motion_deadline() {
        let mut servo = ServoState::new();
        let deadline = MotionDeadline::new(200, 1200);
        servo.set_motion(Position::new(3).unwrap(), deadline);

        servo.fixup(false, 5);
        assert_eq!(servo.deadline(), deadline);
        servo.clear_deadline();
        assert_eq!(servo.deadline(), MotionDeadline::default());
    }

    #[test]
    fn test_deadline_elapsed() {
        let deadline = MotionDeadline::new(1000, 600);
        assert!(!deadline.is_elapsed(1000));
        assert!(!deadline.is_elapsed(1599));
        assert!(deadline.is_elapsed(1600));
    }

    #[test]
    fn test_deadline_across_counter_wrap() {
        let deadline = MotionDeadline::new(65_400, 400);
        assert!(!deadline.is_elapsed(65_500));
        assert!(!deadline.is_elapsed(100));
        assert!(deadline.is_elapsed(264));
    }

    #[test]
    fn test_zero_deadline_is_immediately_elapsed() {
        let deadline = MotionDeadline::new(4321, 0);
        assert!(deadline.is_elapsed(4321));
    }
}
