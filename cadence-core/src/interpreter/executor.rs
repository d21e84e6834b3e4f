//! Recipe bytecode interpreter
//!
//! Each call to [`Interpreter::step`] consumes at most one instruction for
//! one servo, and only when that servo's last move is presumed complete.
//! The two servos keep independent cursors and loop contexts, so one can
//! sit in a long move while the other keeps executing.

use embedded_hal::delay::DelayNs;

use super::fault::Fault;
use crate::motion::{MotionScheduler, MoveProfile, Position};
use crate::recipe::{Instruction, Opcode, RecipeBook};
use crate::state::{Actor, LoopContext, ServoEvent, ServoState, ServoStatus};
use crate::traits::{ServoDriver, TimeSource};

/// Result of a single scheduling step for one servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Servo is not running
    Inactive,
    /// Previous move still in flight
    NotReady,
    /// Instruction executed, cursor moved on
    Executed(Instruction),
    /// RECIPE_END reached; the servo was reset and is idle
    RecipeComplete { recipe: u8 },
}

/// Executes recipes from a catalog on behalf of each servo
pub struct Interpreter {
    book: RecipeBook,
}

impl Interpreter {
    pub fn new(book: RecipeBook) -> Self {
        Self { book }
    }

    /// Instruction under the servo's cursor, if inside its recipe
    pub fn current_instruction(&self, servo: &ServoState) -> Option<Instruction> {
        self.book
            .get(servo.recipe_index())
            .and_then(|recipe| recipe.get(servo.cursor()))
    }

    /// Execute the servo's next instruction if it is running and ready
    ///
    /// WAIT blocks for its full dwell. On a fault the cursor is left on
    /// the offending instruction.
    pub fn step<T, S, D>(
        &self,
        actor: Actor,
        servo: &mut ServoState,
        motion: &mut MotionScheduler<T, S>,
        delay: &mut D,
    ) -> Result<StepOutcome, Fault>
    where
        T: TimeSource,
        S: ServoDriver,
        D: DelayNs,
    {
        if !servo.is_running() {
            return Ok(StepOutcome::Inactive);
        }
        if !motion.ready(actor, servo) {
            return Ok(StepOutcome::NotReady);
        }

        let instruction = self
            .current_instruction(servo)
            .ok_or(Fault::MissingRecipeEnd)?;
        let parameter = instruction.parameter();

        match instruction.opcode() {
            Opcode::Move => {
                let target = Position::new(parameter).ok_or(Fault::MoveOutOfRange)?;
                motion.request_move(actor, servo, target, MoveProfile::Recipe);
                servo.advance();
            }
            Opcode::Wait => {
                let dwell = parameter as u32 * motion.timing().wait_unit_ms as u32;
                delay.delay_ms(dwell);
                servo.advance();
            }
            Opcode::Loop => {
                if servo.loop_context().is_some() {
                    return Err(Fault::NestedLoop);
                }
                // The count includes the first pass through the body
                servo.set_loop_context(Some(LoopContext {
                    return_cursor: servo.cursor() + 1,
                    remaining: parameter as i8 - 1,
                }));
                servo.advance();
            }
            Opcode::EndLoop => {
                let context = servo.loop_context().ok_or(Fault::UnmatchedEndLoop)?;
                if context.remaining > 0 {
                    servo.set_loop_context(Some(LoopContext {
                        remaining: context.remaining - 1,
                        ..context
                    }));
                    servo.jump_to(context.return_cursor);
                } else {
                    servo.set_loop_context(None);
                    servo.advance();
                }
            }
            Opcode::RecipeEnd => {
                let recipe = servo.recipe_index();
                self.apply(actor, servo, motion, ServoEvent::RecipeFinished);
                self.fixup(actor, servo, motion, false);
                return Ok(StepOutcome::RecipeComplete { recipe });
            }
            Opcode::Erroneous | Opcode::Unknown(_) => return Err(Fault::UnknownOpcode),
        }

        Ok(StepOutcome::Executed(instruction))
    }

    /// Reset the servo after its recipe ends or is force-restarted
    ///
    /// The servo is left idle with its clock stopped and is sent home
    /// without waiting. Unless `restart` is set the next recipe becomes
    /// active.
    pub fn fixup<T: TimeSource, S: ServoDriver>(
        &self,
        actor: Actor,
        servo: &mut ServoState,
        motion: &mut MotionScheduler<T, S>,
        restart: bool,
    ) {
        servo.fixup(restart, self.book.len());
        motion.stop_clock(actor);
        motion.home(actor, servo);
    }

    /// Skip past a fault the operator chose to ignore
    ///
    /// Returns the completed recipe when the fault ended the recipe.
    pub fn recover<T: TimeSource, S: ServoDriver>(
        &self,
        actor: Actor,
        servo: &mut ServoState,
        motion: &mut MotionScheduler<T, S>,
        fault: Fault,
    ) -> Option<u8> {
        if fault == Fault::MissingRecipeEnd {
            let recipe = servo.recipe_index();
            self.fixup(actor, servo, motion, false);
            return Some(recipe);
        }

        if fault.is_loop_related() {
            servo.set_loop_context(None);
        }
        servo.advance();
        None
    }

    /// Restart the servo's current recipe from the first instruction
    pub fn begin<T: TimeSource, S: ServoDriver>(
        &self,
        actor: Actor,
        servo: &mut ServoState,
        motion: &mut MotionScheduler<T, S>,
    ) {
        self.fixup(actor, servo, motion, true);
        self.apply(actor, servo, motion, ServoEvent::Begin);
    }

    /// Apply a lifecycle event, starting or stopping the servo's clock
    /// when it enters or leaves the running status
    pub fn apply<T: TimeSource, S: ServoDriver>(
        &self,
        actor: Actor,
        servo: &mut ServoState,
        motion: &mut MotionScheduler<T, S>,
        event: ServoEvent,
    ) -> ServoStatus {
        let was_running = servo.is_running();
        let status = servo.apply(event);

        match (was_running, status.is_running()) {
            (false, true) => motion.start_clock(actor),
            (true, false) => motion.stop_clock(actor),
            _ => {}
        }
        status
    }
}
