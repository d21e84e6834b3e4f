//! Motion scheduling
//!
//! Discrete servo positions and the open-loop timing that decides when a
//! servo is presumed to have finished moving.

pub mod position;
pub mod scheduler;

pub use position::{JogDirection, Position, DEGREES_PER_STEP, POSITION_COUNT};
pub use scheduler::{calculate_delay, JogError, MotionScheduler, MoveProfile};
