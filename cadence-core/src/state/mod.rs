//! Per-servo state and lifecycle
//!
//! Each servo owns one [`ServoState`]. Its run status follows an explicit,
//! finite state machine driven by [`ServoEvent`]s.

pub mod actor;
pub mod bank;
pub mod events;
pub mod machine;
pub mod servo;

pub use actor::{Actor, SERVO_COUNT};
pub use bank::ServoBank;
pub use events::ServoEvent;
pub use machine::ServoStatus;
pub use servo::{LoopContext, MotionDeadline, ServoState};
