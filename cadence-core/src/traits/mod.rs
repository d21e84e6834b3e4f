//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod console;
pub mod servo;

pub use clock::TimeSource;
pub use console::{Console, BACKSPACE, DELETE, ESCAPE, LINE_END};
pub use servo::ServoDriver;
