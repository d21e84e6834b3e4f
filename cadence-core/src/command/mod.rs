//! Interactive operator commands
//!
//! Keystrokes are collected into a two-letter line by [`LineEditor`] and
//! decoded into one [`ServoCommand`] per servo.

pub mod line;
pub mod processor;

pub use line::{CommandLine, Feed, LineEditor, COMMAND_CAPACITY};
pub use processor::{Commands, ServoCommand};
