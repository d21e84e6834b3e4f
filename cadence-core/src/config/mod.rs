//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware embeds a
//! `servo.toml` file and parses it with [`parse_config`] at boot.

pub mod calibration;
pub mod toml;
pub mod types;

pub use calibration::*;
pub use toml::{parse_config, ParseError};
pub use types::*;
