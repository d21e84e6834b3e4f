//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in cadence-core:
//!
//! - Servo outputs over `embedded-hal` PWM channels
//! - Per-servo time source over `cadence-hal` counters
//! - Operator console over a `cadence-hal` UART

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod console;
pub mod servo;
