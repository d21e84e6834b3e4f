//! Board-agnostic core logic for the two-servo recipe controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (time source, servo output, console)
//! - Recipe bytecode and the compiled-in recipe catalog
//! - Per-servo state and its lifecycle
//! - Non-blocking motion scheduling
//! - The recipe interpreter
//! - Interactive command decoding and line editing
//! - The controller loop tying it together
//! - Configuration types and parsing

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod controller;
pub mod interpreter;
pub mod motion;
pub mod recipe;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Controller, Halted};
