//! Configuration loading
//!
//! The firmware embeds `servo.toml` at build time. It is parsed with the
//! no_std parser in cadence-core and validated before use.

pub mod loader;

pub use loader::load_config;
