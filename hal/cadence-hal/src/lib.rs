//! Cadence Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32L4 today). This keeps the drivers and the
//! recipe controller independent of any register layout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cadence-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-drivers (core trait impls)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ cadence-hal-  │
//!             │    stm32l4    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial terminal link
//! - [`timer::Counter`] - Per-servo millisecond counters

#![no_std]
#![deny(unsafe_code)]

pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use timer::Counter;
pub use uart::{UartRx, UartTx};
