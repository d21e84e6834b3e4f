//! Operator console drivers

pub mod uart;

pub use uart::UartConsole;
