//! Recipe interpreter and execution faults

pub mod executor;
pub mod fault;

pub use executor::{Interpreter, StepOutcome};
pub use fault::{Fault, FaultReport};
