//! Time sources

pub mod counter;

pub use counter::CounterClock;
