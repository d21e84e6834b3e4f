//! Configuration type definitions
//!
//! These types represent the controller configuration: motion timing,
//! servo calibration and the terminal link.

use super::calibration::ServoCalibration;
use crate::motion::{MoveProfile, POSITION_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default per-step settle time for manual jogs (ms)
pub const DEFAULT_JOG_STEP_MS: u16 = 100;

/// Default per-step settle time for recipe moves (ms)
pub const DEFAULT_RECIPE_STEP_MS: u16 = 200;

/// Default length of one WAIT unit (ms)
pub const DEFAULT_WAIT_UNIT_MS: u16 = 100;

/// Default terminal baud rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Open-loop motion timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionTiming {
    /// Time allowed per preset step for a manual jog
    pub jog_step_ms: u16,
    /// Time allowed per preset step for a recipe move
    pub recipe_step_ms: u16,
    /// Length of one WAIT parameter unit
    pub wait_unit_ms: u16,
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self {
            jog_step_ms: DEFAULT_JOG_STEP_MS,
            recipe_step_ms: DEFAULT_RECIPE_STEP_MS,
            wait_unit_ms: DEFAULT_WAIT_UNIT_MS,
        }
    }
}

impl MotionTiming {
    /// Per-step time for the given move profile
    pub fn step_ms(&self, profile: MoveProfile) -> u16 {
        match profile {
            MoveProfile::Jog => self.jog_step_ms,
            MoveProfile::Recipe => self.recipe_step_ms,
        }
    }

    /// Time budget for a move across every preset, without saturation
    pub fn longest_move_ms(&self, profile: MoveProfile) -> u32 {
        self.step_ms(profile) as u32 * (POSITION_COUNT as u32 - 1)
    }
}

/// Terminal link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Motion timing
    pub timing: MotionTiming,
    /// Duty cycle calibration shared by both servos
    pub calibration: ServoCalibration,
    /// Terminal settings
    pub console: ConsoleConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pulse widths must increase with position
    PulsesNotIncreasing,
    /// A pulse is longer than the PWM period
    PulseExceedsPeriod,
    /// PWM period of zero
    ZeroPeriod,
    /// Recipe step time of zero would make every move instantly ready
    ZeroRecipeStep,
    /// WAIT unit of zero would make every dwell a no-op
    ZeroWaitUnit,
    /// Baud rate of zero
    ZeroBaudrate,
    /// A full-range move would not fit the 16-bit millisecond counter
    MoveTooLong,
}

impl ControllerConfig {
    /// Check the configuration for values the controller cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calibration.validate()?;
        if self.timing.recipe_step_ms == 0 {
            return Err(ConfigError::ZeroRecipeStep);
        }
        if self.timing.wait_unit_ms == 0 {
            return Err(ConfigError::ZeroWaitUnit);
        }
        if [MoveProfile::Jog, MoveProfile::Recipe]
            .into_iter()
            .any(|profile| self.timing.longest_move_ms(profile) >= u16::MAX as u32)
        {
            return Err(ConfigError::MoveTooLong);
        }
        if self.console.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        Ok(())
    }
}
