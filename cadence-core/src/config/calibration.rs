//! Servo duty cycle calibration
//!
//! Maps each position preset to a pulse width. Hobby servos expect one
//! pulse every 20 ms; the pulse width selects the angle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::ConfigError;
use crate::motion::{Position, POSITION_COUNT};

/// Default PWM frame length in microseconds (50 Hz)
pub const DEFAULT_PERIOD_US: u16 = 20_000;

/// Default pulse widths for 0°, 32°, 64°, 96°, 128° and 160°
pub const DEFAULT_PULSE_US: [u16; POSITION_COUNT] = [500, 856, 1211, 1567, 1922, 2278];

/// Pulse width table for the position presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoCalibration {
    /// PWM frame length in microseconds
    pub period_us: u16,
    /// Pulse width per position preset, strictly increasing
    pub pulse_us: [u16; POSITION_COUNT],
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            period_us: DEFAULT_PERIOD_US,
            pulse_us: DEFAULT_PULSE_US,
        }
    }
}

impl ServoCalibration {
    /// Pulse width for a position preset
    pub fn pulse_for(&self, position: Position) -> u16 {
        self.pulse_us[position.index() as usize]
    }

    /// Check that the table is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_us == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.pulse_us.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::PulsesNotIncreasing);
        }
        if self.pulse_us.iter().any(|&pulse| pulse > self.period_us) {
            return Err(ConfigError::PulseExceedsPeriod);
        }
        Ok(())
    }
}
