//! Embedded configuration
//!
//! Falls back to built-in defaults if the embedded file cannot be used.

use defmt::*;

use cadence_core::config::{parse_config, ConfigError, ControllerConfig, ParseError};

/// Embedded default configuration (compiled into firmware)
/// Edit servo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../servo.toml");

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// TOML parsing failed
    Parse(ParseError),
    /// Values the controller cannot use
    Invalid(ConfigError),
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Load the embedded configuration, or the defaults if it is unusable
pub fn load_config() -> ControllerConfig {
    match try_load(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            warn!("Embedded configuration rejected: {:?}, using defaults", e);
            ControllerConfig::default()
        }
    }
}

fn try_load(input: &str) -> Result<ControllerConfig, LoadError> {
    let config = parse_config(input)?;
    config.validate()?;
    Ok(config)
}

fn log_config_summary(config: &ControllerConfig) {
    info!(
        "Timing: jog {}ms/step, recipe {}ms/step, wait unit {}ms",
        config.timing.jog_step_ms, config.timing.recipe_step_ms, config.timing.wait_unit_ms
    );
    info!(
        "Calibration: period {}us, pulses {}",
        config.calibration.period_us, config.calibration.pulse_us
    );
    info!("Console: {} baud", config.console.baudrate);
}
