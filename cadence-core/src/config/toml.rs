//! Simple TOML parser for controller configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the servo controller configuration. It does NOT support the full TOML grammar
//! and needs no allocator.
//!
//! Supported features:
//! - Key = value pairs with unsigned integer values (`115_200` style allowed)
//! - Single-line integer arrays: `pulse_us = [500, 856, 1211]`
//! - [section] headers
//! - Comments (# ...)
//!
//! Keys missing from the file keep their default values.
//!
//! ```text
//! [timing]
//! jog_step_ms = 100
//! recipe_step_ms = 200
//! wait_unit_ms = 100
//!
//! [calibration]
//! period_us = 20000
//! pulse_us = [500, 856, 1211, 1567, 1922, 2278]
//!
//! [console]
//! baudrate = 115200
//! ```

use super::types::ControllerConfig;
use crate::motion::POSITION_COUNT;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Value is not a number in range, or a malformed array
    InvalidValue,
    /// Array has more or fewer entries than position presets
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Calibration,
    Console,
}

/// Parse TOML configuration into a [`ControllerConfig`]
///
/// The result is not validated; call [`ControllerConfig::validate`].
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "calibration" => Ok(Section::Calibration),
        "console" => Ok(Section::Console),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an unsigned decimal integer, allowing `_` digit separators
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for ch in value.chars() {
        match ch {
            '_' if digits > 0 => continue,
            '0'..='9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(ch as u32 - '0' as u32))
                    .ok_or(ParseError::InvalidValue)?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidValue),
        }
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(result).map_err(|_| ParseError::InvalidValue)
}

fn parse_pulse_table(value: &str) -> Result<[u16; POSITION_COUNT], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut table = [0u16; POSITION_COUNT];
    let mut count = 0;

    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = table.get_mut(count).ok_or(ParseError::TooManyItems)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != POSITION_COUNT {
        return Err(ParseError::TooManyItems);
    }

    Ok(table)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ControllerConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Timing, "jog_step_ms") => config.timing.jog_step_ms = parse_int(value)?,
        (Section::Timing, "recipe_step_ms") => config.timing.recipe_step_ms = parse_int(value)?,
        (Section::Timing, "wait_unit_ms") => config.timing.wait_unit_ms = parse_int(value)?,

        (Section::Calibration, "period_us") => config.calibration.period_us = parse_int(value)?,
        (Section::Calibration, "pulse_us") => {
            config.calibration.pulse_us = parse_pulse_table(value)?
        }

        (Section::Console, "baudrate") => config.console.baudrate = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Servo controller settings
[timing]
jog_step_ms = 80
recipe_step_ms = 250   # slower, smoother recipe moves
wait_unit_ms = 100

[calibration]
period_us = 20_000
pulse_us = [600, 900, 1200, 1500, 1800, 2100]

[console]
baudrate = 115_200
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.timing.jog_step_ms, 80);
        assert_eq!(config.timing.recipe_step_ms, 250);
        assert_eq!(config.timing.wait_unit_ms, 100);
        assert_eq!(config.calibration.period_us, 20_000);
        assert_eq!(config.calibration.pulse_us, [600, 900, 1200, 1500, 1800, 2100]);
        assert_eq!(config.console.baudrate, 115_200);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[timing]\nwait_unit_ms = 50\n").unwrap();
        let defaults = ControllerConfig::default();
        assert_eq!(config.timing.wait_unit_ms, 50);
        assert_eq!(config.timing.jog_step_ms, defaults.timing.jog_step_ms);
        assert_eq!(config.calibration, defaults.calibration);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), ControllerConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[heater]\nmax_temp = 50\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_key_in_wrong_section() {
        assert_eq!(
            parse_config("[console]\nwait_unit_ms = 50\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("baudrate = 9600\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_value_out_of_range() {
        assert_eq!(
            parse_config("[timing]\njog_step_ms = 70000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timing]\njog_step_ms = -1\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_pulse_table_length_checked() {
        assert_eq!(
            parse_config("[calibration]\npulse_us = [1, 2, 3]\n"),
            Err(ParseError::TooManyItems)
        );
        assert_eq!(
            parse_config("[calibration]\npulse_us = [1, 2, 3, 4, 5, 6, 7]\n"),
            Err(ParseError::TooManyItems)
        );
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(
            parse_config("[timing]\njog_step_ms\n"),
            Err(ParseError::InvalidValue)
        );
    }
}
