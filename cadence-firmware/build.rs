//! Build script for cadence-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates servo.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of servo position presets
const POSITION_COUNT: usize = 6;

/// Largest per-step time whose full-range move fits a 16-bit ms counter
const MAX_STEP_MS: i64 = 65_534 / (POSITION_COUNT as i64 - 1);

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Linker scripts for cortex-m-rt and defmt
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate servo.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=servo.toml");

    let config_path = Path::new("servo.toml");

    if !config_path.exists() {
        fail(
            "servo.toml not found!",
            &[
                "The firmware embeds a servo.toml configuration file.".to_string(),
                "Please create one in the cadence-firmware directory.".to_string(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read servo.toml", &[format!("Error: {}", e)]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in servo.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_calibration(&config, &mut errors);
    validate_console(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid servo.toml configuration", &errors);
    }

    println!("cargo:warning=servo.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the known sections and keys are accepted
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let known: &[(&str, &[&str])] = &[
        ("timing", &["jog_step_ms", "recipe_step_ms", "wait_unit_ms"]),
        ("calibration", &["period_us", "pulse_us"]),
        ("console", &["baudrate"]),
    ];

    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = known.iter().find(|(n, _)| n == name).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

/// Read an optional integer, checking its range
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let value = config.get(section)?.get(key)?;
    match value.as_integer() {
        Some(n) if range.contains(&n) => Some(n),
        Some(_) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            None
        }
        None => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    // A move across all five steps must stay below 65535 ms
    integer(config, "timing", "jog_step_ms", 0..=MAX_STEP_MS, errors);
    integer(config, "timing", "recipe_step_ms", 1..=MAX_STEP_MS, errors);
    integer(config, "timing", "wait_unit_ms", 1..=65_535, errors);
}

fn validate_calibration(config: &toml::Value, errors: &mut Vec<String>) {
    let period = integer(config, "calibration", "period_us", 1..=65_535, errors).unwrap_or(20_000);

    let Some(pulses) = config.get("calibration").and_then(|c| c.get("pulse_us")) else {
        return;
    };
    let Some(pulses) = pulses.as_array() else {
        errors.push("[calibration] pulse_us must be an array".to_string());
        return;
    };
    if pulses.len() != POSITION_COUNT {
        errors.push(format!(
            "[calibration] pulse_us needs exactly {} entries, found {}",
            POSITION_COUNT,
            pulses.len()
        ));
        return;
    }

    let mut previous = None;
    for (i, pulse) in pulses.iter().enumerate() {
        let Some(pulse) = pulse.as_integer() else {
            errors.push(format!("[calibration] pulse_us[{}] must be an integer", i));
            continue;
        };
        if pulse < 0 || pulse > period {
            errors.push(format!(
                "[calibration] pulse_us[{}] must be 0-{} (period_us)",
                i, period
            ));
        }
        if previous.is_some_and(|p| pulse <= p) {
            errors.push(format!(
                "[calibration] pulse_us[{}] must be larger than the previous entry",
                i
            ));
        }
        previous = Some(pulse);
    }
}

fn validate_console(config: &toml::Value, errors: &mut Vec<String>) {
    integer(config, "console", "baudrate", 1_200..=4_000_000, errors);
}
