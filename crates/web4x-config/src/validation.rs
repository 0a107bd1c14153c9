//! Configuration validation.
//!
//! Collects every range violation into a single `ConfigError` so the user
//! sees all problems at once.

use web4x_common::ConfigError;

use crate::schema::Web4xConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &Web4xConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.browser.default_url.trim().is_empty() {
        errors.push("browser.default_url must not be empty".into());
    }

    validate_range(
        &mut errors,
        "history.max_entries",
        config.history.max_entries,
        1,
        10_000,
    );
    validate_range(
        &mut errors,
        "history.recent_count",
        config.history.recent_count,
        1,
        50,
    );
    validate_range_f64(&mut errors, "zoom.step", config.zoom.step, 0.01, 1.0);
    validate_range_f64(&mut errors, "zoom.min", config.zoom.min, 0.05, 1.0);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: usize, min: usize, max: usize) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
