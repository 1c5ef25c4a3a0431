//! Duration source
//!
//! Converts a user-supplied magnitude and unit into whole seconds.

use ding_types::TimeUnit;

use crate::error::DurationError;

/// Total countdown length in whole seconds
pub type DurationSecs = u64;

/// Parse `value` as a real number and scale it by `unit`, truncating to whole seconds.
///
/// `"1.5"` hours is 5400 seconds; `"2"` minutes is 120 seconds.
pub fn compute_duration(value: &str, unit: TimeUnit) -> Result<DurationSecs, DurationError> {
    let trimmed = value.trim();
    let number: f64 = trimmed
        .parse()
        .map_err(|source| DurationError::InvalidNumber {
            input: value.to_string(),
            source,
        })?;

    if !number.is_finite() {
        return Err(DurationError::NotFinite {
            input: value.to_string(),
        });
    }
    if number < 0.0 {
        return Err(DurationError::Negative {
            input: value.to_string(),
        });
    }

    let seconds = (number * unit.seconds_multiplier()).trunc();
    if seconds >= u64::MAX as f64 {
        return Err(DurationError::TooLarge {
            input: value.to_string(),
        });
    }

    Ok(seconds as DurationSecs)
}
