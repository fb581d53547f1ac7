use chrono::{DateTime, Datelike, Timelike, Utc};

const MAX_STEP_DECIMALS: usize = 12;

/// Number of decimals needed to print every multiple of `step` exactly.
#[must_use]
pub fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    for decimals in 0..=MAX_STEP_DECIMALS {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() <= scaled.abs() * 1e-9 {
            return decimals;
        }
    }
    MAX_STEP_DECIMALS
}

/// Fixed-precision label for a tick on a continuous axis with spacing `step`.
#[must_use]
pub fn format_number_with_step(value: f64, step: f64) -> String {
    let decimals = decimals_for_step(step);
    normalize_negative_zero(format!("{value:.decimals$}"))
}

/// Shortest label that round-trips `value`, without exponent notation for
/// typical axis magnitudes.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        return normalize_negative_zero(format!("{value:.0}"));
    }
    let text = format!("{value:.MAX_STEP_DECIMALS$}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    normalize_negative_zero(trimmed.to_owned())
}

fn normalize_negative_zero(text: String) -> String {
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_owned()
    } else {
        text
    }
}

/// Label for a time tick, picking the coarsest unit that is not zero.
#[must_use]
pub fn format_time(time: DateTime<Utc>) -> String {
    let format = if time.timestamp_subsec_millis() != 0 {
        "%H:%M:%S%.3f"
    } else if time.second() != 0 {
        "%H:%M:%S"
    } else if time.minute() != 0 {
        "%H:%M"
    } else if time.hour() != 0 {
        "%H:00"
    } else if time.day() != 1 {
        "%b %d"
    } else if time.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    time.format(format).to_string()
}
