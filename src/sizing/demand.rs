//! Minimum generator power from daily consumption.
//!
//! `P = E / (PR * HSP)` where `E` is the adjusted daily consumption (kWh),
//! `PR` the performance ratio and `HSP` the annual mean peak sun hours.

use crate::error::SizingError;

/// System performance ratio (inverter, wiring and soiling losses).
pub const PERFORMANCE_RATIO: f64 = 0.75;
/// Annual average peak sun hours per day.
pub const PEAK_SUN_HOURS: f64 = 4.88;

/// Required system power (kWp) for a daily consumption, at full precision.
///
/// # Errors
///
/// Returns [`SizingError::NegativeDemand`] if `daily_average_kwh` is negative
/// (including `-0.0`) or not a number.
pub fn estimate_power(daily_average_kwh: f64) -> Result<f64, SizingError> {
    // `is_sign_negative` also catches -0.0 from rounding a small shortfall.
    if daily_average_kwh.is_nan() || daily_average_kwh.is_sign_negative() {
        return Err(SizingError::NegativeDemand {
            value: daily_average_kwh,
        });
    }
    Ok(daily_average_kwh / (PERFORMANCE_RATIO * PEAK_SUN_HOURS))
}
