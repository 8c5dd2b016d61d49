//! Electronics formulas
//!
//! Resistor networks, AC amplitude conversions and decibel gain.

use crate::error::{CalcError, Result};
use std::f64::consts::SQRT_2;

/// Voltage at the midpoint of a resistor divider.
///
/// `r1` is the resistor nearest `vcc`, `r2` the one to ground.
pub fn resistor_divider_voltage(vcc: f64, r1: f64, r2: f64) -> Result<f64> {
    let total = r1 + r2;
    if total == 0.0 {
        return Err(CalcError::domain("resistor divider with zero total resistance"));
    }
    Ok(vcc * (1.0 - r1 / total))
}

/// Equivalent resistance of `r1` and `r2` in parallel.
pub fn parallel_resistance(r1: f64, r2: f64) -> Result<f64> {
    if r1 == 0.0 || r2 == 0.0 {
        return Err(CalcError::domain("parallel resistance with a zero-ohm resistor"));
    }
    let conductance = 1.0 / r1 + 1.0 / r2;
    if conductance == 0.0 {
        return Err(CalcError::domain("parallel resistance with zero total conductance"));
    }
    Ok(1.0 / conductance)
}

/// RMS value of a sine wave with the given peak.
pub fn rms_from_peak(peak: f64) -> f64 {
    peak / SQRT_2
}

/// Peak value of a sine wave with the given RMS.
pub fn peak_from_rms(rms: f64) -> f64 {
    rms * SQRT_2
}

/// Peak-to-peak value of a sine wave with the given RMS.
pub fn peak_to_peak_from_rms(rms: f64) -> f64 {
    peak_from_rms(rms) * 2.0
}

/// Gain in dB for an output:input amplitude ratio, e.g. 9:1 is about 19 dB.
pub fn db_gain_from_ratio(ratio: f64) -> Result<f64> {
    if ratio <= 0.0 || ratio.is_nan() {
        return Err(CalcError::domain(format!(
            "dB gain of a non-positive ratio ({})",
            ratio
        )));
    }
    Ok(20.0 * ratio.log10())
}

/// Output:input amplitude ratio for a gain in dB.
pub fn ratio_from_db_gain(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}
