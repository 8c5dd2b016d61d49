//! SI prefix conversion (powers of ten)

use crate::constants::si_prefix;
use crate::error::Result;
use tracing::debug;

/// Express `value`, given in units of `from`, in units of `to`.
///
/// Prefixes are SI abbreviations (`"k"`, `"m"`, `"u"`, `"da"`, ...); the
/// empty string is the bare unit. `convert_si_unit(1.0, "k", "")` is 1000.
pub fn convert_si_unit(value: f64, from: &str, to: &str) -> Result<f64> {
    let from_exp = si_prefix(from)?.exponent;
    let to_exp = si_prefix(to)?.exponent;
    let shift = from_exp - to_exp;

    // Dividing by an exact power of ten keeps results like 1000 m -> 1 exact
    let converted = if shift >= 0 {
        value * 10f64.powi(shift)
    } else {
        value / 10f64.powi(-shift)
    };

    debug!(value = value, from = from, to = to, converted = converted, "convert_si_unit");
    Ok(converted)
}
