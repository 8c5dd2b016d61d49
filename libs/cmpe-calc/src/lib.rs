//! cmpe-calc - Calculator helpers for computer engineering
//!
//! Small, stateless helpers meant to be called ad hoc: bit fiddling, byte
//! swapping, bit/byte size conversions and a few electronics formulas.
//!
//! # Features
//!
//! - **Base/bit conversion**: `int_to_binary_string`, `bit_reverse`, `hex_to_binary_string`,
//!   `binary_string_to_int`, `group_string`, `ones_positions`, `zeros_positions`
//! - **Reports**: `inspect` (integer forms), `inspect_byte_count` and
//!   `parse_and_inspect_size` (bit/byte sizes with binary-multiple prefixes)
//! - **Units**: `convert_si_unit` (SI decimal prefixes)
//! - **Electronics**: resistor divider, parallel resistance, RMS/peak, dB gain
//! - **Byte swapping**: `swab16`, `swab32`, `swab64`, `swah32`, `swahb32`
//! - **Ratio solver**: `solve_ratio` for `n1/d1 = n2/d2` with one unknown
//! - **Evaluation namespace**: `CalcEngine` exposes all of the above by name
//!
//! # Example
//!
//! ```rust
//! use cmpe_calc::{int_to_binary_string, parallel_resistance, solve_ratio, swab32, CalcEngine, X};
//!
//! assert_eq!(int_to_binary_string(5, 0), "0101");
//! assert_eq!(swab32(0x12345678), 0x78563412);
//! assert_eq!(parallel_resistance(1000.0, 1000.0).unwrap(), 500.0);
//! assert_eq!(solve_ratio(X, 2.0.into(), 4.0.into(), 8.0.into()).unwrap(), 1.0);
//!
//! let mut engine = CalcEngine::new().unwrap();
//! let report = engine.evaluate_text(r#"size("1KB")"#).unwrap();
//! assert!(report.contains("Bytes (B)\t\t:\t1024"));
//! ```
//!
//! # Namespace functions
//!
//! | Short name | Descriptive name | Returns |
//! |------------|------------------|---------|
//! | `int2bin` | `int_to_binary_string` | text |
//! | `bitrev` | `bit_reverse` | integer |
//! | `hex2bin` | `hex_to_binary_string` | text |
//! | `bin2int`, `bin` | `binary_string_to_int` | integer |
//! | `group` | `group_string` | text |
//! | `ones`, `zeros` | `ones_positions`, `zeros_positions` | tuple |
//! | `inspect` | `inspect` | report |
//! | `inspect_bytes` | `inspect_byte_count` | report |
//! | `size` | `parse_and_inspect_size` | report |
//! | `unit` | `convert_si_unit` | number |
//! | `rdiv`, `rpar` | `resistor_divider_voltage`, `parallel_resistance` | number |
//! | `rms`, `pk`, `pp` | `rms_from_peak`, `peak_from_rms`, `peak_to_peak_from_rms` | number |
//! | `dbgain`, `ampgain` | `db_gain_from_ratio`, `ratio_from_db_gain` | number |
//! | `swab16/32/64`, `swah32`, `swahb32` | same | integer |
//! | `ratio` | `solve_ratio` | number |

pub mod bits;
pub mod config;
pub mod constants;
pub mod electronics;
pub mod error;
pub mod evaluator;
pub mod inspect;
pub mod logging;
pub mod ratio;
pub mod si;
pub mod size;
pub mod swap;

// Re-exports for convenience
pub use config::{CalcConfig, LoggingConfig};
pub use error::{CalcError, Result};
pub use evaluator::CalcEngine;
pub use logging::init_logging;

pub use bits::{
    binary_string_to_int, bit_reverse, group_string, hex_to_binary_string, int_to_binary_string,
    ones_positions, zeros_positions,
};
pub use constants::{SiPrefix, BINARY_MULTIPLES, SI_PREFIXES};
pub use electronics::{
    db_gain_from_ratio, parallel_resistance, peak_from_rms, peak_to_peak_from_rms,
    ratio_from_db_gain, resistor_divider_voltage, rms_from_peak,
};
pub use inspect::inspect;
pub use ratio::{solve_ratio, Term, X};
pub use si::convert_si_unit;
pub use size::{
    inspect_byte_count, parse_and_inspect_size, parse_size, SizeInput, SizeQuantity, SizeUnit,
};
pub use swap::{swab16, swab32, swab64, swah32, swahb32};
