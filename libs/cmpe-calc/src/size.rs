//! Bit/byte size parsing and reporting
//!
//! Accepts quantities such as `"1KB"`, `"1.5 MiB"`, `"512kbit"` or a bare
//! number with a separate unit (`(64, "Kib")`). Prefixes are binary
//! multiples: `1KB` is 1024 bytes.

use crate::constants::{binary_multiplier, G, K, M, T};
use crate::error::{CalcError, Result};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::debug;

/// Decimal places used in the byte-count report unless configured otherwise
pub const DEFAULT_DECIMALS: usize = 3;

type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

// magnitude, optional binary prefix, optional IEC `i`, bit/byte unit
static SIZE_RE: Pattern = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]*\.?[0-9]+|[0-9]+\.)\s*([kKmMgGtTpPeEzZyY]?)i?([bB].*?)\s*$")
});

static SIZE_UNIT_RE: Pattern =
    LazyLock::new(|| Regex::new(r"^\s*([kKmMgGtTpPeEzZyY]?)i?([bB].*?)\s*$"));

fn pattern(re: &'static Pattern) -> Result<&'static Regex> {
    re.as_ref()
        .map_err(|e| CalcError::expression(format!("Regex error: {}", e)))
}

/// Whether a quantity counts bits or bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bits,
    Bytes,
}

impl SizeUnit {
    /// Decide bits vs. bytes from a unit token.
    ///
    /// `byte...` (any case) or a leading `B` means bytes; `bit...` (any
    /// case) or a leading `b` means bits. Anything else is undecidable.
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        if lower.starts_with("byte") {
            Some(Self::Bytes)
        } else if lower.starts_with("bit") {
            Some(Self::Bits)
        } else if token.starts_with('B') {
            Some(Self::Bytes)
        } else if token.starts_with('b') {
            Some(Self::Bits)
        } else {
            None
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Bits => "bits",
            Self::Bytes => "Bytes",
        }
    }
}

/// A parsed size: magnitude, binary prefix letter and bit/byte unit
#[derive(Debug, Clone, PartialEq)]
pub struct SizeQuantity {
    pub magnitude: f64,
    pub prefix: String,
    pub multiplier: u128,
    pub unit: SizeUnit,
}

impl SizeQuantity {
    fn new(magnitude: f64, prefix: &str, unit_token: &str) -> Result<Self> {
        let multiplier = binary_multiplier(prefix)?;
        let unit = SizeUnit::from_token(unit_token).ok_or_else(|| {
            CalcError::ambiguous(format!(
                "unable to determine if bits or bytes were specified by '{}'",
                unit_token
            ))
        })?;
        Ok(Self {
            magnitude,
            prefix: prefix.to_string(),
            multiplier,
            unit,
        })
    }

    /// Size in bytes. Bit quantities are divided by eight.
    pub fn to_bytes(&self) -> f64 {
        let scaled = self.magnitude * self.multiplier as f64;
        match self.unit {
            SizeUnit::Bytes => scaled,
            SizeUnit::Bits => scaled / 8.0,
        }
    }

    /// The `Interpreting input as ...` line printed ahead of the report
    pub fn describe(&self) -> String {
        format!(
            "Interpreting input as {} {}{}",
            self.magnitude,
            self.prefix,
            self.unit.label()
        )
    }
}

/// Input accepted by [`parse_and_inspect_size`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeInput<'a> {
    /// Magnitude and unit in one string, e.g. `"4 GiB"`
    Text(&'a str),
    /// Bare magnitude; the unit is passed separately
    Number(f64),
}

impl<'a> From<&'a str> for SizeInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for SizeInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for SizeInput<'_> {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

/// Parse a combined magnitude-and-unit string such as `"1.5 MiB"`.
pub fn parse_size(text: &str) -> Result<SizeQuantity> {
    let caps = pattern(&SIZE_RE)?
        .captures(text)
        .ok_or_else(|| CalcError::parse(format!("unrecognized size value '{}'", text)))?;

    let magnitude: f64 = caps[1]
        .parse()
        .map_err(|e| CalcError::parse(format!("invalid magnitude '{}': {}", &caps[1], e)))?;

    let quantity = SizeQuantity::new(magnitude, &caps[2], &caps[3])?;
    debug!(input = text, bytes = quantity.to_bytes(), "parsed size");
    Ok(quantity)
}

/// Parse a unit string such as `"Kib"` or `"MB"` for a bare magnitude.
pub fn parse_size_unit(magnitude: f64, unit: &str) -> Result<SizeQuantity> {
    let caps = pattern(&SIZE_UNIT_RE)?
        .captures(unit)
        .ok_or_else(|| CalcError::parse(format!("unrecognized unit '{}'", unit)))?;

    let quantity = SizeQuantity::new(magnitude, &caps[1], &caps[2])?;
    debug!(
        magnitude = magnitude,
        unit = unit,
        bytes = quantity.to_bytes(),
        "parsed size unit"
    );
    Ok(quantity)
}

fn scaled(value: f64, divisor: u128, decimals: usize) -> String {
    format!("{:.*}", decimals, value / divisor as f64)
}

/// Byte-count report with a configurable number of decimal places.
pub fn inspect_byte_count_with(num_bytes: f64, decimals: usize) -> String {
    let num_bits = num_bytes * 8.0;
    let mut report = String::new();

    // Writing to String buffer is infallible
    let _ = writeln!(report, "Bytes (B)\t\t:\t{:.0}", num_bytes.trunc());
    let _ = writeln!(report, "Kilobytes (KB)\t\t:\t{}", scaled(num_bytes, K, decimals));
    let _ = writeln!(report, "Megabytes (MB)\t\t:\t{}", scaled(num_bytes, M, decimals));
    let _ = writeln!(report, "Gigabytes (GB)\t\t:\t{}", scaled(num_bytes, G, decimals));
    let _ = writeln!(report, "Terabytes (TB)\t\t:\t{}", scaled(num_bytes, T, decimals));
    report.push('\n');
    let _ = writeln!(report, "Bits (b)\t\t:\t{:.0}", num_bits.trunc());
    let _ = writeln!(report, "Kilobits (Kb)\t\t:\t{}", scaled(num_bits, K, decimals));
    let _ = writeln!(report, "Megabits (Mb)\t\t:\t{}", scaled(num_bits, M, decimals));
    let _ = writeln!(report, "Gigabits (Gb)\t\t:\t{}", scaled(num_bits, G, decimals));
    let _ = writeln!(report, "Terabits (Tb)\t\t:\t{}", scaled(num_bits, T, decimals));
    report
}

/// Report a byte count at byte/KB/MB/GB/TB scale, then the same in bits.
///
/// Scales are binary multiples. `metric` is accepted for call compatibility
/// and has no effect on the output.
pub fn inspect_byte_count(num_bytes: f64, metric: bool) -> String {
    let _ = metric;
    inspect_byte_count_with(num_bytes, DEFAULT_DECIMALS)
}

/// Resolve a size input to a [`SizeQuantity`].
///
/// Text input carries its own unit and ignores `unit`; numeric input
/// requires it.
pub fn resolve_size(value: SizeInput<'_>, unit: Option<&str>) -> Result<SizeQuantity> {
    match value {
        SizeInput::Text(text) => parse_size(text),
        SizeInput::Number(magnitude) => {
            let unit = unit.ok_or_else(|| {
                CalcError::ambiguous("unit must be specified for numeric inputs")
            })?;
            parse_size_unit(magnitude, unit)
        },
    }
}

/// Parse a size and return the `Interpreting input as ...` line followed by
/// the byte-count report.
pub fn parse_and_inspect_size<'a>(
    value: impl Into<SizeInput<'a>>,
    unit: Option<&str>,
    metric: bool,
) -> Result<String> {
    let quantity = resolve_size(value.into(), unit)?;
    Ok(format!(
        "{}\n{}",
        quantity.describe(),
        inspect_byte_count(quantity.to_bytes(), metric)
    ))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_unit_token() {
        assert_eq!(SizeUnit::from_token("B"), Some(SizeUnit::Bytes));
        assert_eq!(SizeUnit::from_token("bytes"), Some(SizeUnit::Bytes));
        assert_eq!(SizeUnit::from_token("Byte"), Some(SizeUnit::Bytes));
        assert_eq!(SizeUnit::from_token("b"), Some(SizeUnit::Bits));
        assert_eq!(SizeUnit::from_token("bit"), Some(SizeUnit::Bits));
        assert_eq!(SizeUnit::from_token("Bits"), Some(SizeUnit::Bits));
        assert_eq!(SizeUnit::from_token("x"), None);
        assert_eq!(SizeUnit::from_token(""), None);
    }

    #[test]
    fn test_parse_size_binary_kilo() {
        let q = parse_size("1KB").unwrap();
        assert_eq!(q.magnitude, 1.0);
        assert_eq!(q.prefix, "K");
        assert_eq!(q.multiplier, 1024);
        assert_eq!(q.unit, SizeUnit::Bytes);
        assert_eq!(q.to_bytes(), 1024.0);
    }

    #[test]
    fn test_parse_size_variants() {
        assert_eq!(parse_size("1.5 MiB").unwrap().to_bytes(), 1.5 * 1048576.0);
        assert_eq!(parse_size("8 bits").unwrap().to_bytes(), 1.0);
        assert_eq!(parse_size("1kbit").unwrap().to_bytes(), 128.0);
        assert_eq!(parse_size("1 Kib").unwrap().to_bytes(), 128.0);
        assert_eq!(parse_size("3 byte").unwrap().to_bytes(), 3.0);
        assert_eq!(parse_size("1mB").unwrap().to_bytes(), 1048576.0);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(matches!(parse_size("KB"), Err(CalcError::Parse(_))));
        assert!(matches!(parse_size("12"), Err(CalcError::Parse(_))));
        assert!(matches!(parse_size("1QB"), Err(CalcError::Parse(_))));
        assert!(matches!(parse_size("1.2.3KB"), Err(CalcError::Parse(_))));
    }

    #[test]
    fn test_parse_size_unit() {
        assert_eq!(parse_size_unit(64.0, "Kib").unwrap().to_bytes(), 8192.0);
        assert_eq!(parse_size_unit(2.0, "GB").unwrap().to_bytes(), 2.0 * 1073741824.0);
        assert!(matches!(
            parse_size_unit(1.0, "furlongs"),
            Err(CalcError::Parse(_))
        ));
    }

    #[test]
    fn test_numeric_input_requires_unit() {
        let err = parse_and_inspect_size(5.0, None, false).unwrap_err();
        assert!(matches!(err, CalcError::Ambiguous(_)));
    }

    #[test]
    fn test_text_input_ignores_unit() {
        let with_unit = parse_and_inspect_size("1KB", Some("Mb"), false).unwrap();
        let without = parse_and_inspect_size("1KB", None, false).unwrap();
        assert_eq!(with_unit, without);
    }

    #[test]
    fn test_inspect_byte_count() {
        let report = inspect_byte_count(1024.0, false);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Bytes (B)\t\t:\t1024");
        assert_eq!(lines[1], "Kilobytes (KB)\t\t:\t1.000");
        assert_eq!(lines[2], "Megabytes (MB)\t\t:\t0.001");
        assert_eq!(lines[3], "Gigabytes (GB)\t\t:\t0.000");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Bits (b)\t\t:\t8192");
        assert_eq!(lines[7], "Kilobits (Kb)\t\t:\t8.000");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_metric_flag_is_inert() {
        assert_eq!(
            inspect_byte_count(123456.0, true),
            inspect_byte_count(123456.0, false)
        );
    }

    #[test]
    fn test_inspect_byte_count_with_decimals() {
        let report = inspect_byte_count_with(1536.0, 1);
        assert!(report.contains("Kilobytes (KB)\t\t:\t1.5\n"));
    }

    #[test]
    fn test_parse_and_inspect_size_header() {
        let report = parse_and_inspect_size("1KB", None, false).unwrap();
        assert!(report.starts_with("Interpreting input as 1 KBytes\n"));
        assert!(report.contains("Bytes (B)\t\t:\t1024\n"));

        let report = parse_and_inspect_size(16u64, Some("b"), false).unwrap();
        assert!(report.starts_with("Interpreting input as 16 bits\n"));
        assert!(report.contains("Bytes (B)\t\t:\t2\n"));
    }

    #[test]
    fn test_largest_prefix_prints_exact_counts() {
        // 2^80 and 2^83 are exact in f64 but not in shortest-repr formatting
        let report = parse_and_inspect_size("1 YB", None, false).unwrap();
        assert!(report.contains("Bytes (B)\t\t:\t1208925819614629174706176\n"));
        assert!(report.contains("Bits (b)\t\t:\t9671406556917033397649408\n"));

        let report = parse_and_inspect_size("1 Yb", None, false).unwrap();
        assert!(report.contains("Bytes (B)\t\t:\t151115727451828646838272\n"));
        assert!(report.contains("Bits (b)\t\t:\t1208925819614629174706176\n"));
    }

    #[test]
    fn test_fractional_byte_count_is_truncated() {
        let report = inspect_byte_count(2.75, false);
        assert!(report.starts_with("Bytes (B)\t\t:\t2\n"));
        assert!(report.contains("Bits (b)\t\t:\t22\n"));
    }

    #[test]
    #[traced_test]
    fn test_parse_size_logs() {
        parse_size("2KB").unwrap();
        assert!(logs_contain("parsed size"));
    }
}
