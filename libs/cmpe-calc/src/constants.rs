//! Lookup tables shared by the size and SI conversions
//!
//! Binary-multiple magnitudes follow the JEDEC convention (powers of 1024),
//! so `K` is 1024 regardless of whether the caller thinks in kilo or kibi.
//! The SI table maps prefix abbreviations to decimal exponents.

use crate::error::{CalcError, Result};

/// JEDEC bit and byte prefixes (base 2)
pub const K: u128 = 1 << 10;
pub const M: u128 = 1 << 20;
pub const G: u128 = 1 << 30;
pub const T: u128 = 1 << 40;
pub const P: u128 = 1 << 50;
pub const E: u128 = 1 << 60;
pub const Z: u128 = 1 << 70;
pub const Y: u128 = 1 << 80;

/// IEC names for the same magnitudes
pub const KI: u128 = K;
pub const MI: u128 = M;
pub const GI: u128 = G;
pub const TI: u128 = T;
pub const PI: u128 = P;
pub const EI: u128 = E;
pub const ZI: u128 = Z;
pub const YI: u128 = Y;

/// Named binary-multiple constants as exposed to the evaluation namespace.
///
/// Lowercase `k` is the metric spelling of `K`; it still means 1024.
pub const BINARY_MULTIPLES: &[(&str, u128)] = &[
    ("K", K),
    ("M", M),
    ("G", G),
    ("T", T),
    ("P", P),
    ("E", E),
    ("Z", Z),
    ("Y", Y),
    ("k", K),
    ("Ki", KI),
    ("Mi", MI),
    ("Gi", GI),
    ("Ti", TI),
    ("Pi", PI),
    ("Ei", EI),
    ("Zi", ZI),
    ("Yi", YI),
];

/// Multiplier for a single-letter binary prefix. Case is ignored.
///
/// An empty prefix means a multiplier of one.
pub fn binary_multiplier(prefix: &str) -> Result<u128> {
    match prefix {
        "" => Ok(1),
        "k" | "K" => Ok(K),
        "m" | "M" => Ok(M),
        "g" | "G" => Ok(G),
        "t" | "T" => Ok(T),
        "p" | "P" => Ok(P),
        "e" | "E" => Ok(E),
        "z" | "Z" => Ok(Z),
        "y" | "Y" => Ok(Y),
        other => Err(CalcError::unknown_prefix(format!(
            "'{}' is not a binary-multiple prefix",
            other
        ))),
    }
}

/// One row of the SI prefix table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiPrefix {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub exponent: i32,
}

const fn si(abbreviation: &'static str, name: &'static str, exponent: i32) -> SiPrefix {
    SiPrefix {
        abbreviation,
        name,
        exponent,
    }
}

/// SI prefixes from yotta down to yocto
pub const SI_PREFIXES: &[SiPrefix] = &[
    si("Y", "yotta", 24),
    si("Z", "zetta", 21),
    si("E", "exa", 18),
    si("P", "peta", 15),
    si("T", "tera", 12),
    si("G", "giga", 9),
    si("M", "mega", 6),
    si("k", "kilo", 3),
    si("h", "hecto", 2),
    si("da", "deca", 1),
    si("", "", 0),
    si("d", "deci", -1),
    si("c", "centi", -2),
    si("m", "milli", -3),
    si("u", "micro", -6),
    si("n", "nano", -9),
    si("p", "pico", -12),
    si("f", "femto", -15),
    si("a", "atto", -18),
    si("z", "zepto", -21),
    si("y", "yocto", -24),
];

/// Look up an SI prefix by its (case-sensitive) abbreviation.
pub fn si_prefix(abbreviation: &str) -> Result<&'static SiPrefix> {
    SI_PREFIXES
        .iter()
        .find(|p| p.abbreviation == abbreviation)
        .ok_or_else(|| {
            CalcError::unknown_prefix(format!("'{}' is not an SI prefix", abbreviation))
        })
}
