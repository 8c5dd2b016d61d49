//! Solver for the proportion `n1 / d1 = n2 / d2`

use crate::error::{CalcError, Result};
use tracing::debug;

/// One term of a proportion: a known number or the unknown to solve for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    Known(f64),
    Unknown,
}

/// Shorthand for the unknown term, so calls read `solve_ratio(X, 2.0.into(), ..)`
pub const X: Term = Term::Unknown;

impl Term {
    fn known(self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Self::Known(value)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Self::Known(value as f64)
    }
}

impl From<Option<f64>> for Term {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

fn cross(a: f64, b: f64, divisor: f64) -> Result<f64> {
    if divisor == 0.0 {
        return Err(CalcError::domain("ratio: division by zero"));
    }
    Ok(a * b / divisor)
}

/// Solve `n1 / d1 = n2 / d2` for the single unknown term by cross-multiplication.
///
/// Exactly one term must be [`Term::Unknown`]; anything else is ambiguous.
pub fn solve_ratio(n1: Term, d1: Term, n2: Term, d2: Term) -> Result<f64> {
    let terms = [n1, d1, n2, d2];
    let unknowns = terms.iter().filter(|t| **t == Term::Unknown).count();
    if unknowns != 1 {
        return Err(CalcError::ambiguous(format!(
            "ratio needs exactly one unknown term, got {}",
            unknowns
        )));
    }

    let solved = match (n1.known(), d1.known(), n2.known(), d2.known()) {
        (None, Some(d1), Some(n2), Some(d2)) => cross(d1, n2, d2),
        (Some(n1), None, Some(n2), Some(d2)) => cross(n1, d2, n2),
        (Some(n1), Some(d1), None, Some(d2)) => cross(d2, n1, d1),
        (Some(n1), Some(d1), Some(n2), None) => cross(n2, d1, n1),
        _ => Err(CalcError::ambiguous("ratio needs exactly one unknown term")),
    }?;

    debug!(?n1, ?d1, ?n2, ?d2, solved = solved, "solve_ratio");
    Ok(solved)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_each_position() {
        // x/2 = 4/8
        assert_eq!(solve_ratio(X, 2.0.into(), 4.0.into(), 8.0.into()).unwrap(), 1.0);
        // 1/x = 4/8
        assert_eq!(solve_ratio(1.0.into(), X, 4.0.into(), 8.0.into()).unwrap(), 2.0);
        // 1/2 = x/8
        assert_eq!(solve_ratio(1.0.into(), 2.0.into(), X, 8.0.into()).unwrap(), 4.0);
        // 1/2 = 4/x
        assert_eq!(solve_ratio(1.0.into(), 2.0.into(), 4.0.into(), X).unwrap(), 8.0);
    }

    #[test]
    fn test_integer_terms() {
        assert_eq!(solve_ratio(X, 3i64.into(), 10i64.into(), 4i64.into()).unwrap(), 7.5);
    }

    #[test]
    fn test_no_unknown_is_ambiguous() {
        let err = solve_ratio(1.0.into(), 2.0.into(), 4.0.into(), 8.0.into()).unwrap_err();
        assert!(matches!(err, CalcError::Ambiguous(_)));
    }

    #[test]
    fn test_two_unknowns_is_ambiguous() {
        assert!(matches!(
            solve_ratio(X, X, 4.0.into(), 8.0.into()),
            Err(CalcError::Ambiguous(_))
        ));
    }

    #[test]
    fn test_zero_divisor() {
        assert!(matches!(
            solve_ratio(X, 2.0.into(), 4.0.into(), 0.0.into()),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_option_terms() {
        assert_eq!(
            solve_ratio(Term::from(None), Some(2.0).into(), Some(4.0).into(), Some(8.0).into())
                .unwrap(),
            1.0
        );
    }
}
