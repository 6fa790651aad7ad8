//! Precondition checks shared by constructors and accumulator entry points.
//! Every check runs before any computation, so callers never see partial output.

use crate::error::{LcaError, Result};

/// Physical and emission parameters must be finite and non-negative.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LcaError::InvalidParameter { field, value })
    }
}

/// Usage and split fractions live in [0, 1].
pub fn fraction(field: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LcaError::FractionOutOfRange { field, value })
    }
}

/// Carried debt may be any finite number (a caller can start from a credit).
pub fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LcaError::InvalidParameter { field, value })
    }
}

/// A phase needs at least one anchor point and must never move backwards.
pub fn distances(d: &[f64]) -> Result<()> {
    let first = d.first().ok_or(LcaError::EmptyDistances)?;
    if !first.is_finite() {
        return Err(LcaError::NonMonotonicDistances { index: 0 });
    }
    for (i, pair) in d.windows(2).enumerate() {
        if !pair[1].is_finite() || pair[1] < pair[0] {
            return Err(LcaError::NonMonotonicDistances { index: i + 1 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert!(non_negative("weight", 0.0).is_ok());
        assert!(non_negative("weight", 1500.0).is_ok());
        assert!(non_negative("weight", -1.0).is_err());
        assert!(non_negative("weight", f64::NAN).is_err());
        assert!(non_negative("weight", f64::INFINITY).is_err());
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(fraction("usage", 0.0).is_ok());
        assert!(fraction("usage", 0.5).is_ok());
        assert!(fraction("usage", 1.0).is_ok());
        assert!(fraction("usage", -0.1).is_err());
        assert!(fraction("usage", 1.1).is_err());
        assert!(fraction("usage", f64::NAN).is_err());
    }

    #[test]
    fn test_distances() {
        assert!(matches!(distances(&[]), Err(LcaError::EmptyDistances)));
        assert!(distances(&[5.0]).is_ok());
        assert!(distances(&[0.0, 0.0, 10.0]).is_ok());
        assert!(matches!(
            distances(&[0.0, 10.0, 5.0]),
            Err(LcaError::NonMonotonicDistances { index: 2 })
        ));
        assert!(matches!(
            distances(&[f64::NAN]),
            Err(LcaError::NonMonotonicDistances { index: 0 })
        ));
    }
}
