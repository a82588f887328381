//! Shared numeric conventions for the projection engine
//!
//! All calculators quote rates as annual percentages (4.5 means 4.5%) and
//! compound monthly. Terms are given in years and converted to whole months.

use crate::error::{EngineError, Result};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage (e.g. 4.5) to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}

/// Number of monthly periods in a term given in years, rounded to the nearest month
///
/// Terms whose month count does not fit in a `u32` are rejected rather than
/// saturated.
pub fn months_in(years: f64) -> Result<u32> {
    let months = (years * MONTHS_PER_YEAR as f64).round();
    if !months.is_finite() || months < 0.0 || months > u32::MAX as f64 {
        log::warn!("rejecting term of {} years", years);
        return Err(EngineError::invalid("years", years));
    }
    Ok(months as u32)
}

/// Compound growth factor (1 + r)^n
///
/// `powi` is exact repeated squaring and stays stable for any realistic term;
/// terms beyond i32 fall back to `powf`.
pub fn growth_factor(rate: f64, periods: u32) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(periods as f64),
    }
}

/// Reject NaN, infinities and negative values
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        log::warn!("rejecting {} = {}", field, value);
        return Err(EngineError::invalid(field, value));
    }
    Ok(value)
}

/// Reject NaN, infinities, zero and negative values
pub fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        log::warn!("rejecting {} = {}", field, value);
        return Err(EngineError::invalid(field, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(6.0) - 0.005).abs() < 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_months_in_rounds_fractional_years() {
        assert_eq!(months_in(30.0), Ok(360));
        assert_eq!(months_in(2.5), Ok(30));
        assert_eq!(months_in(0.01), Ok(0));
    }

    #[test]
    fn test_months_in_rejects_terms_beyond_u32() {
        assert!(matches!(months_in(4.0e8), Err(EngineError::InvalidInput { field: "years", .. })));
        assert!(months_in(f64::INFINITY).is_err());
        assert!(months_in(-1.0).is_err());
        let max_years = u32::MAX as f64 / MONTHS_PER_YEAR as f64;
        assert_eq!(months_in(max_years), Ok(u32::MAX));
    }

    #[test]
    fn test_growth_factor_matches_powf() {
        let r = 0.07 / 12.0;
        let exact = (1.0_f64 + r).powf(360.0);
        assert!((growth_factor(r, 360) - exact).abs() / exact < 1e-12);
        assert_eq!(growth_factor(0.0, 1000), 1.0);
    }

    #[test]
    fn test_validation() {
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -1.0).is_err());
        assert!(require_non_negative("x", f64::NAN).is_err());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert_eq!(require_positive("x", 2.5), Ok(2.5));
    }
}
