//! Level-payment amortization of a fixed-rate loan

use serde::{Deserialize, Serialize};

use super::schedule::{Amortization, AmortizationRow};
use crate::error::{EngineError, Result};
use crate::rates::{growth_factor, monthly_rate, months_in, require_non_negative, require_positive};

/// Inputs for a fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (4.5 = 4.5%)
    pub annual_rate_percent: f64,

    /// Term in years; rounded to whole months
    pub term_years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Monthly interest rate as a decimal
    pub fn periodic_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    /// Number of monthly payments
    ///
    /// Fails with `InvalidInput` when the month count does not fit in a `u32`.
    pub fn periods(&self) -> Result<u32> {
        months_in(self.term_years)
    }
}

/// Compute the level monthly payment and the full amortization schedule
///
/// Payment: `M = P·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// A zero rate or zero term yields `EngineError::NotComputable` rather than a
/// division by zero. Precision degrades for very large `n` or very small `r`
/// because `(1+r)^n − 1` cancels; results are returned as computed.
pub fn amortize(terms: &LoanTerms) -> Result<Amortization> {
    let principal = require_positive("principal", terms.principal)?;
    let annual_rate = require_non_negative("annual_rate_percent", terms.annual_rate_percent)?;
    require_non_negative("term_years", terms.term_years)?;

    if annual_rate == 0.0 {
        return Err(EngineError::NotComputable("interest rate is zero"));
    }
    let n = terms.periods()?;
    if n == 0 {
        return Err(EngineError::NotComputable("loan term is zero"));
    }

    let r = terms.periodic_rate();
    let factor = growth_factor(r, n);
    let monthly_payment = principal * (r * factor) / (factor - 1.0);
    let total_payment = monthly_payment * n as f64;
    let total_interest = total_payment - principal;

    let schedule = build_schedule(principal, r, n, monthly_payment);

    log::debug!(
        "amortized {:.2} at {}% over {} months: payment {:.2}, interest {:.2}",
        principal,
        annual_rate,
        n,
        monthly_payment,
        total_interest
    );

    Ok(Amortization {
        terms: *terms,
        periodic_rate: r,
        periods: n,
        monthly_payment,
        total_payment,
        total_interest,
        schedule,
    })
}

/// Walk every period, splitting the payment into interest and principal
fn build_schedule(principal: f64, r: f64, n: u32, payment: f64) -> Vec<AmortizationRow> {
    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = principal;

    for period in 1..=n {
        let interest_portion = balance * r;
        let principal_portion = payment - interest_portion;
        balance = (balance - principal_portion).max(0.0);

        // Absorb accumulated drift so the loan closes exactly
        if period == n {
            balance = 0.0;
        }

        schedule.push(AmortizationRow {
            period,
            payment,
            principal_portion,
            interest_portion,
            ending_balance: balance,
        });
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mortgage() -> Amortization {
        amortize(&LoanTerms::new(300_000.0, 4.5, 30.0)).unwrap()
    }

    #[test]
    fn test_standard_30_year_mortgage() {
        let result = mortgage();
        assert_eq!(result.periods, 360);
        assert_eq!(result.schedule.len(), 360);
        assert!((result.monthly_payment - 1520.06).abs() < 0.005, "payment {}", result.monthly_payment);
        assert!((result.total_interest - 247_220.13).abs() < 0.01, "interest {}", result.total_interest);
        assert_relative_eq!(result.total_payment, result.monthly_payment * 360.0);
    }

    #[test]
    fn test_schedule_closes_and_repays_principal() {
        for (p, rate, years) in [(300_000.0, 4.5, 30.0), (12_000.0, 18.0, 2.0), (5_000.0, 0.25, 1.0), (250_000.0, 6.0, 2.5)] {
            let result = amortize(&LoanTerms::new(p, rate, years)).unwrap();
            let last = result.schedule.last().unwrap();
            assert!(last.ending_balance.abs() < 1e-6);

            let summary = result.summary();
            assert!((summary.total_principal - p).abs() < 1e-6 * p.max(1.0), "principal sum {} vs {}", summary.total_principal, p);
        }
    }

    #[test]
    fn test_rows_split_payment_and_balance_decreases() {
        let result = mortgage();
        let mut prior = result.terms.principal;
        for row in &result.schedule {
            assert!((row.principal_portion + row.interest_portion - row.payment).abs() < 1e-9);
            assert!(row.ending_balance >= 0.0);
            assert!(row.ending_balance < prior, "period {} did not reduce balance", row.period);
            prior = row.ending_balance;
        }
        // Interest share falls as the balance amortizes
        assert!(result.schedule[0].interest_portion > result.schedule[359].interest_portion);
        assert_relative_eq!(result.schedule[0].interest_portion, 1125.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_or_term_is_not_computable() {
        let zero_rate = amortize(&LoanTerms::new(10_000.0, 0.0, 5.0)).unwrap_err();
        assert!(zero_rate.is_not_computable());

        let zero_term = amortize(&LoanTerms::new(10_000.0, 5.0, 0.0)).unwrap_err();
        assert!(zero_term.is_not_computable());
    }

    #[test]
    fn test_invalid_inputs() {
        for terms in [
            LoanTerms::new(-1.0, 5.0, 5.0),
            LoanTerms::new(0.0, 5.0, 5.0),
            LoanTerms::new(1000.0, -5.0, 5.0),
            LoanTerms::new(1000.0, 5.0, -5.0),
            LoanTerms::new(f64::NAN, 5.0, 5.0),
        ] {
            let err = amortize(&terms).unwrap_err();
            assert!(matches!(err, EngineError::InvalidInput { .. }), "{:?} gave {:?}", terms, err);
        }
    }

    #[test]
    fn test_term_too_long_to_count_is_invalid() {
        let terms = LoanTerms::new(1_000.0, 5.0, 1e9);
        assert!(matches!(terms.periods(), Err(EngineError::InvalidInput { field: "years", .. })));
        assert!(matches!(amortize(&terms), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_preview_with_huge_head_returns_full_schedule() {
        let result = amortize(&LoanTerms::new(1_000.0, 5.0, 1.0)).unwrap();
        let preview = result.preview(usize::MAX);
        assert_eq!(preview.len(), 12);
        assert_eq!(preview.last().unwrap().period, 12);
    }

    #[test]
    fn test_preview_and_slices() {
        let result = mortgage();
        let preview = result.preview(12);
        assert_eq!(preview.len(), 13);
        assert_eq!(preview[11].period, 12);
        assert_eq!(preview[12].period, 360);

        let short = amortize(&LoanTerms::new(1_000.0, 12.0, 1.0)).unwrap();
        assert_eq!(short.preview(12).len(), 12);

        assert_eq!(result.rows(348..360).unwrap().len(), 12);
        assert!(result.rows(350..400).is_none());
        assert_eq!(result.period(1).unwrap().period, 1);
        assert!(result.period(0).is_none());
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        assert_eq!(mortgage(), mortgage());
    }
}
