//! Closed-form growth totals cross-checked by a monthly simulation

use serde::{Deserialize, Serialize};

use super::breakdown::{GrowthProjection, GrowthYearRow};
use crate::error::{EngineError, Result};
use crate::rates::{growth_factor, monthly_rate, months_in, require_non_negative, MONTHS_PER_YEAR};

/// Inputs for an investment growth projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthTerms {
    /// Starting balance
    pub initial_principal: f64,

    /// Contribution added at the end of every month
    pub monthly_contribution: f64,

    /// Expected annual return in percent, compounded monthly
    pub annual_rate_percent: f64,

    /// Duration in years; rounded to whole months
    pub years: f64,
}

impl GrowthTerms {
    pub fn new(initial_principal: f64, monthly_contribution: f64, annual_rate_percent: f64, years: f64) -> Self {
        Self {
            initial_principal,
            monthly_contribution,
            annual_rate_percent,
            years,
        }
    }

    /// Same terms with a different annual rate
    pub fn with_rate(&self, annual_rate_percent: f64) -> Self {
        Self {
            annual_rate_percent,
            ..*self
        }
    }
}

/// Project a balance forward with monthly compounding and end-of-month contributions
///
/// Totals come from the closed form
/// `P·(1+r)^m + PMT·((1+r)^m − 1)/r` (or `PMT·m` when `r == 0`). The yearly
/// breakdown is produced by an independent month-by-month simulation; the two
/// agree to floating-point tolerance.
pub fn project(terms: &GrowthTerms) -> Result<GrowthProjection> {
    let principal = require_non_negative("initial_principal", terms.initial_principal)?;
    let contribution = require_non_negative("monthly_contribution", terms.monthly_contribution)?;
    require_non_negative("annual_rate_percent", terms.annual_rate_percent)?;
    require_non_negative("years", terms.years)?;

    let months = months_in(terms.years)?;
    if months == 0 {
        return Err(EngineError::NotComputable("projection duration is zero"));
    }

    let r = monthly_rate(terms.annual_rate_percent);
    let factor = growth_factor(r, months);

    let principal_fv = principal * factor;
    let contributions_fv = if r > 0.0 {
        contribution * (factor - 1.0) / r
    } else {
        contribution * months as f64
    };

    let final_amount = principal_fv + contributions_fv;
    let total_contributions = principal + contribution * months as f64;
    let total_interest = final_amount - total_contributions;

    let yearly_breakdown = simulate(principal, contribution, r, months);

    log::debug!(
        "projected {:.2} + {:.2}/month at {}% for {} months: final {:.2}",
        principal,
        contribution,
        terms.annual_rate_percent,
        months,
        final_amount
    );

    Ok(GrowthProjection {
        terms: *terms,
        final_amount,
        total_contributions,
        total_interest,
        yearly_breakdown,
    })
}

/// Month-by-month balance roll-forward, one row per (possibly partial) year
fn simulate(principal: f64, contribution: f64, r: f64, months: u32) -> Vec<GrowthYearRow> {
    let mut rows = Vec::with_capacity(months.div_ceil(MONTHS_PER_YEAR) as usize);
    let mut balance = principal;
    let mut row = GrowthYearRow {
        year: 1,
        months: 0,
        contributions_this_year: 0.0,
        interest_this_year: 0.0,
        ending_balance: balance,
    };

    for month in 1..=months {
        let interest = balance * r;
        balance += interest + contribution;

        row.months += 1;
        row.interest_this_year += interest;
        row.contributions_this_year += contribution;
        row.ending_balance = balance;

        if month % MONTHS_PER_YEAR == 0 || month == months {
            let next_year = row.year + 1;
            rows.push(row);
            row = GrowthYearRow {
                year: next_year,
                months: 0,
                contributions_this_year: 0.0,
                interest_this_year: 0.0,
                ending_balance: balance,
            };
        }
    }

    rows
}
