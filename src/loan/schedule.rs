//! Amortization schedule output structures

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::amortizer::LoanTerms;

/// One period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub period: u32,
    pub payment: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    /// Outstanding balance after this payment
    pub ending_balance: f64,
}

/// Complete amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    /// Terms this schedule was computed from
    pub terms: LoanTerms,

    /// Monthly interest rate as a decimal
    pub periodic_rate: f64,

    /// Number of monthly payments
    pub periods: u32,

    /// Level monthly payment
    pub monthly_payment: f64,

    /// Sum of all payments (monthly_payment * periods)
    pub total_payment: f64,

    /// total_payment - principal
    pub total_interest: f64,

    /// One row per period, in order
    pub schedule: Vec<AmortizationRow>,
}

impl Amortization {
    /// Get a row by period number (1-indexed)
    pub fn period(&self, period: u32) -> Option<&AmortizationRow> {
        let idx = (period as usize).checked_sub(1)?;
        self.schedule.get(idx)
    }

    /// Slice of the schedule by 0-based row index
    pub fn rows(&self, range: Range<usize>) -> Option<&[AmortizationRow]> {
        self.schedule.get(range)
    }

    /// First `head` rows followed by the final payment
    ///
    /// Returns the whole schedule when it is no longer than `head + 1` rows.
    pub fn preview(&self, head: usize) -> Vec<&AmortizationRow> {
        if self.schedule.len() <= head.saturating_add(1) {
            return self.schedule.iter().collect();
        }
        let mut rows: Vec<&AmortizationRow> = self.schedule[..head].iter().collect();
        rows.extend(self.schedule.last());
        rows
    }

    /// False if any headline figure overflowed to inf/NaN
    pub fn is_finite(&self) -> bool {
        self.monthly_payment.is_finite()
            && self.total_payment.is_finite()
            && self.total_interest.is_finite()
    }

    /// Totals re-derived from the schedule rows
    pub fn summary(&self) -> ScheduleSummary {
        let total_principal: f64 = self.schedule.iter().map(|r| r.principal_portion).sum();
        let total_interest: f64 = self.schedule.iter().map(|r| r.interest_portion).sum();
        let total_paid: f64 = self.schedule.iter().map(|r| r.payment).sum();
        let final_balance = self.schedule.last().map(|r| r.ending_balance).unwrap_or(0.0);

        ScheduleSummary {
            periods: self.schedule.len() as u32,
            total_principal,
            total_interest,
            total_paid,
            final_balance,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_principal: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub final_balance: f64,
}
