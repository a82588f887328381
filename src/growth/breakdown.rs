//! Growth projection output structures

use serde::{Deserialize, Serialize};

use super::projector::GrowthTerms;

/// Aggregated simulation results for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthYearRow {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Months simulated in this row (12, or fewer for a trailing partial year)
    pub months: u32,

    pub contributions_this_year: f64,
    pub interest_this_year: f64,

    /// Balance at the end of the last month in this row
    pub ending_balance: f64,
}

/// Complete growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub terms: GrowthTerms,

    /// Closed-form future value of principal plus contributions
    pub final_amount: f64,

    /// Initial principal plus every monthly contribution
    pub total_contributions: f64,

    /// final_amount - total_contributions
    pub total_interest: f64,

    /// Month-by-month simulation aggregated per year
    pub yearly_breakdown: Vec<GrowthYearRow>,
}

impl GrowthProjection {
    /// Absolute gap between the closed-form total and the simulated ending balance
    pub fn simulation_drift(&self) -> f64 {
        let simulated = self
            .yearly_breakdown
            .last()
            .map(|r| r.ending_balance)
            .unwrap_or(self.terms.initial_principal);
        (self.final_amount - simulated).abs()
    }

    /// Interest earned according to the simulation
    pub fn simulated_interest(&self) -> f64 {
        self.yearly_breakdown.iter().map(|r| r.interest_this_year).sum()
    }

    /// False if any headline figure overflowed to inf/NaN
    pub fn is_finite(&self) -> bool {
        self.final_amount.is_finite()
            && self.total_contributions.is_finite()
            && self.total_interest.is_finite()
    }
}
