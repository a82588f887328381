//! Scenario runner for batch projections
//!
//! Every scenario is an independent pure calculation, so batches fan out
//! across threads with rayon and come back in input order.

use rayon::prelude::*;

use crate::error::Result;
use crate::growth::{project, GrowthProjection, GrowthTerms};
use crate::loan::{amortize, Amortization, LoanTerms};

/// Batch runner for growth and loan scenarios
///
/// # Example
/// ```
/// use finance_toolkit::{GrowthTerms, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let base = GrowthTerms::new(10_000.0, 500.0, 7.0, 30.0);
/// let results = runner.rate_sweep(&base, &[5.0, 7.0, 9.0]);
/// assert_eq!(results.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    /// Keep only headline figures (drop schedules and breakdowns)
    summary_only: bool,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that strips per-period detail from every result
    pub fn summary_only() -> Self {
        Self { summary_only: true }
    }

    /// Project each growth scenario
    pub fn run_growth(&self, scenarios: &[GrowthTerms]) -> Vec<Result<GrowthProjection>> {
        scenarios
            .par_iter()
            .map(|terms| -> Result<GrowthProjection> {
                let mut result = project(terms)?;
                if self.summary_only {
                    result.yearly_breakdown.clear();
                }
                Ok(result)
            })
            .collect()
    }

    /// Amortize each loan scenario
    pub fn run_loans(&self, scenarios: &[LoanTerms]) -> Vec<Result<Amortization>> {
        scenarios
            .par_iter()
            .map(|terms| -> Result<Amortization> {
                let mut result = amortize(terms)?;
                if self.summary_only {
                    result.schedule.clear();
                }
                Ok(result)
            })
            .collect()
    }

    /// Growth scenarios identical to `base` except for the annual rate
    pub fn rate_sweep(&self, base: &GrowthTerms, rates: &[f64]) -> Vec<Result<GrowthProjection>> {
        let scenarios: Vec<GrowthTerms> = rates.iter().map(|&rate| base.with_rate(rate)).collect();
        self.run_growth(&scenarios)
    }
}
