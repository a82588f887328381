//! Fixed-rate loan amortization

mod amortizer;
mod schedule;

pub use amortizer::{amortize, LoanTerms};
pub use schedule::{Amortization, AmortizationRow, ScheduleSummary};
