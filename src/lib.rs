//! Finance Toolkit - Projection engine for personal-finance calculators
//!
//! This library provides:
//! - Fixed-rate loan amortization with a full payment schedule
//! - Investment growth projection (closed form cross-checked by monthly simulation)
//! - Savings goal progress and required contributions
//! - Currency conversion against static or cached rate tables
//! - Expense ledger totals, record persistence and CSV report export

pub mod error;
pub mod rates;
pub mod loan;
pub mod growth;
pub mod goal;
pub mod currency;
pub mod expense;
pub mod store;
pub mod report;
pub mod scenario;
pub mod config;

// Re-export commonly used types
pub use error::{EngineError, StoreError};
pub use loan::{amortize, Amortization, AmortizationRow, LoanTerms};
pub use growth::{project, GrowthProjection, GrowthTerms, GrowthYearRow};
pub use goal::{evaluate, GoalBook, GoalStats, SavingsGoal};
pub use currency::{ConversionHistory, ConversionResult, RateTable};
pub use expense::{Expense, ExpenseLedger, ExpenseSummary};
pub use store::{JsonFileStore, MemoryStore, Repository};
pub use scenario::ScenarioRunner;
pub use config::ToolkitConfig;
