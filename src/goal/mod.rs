//! Savings goal evaluation and the goal book

mod tracker;
mod book;

pub use tracker::{evaluate, evaluate_today, GoalStats, SavingsGoal, DAYS_PER_MONTH};
pub use book::{GoalBook, NewGoal};
