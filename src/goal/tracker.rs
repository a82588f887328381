//! Snapshot evaluation of a savings goal against a date

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rates::{require_non_negative, require_positive};

/// Month length used to turn days into months.
///
/// Goal tracking counts every month as 30 days. Calendar-accurate month
/// arithmetic would change the figures users already see, so the
/// approximation stays.
pub const DAYS_PER_MONTH: i64 = 30;

/// A savings target owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    /// Amount the owner plans to set aside each month
    pub monthly_contribution: f64,
}

/// Derived progress figures for one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStats {
    /// current / target, capped at 100
    pub progress_percent: f64,

    /// Amount still to save, never negative
    pub remaining: f64,

    pub days_remaining: u32,

    /// ceil(days_remaining / 30)
    pub months_remaining: u32,

    /// Contribution per month needed to finish on time.
    /// None when the date has passed with money still outstanding.
    pub required_monthly_contribution: Option<f64>,

    pub is_on_track: bool,
}

impl GoalStats {
    /// Target date has passed and the remaining amount is due at once
    pub fn requires_immediate_payment(&self) -> bool {
        self.required_monthly_contribution.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0.0
    }
}

/// Evaluate a goal as of the given date
pub fn evaluate(goal: &SavingsGoal, as_of: NaiveDate) -> Result<GoalStats> {
    let target = require_positive("target_amount", goal.target_amount)?;
    let current = require_non_negative("current_amount", goal.current_amount)?;
    let monthly = require_non_negative("monthly_contribution", goal.monthly_contribution)?;

    let progress_percent = (current / target * 100.0).min(100.0);
    let remaining = (target - current).max(0.0);

    let days = (goal.target_date - as_of).num_days().max(0);
    let months = (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH;

    let required_monthly_contribution = if months > 0 {
        Some(remaining / months as f64)
    } else if remaining == 0.0 {
        Some(0.0)
    } else {
        None
    };

    let is_on_track = match required_monthly_contribution {
        Some(required) => monthly >= required,
        None => false,
    };

    Ok(GoalStats {
        progress_percent,
        remaining,
        days_remaining: u32::try_from(days).unwrap_or(u32::MAX),
        months_remaining: u32::try_from(months).unwrap_or(u32::MAX),
        required_monthly_contribution,
        is_on_track,
    })
}

/// Evaluate a goal against the local calendar date
pub fn evaluate_today(goal: &SavingsGoal) -> Result<GoalStats> {
    evaluate(goal, Local::now().date_naive())
}
