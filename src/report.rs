//! CSV export of calculator output
//!
//! Amounts are written with two decimals, rates as given.

use std::io::Write;

use csv::Writer;

use crate::currency::ConversionResult;
use crate::error::{EngineError, StoreError};
use crate::goal::{GoalStats, SavingsGoal};
use crate::growth::GrowthYearRow;
use crate::loan::AmortizationRow;

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write amortization rows (full schedule or any slice of it)
pub fn write_schedule<'a, W, I>(out: W, rows: I) -> Result<(), StoreError>
where
    W: Write,
    I: IntoIterator<Item = &'a AmortizationRow>,
{
    let mut writer = Writer::from_writer(out);
    writer.write_record(["Month", "Payment", "Principal", "Interest", "Balance"])?;
    for row in rows {
        writer.write_record([
            row.period.to_string(),
            money(row.payment),
            money(row.principal_portion),
            money(row.interest_portion),
            money(row.ending_balance),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-year growth breakdown
pub fn write_yearly_breakdown<W: Write>(out: W, rows: &[GrowthYearRow]) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["Year", "Months", "Contributions", "Interest", "Balance"])?;
    for row in rows {
        writer.write_record([
            row.year.to_string(),
            row.months.to_string(),
            money(row.contributions_this_year),
            money(row.interest_this_year),
            money(row.ending_balance),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one line per goal with its evaluation, or the evaluation error
pub fn write_goal_stats<W: Write>(
    out: W,
    rows: &[(&SavingsGoal, Result<GoalStats, EngineError>)],
) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "Goal",
        "Target",
        "Current",
        "TargetDate",
        "Progress%",
        "Remaining",
        "DaysRemaining",
        "MonthsRemaining",
        "RequiredMonthly",
        "OnTrack",
    ])?;
    for (goal, stats) in rows {
        let mut record = vec![
            goal.name.clone(),
            money(goal.target_amount),
            money(goal.current_amount),
            goal.target_date.to_string(),
        ];
        match stats {
            Ok(stats) => record.extend([
                format!("{:.1}", stats.progress_percent),
                money(stats.remaining),
                stats.days_remaining.to_string(),
                stats.months_remaining.to_string(),
                stats
                    .required_monthly_contribution
                    .map(money)
                    .unwrap_or_else(|| "due now".to_string()),
                stats.is_on_track.to_string(),
            ]),
            Err(err) => {
                record.push(err.to_string());
                record.extend(std::iter::repeat_n(String::new(), 5));
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write conversion history entries
pub fn write_conversions<W: Write>(out: W, entries: &[ConversionResult]) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["Timestamp", "FromAmount", "From", "ToAmount", "To", "Rate"])?;
    for entry in entries {
        writer.write_record([
            entry.timestamp.to_rfc3339(),
            money(entry.from_amount),
            entry.from_currency.clone(),
            money(entry.to_amount),
            entry.to_currency.clone(),
            entry.rate.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
