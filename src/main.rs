//! Finance Toolkit CLI
//!
//! Command-line front end for the loan, investment, savings goal, currency
//! and expense tools

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use finance_toolkit::config::ToolkitConfig;
use finance_toolkit::currency::format_amount;
use finance_toolkit::expense::NewExpense;
use finance_toolkit::goal::NewGoal;
use finance_toolkit::{
    amortize, project, report, ConversionHistory, ExpenseLedger, GoalBook, GrowthTerms, JsonFileStore, LoanTerms,
    RateTable,
};

#[derive(Parser, Debug)]
#[command(name = "finance", about = "Personal-finance calculators: loans, investments, savings goals, currency, expenses")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for saved goals, expenses and conversions (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly payment and amortization schedule for a fixed-rate loan
    Loan {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 4.5")]
        rate: f64,
        #[arg(long, help = "Term in years")]
        years: f64,
        #[arg(long, help = "Leading months to print before the final payment")]
        preview: Option<usize>,
        #[arg(long, help = "Write the full schedule to this CSV file")]
        csv: Option<PathBuf>,
    },
    /// Growth of a lump sum plus monthly contributions
    Invest {
        #[arg(long, default_value_t = 0.0)]
        principal: f64,
        #[arg(long, default_value_t = 0.0)]
        monthly: f64,
        #[arg(long, help = "Expected annual return in percent, e.g. 7")]
        rate: f64,
        #[arg(long)]
        years: f64,
        #[arg(long, help = "Write the yearly breakdown to this CSV file")]
        csv: Option<PathBuf>,
    },
    /// Savings goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// Convert an amount between currencies
    Convert {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, help = "CSV rate snapshot (from,to,rate); overrides config")]
        rates: Option<PathBuf>,
    },
    /// Expense tracker
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },
}

#[derive(Subcommand, Debug)]
enum GoalAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        #[arg(long, help = "Target date, YYYY-MM-DD")]
        date: NaiveDate,
        #[arg(long, default_value_t = 0.0)]
        monthly: f64,
    },
    /// Show progress for every goal
    List {
        #[arg(long, help = "Evaluate as of this date instead of today")]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Set the saved amount for a goal
    Update {
        id: String,
        #[arg(long)]
        amount: f64,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ExpenseAction {
    Add {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long, help = "Date, YYYY-MM-DD (defaults to today)")]
        date: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
    },
    List,
    Remove {
        id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = ToolkitConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Loan { principal, rate, years, preview, csv } => {
            run_loan(&config, LoanTerms::new(principal, rate, years), preview, csv.as_deref())
        }
        Command::Invest { principal, monthly, rate, years, csv } => {
            run_invest(GrowthTerms::new(principal, monthly, rate, years), csv.as_deref())
        }
        Command::Goal { action } => run_goal(&config, action),
        Command::Convert { amount, from, to, rates } => run_convert(&config, amount, &from, &to, rates),
        Command::Expense { action } => run_expense(&config, action),
    }
}

fn run_loan(config: &ToolkitConfig, terms: LoanTerms, preview: Option<usize>, csv: Option<&Path>) -> Result<()> {
    let loan = match amortize(&terms) {
        Ok(loan) => loan,
        Err(err) if err.is_not_computable() => {
            println!("Nothing to calculate: {}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    if !loan.is_finite() {
        anyhow::bail!("loan figures overflowed; check the inputs");
    }

    println!("Loan: ${:.2} at {}% for {} years ({} payments)", terms.principal, terms.annual_rate_percent, terms.term_years, loan.periods);
    println!("  Monthly Payment: ${:.2}", loan.monthly_payment);
    println!("  Total Payment:   ${:.2}", loan.total_payment);
    println!("  Total Interest:  ${:.2}", loan.total_interest);
    println!();
    println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Principal", "Interest", "Balance");
    println!("{}", "-".repeat(60));

    let head = preview.unwrap_or(config.preview_months);
    let rows = loan.preview(head);
    for (i, row) in rows.iter().enumerate() {
        if i == head && loan.schedule.len() > head.saturating_add(1) {
            println!("{:>5}", "...");
        }
        println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.period, row.payment, row.principal_portion, row.interest_portion, row.ending_balance);
    }

    if let Some(path) = csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_schedule(file, &loan.schedule)?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_invest(terms: GrowthTerms, csv: Option<&Path>) -> Result<()> {
    let growth = match project(&terms) {
        Ok(growth) => growth,
        Err(err) if err.is_not_computable() => {
            println!("Nothing to calculate: {}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    if !growth.is_finite() {
        anyhow::bail!("projection overflowed; check the inputs");
    }

    println!("Investment: ${:.2} + ${:.2}/month at {}% for {} years", terms.initial_principal, terms.monthly_contribution, terms.annual_rate_percent, terms.years);
    println!("  Final Amount:        ${:.2}", growth.final_amount);
    println!("  Total Contributions: ${:.2}", growth.total_contributions);
    println!("  Total Interest:      ${:.2}", growth.total_interest);
    println!();
    println!("{:>4} {:>14} {:>14} {:>16}", "Year", "Contributions", "Interest", "Balance");
    println!("{}", "-".repeat(52));
    for row in &growth.yearly_breakdown {
        println!("{:>4} {:>14.2} {:>14.2} {:>16.2}", row.year, row.contributions_this_year, row.interest_this_year, row.ending_balance);
    }

    if let Some(path) = csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_yearly_breakdown(file, &growth.yearly_breakdown)?;
        println!("\nBreakdown written to: {}", path.display());
    }
    Ok(())
}

fn run_goal(config: &ToolkitConfig, action: GoalAction) -> Result<()> {
    let store = JsonFileStore::in_dir(&config.data_dir, "goals");
    let mut book = GoalBook::load(&store).with_context(|| format!("loading {}", store.path().display()))?;

    match action {
        GoalAction::Add { name, target, current, date, monthly } => {
            let id = book.add(NewGoal {
                name,
                target_amount: target,
                current_amount: current,
                target_date: date,
                monthly_contribution: monthly,
            })?;
            book.save(&store)?;
            println!("Added goal {}", id);
        }
        GoalAction::List { as_of, csv } => {
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            let results = book.evaluate_all(as_of);
            let rows: Vec<_> = book.goals().iter().zip(results.into_iter().map(|(_, stats)| stats)).collect();

            if rows.is_empty() {
                println!("No savings goals yet.");
            }
            for (goal, stats) in &rows {
                match stats {
                    Ok(stats) => {
                        let required = match stats.required_monthly_contribution {
                            Some(amount) => format_amount(amount, &config.base_currency),
                            None => "due now".to_string(),
                        };
                        println!("{} [{}] {:.1}% of {}, {} left, {} days, needs {}/month, {}",
                            goal.name, goal.id, stats.progress_percent,
                            format_amount(goal.target_amount, &config.base_currency),
                            format_amount(stats.remaining, &config.base_currency),
                            stats.days_remaining, required,
                            if stats.is_on_track { "on track" } else { "behind" });
                    }
                    Err(err) => println!("{} [{}] cannot evaluate: {}", goal.name, goal.id, err),
                }
            }

            if let Some(path) = csv {
                let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                report::write_goal_stats(file, &rows)?;
                println!("\nGoal report written to: {}", path.display());
            }
        }
        GoalAction::Update { id, amount } => {
            book.update_current_amount(&id, amount)?;
            book.save(&store)?;
            println!("Updated goal {}", id);
        }
        GoalAction::Remove { id } => {
            let removed = book.remove(&id)?;
            book.save(&store)?;
            println!("Removed goal {} ({})", removed.id, removed.name);
        }
    }
    Ok(())
}

fn run_convert(config: &ToolkitConfig, amount: f64, from: &str, to: &str, rates: Option<PathBuf>) -> Result<()> {
    let table = match rates.or_else(|| config.rates_path.clone()) {
        Some(path) => RateTable::from_csv_path(&path).with_context(|| format!("loading rates from {}", path.display()))?,
        None => RateTable::fallback(),
    };

    let result = table.convert(amount, from, to, Utc::now())?;
    println!("{} = {}  (rate {})",
        format_amount(result.from_amount, &result.from_currency),
        format_amount(result.to_amount, &result.to_currency),
        result.rate);

    let store = JsonFileStore::in_dir(&config.data_dir, "conversions");
    let mut history = ConversionHistory::load(&store, config.history_limit)?;
    history.record(result);
    history.save(&store)?;
    Ok(())
}

fn run_expense(config: &ToolkitConfig, action: ExpenseAction) -> Result<()> {
    let store = JsonFileStore::in_dir(&config.data_dir, "expenses");
    let mut ledger = ExpenseLedger::load(&store).with_context(|| format!("loading {}", store.path().display()))?;

    match action {
        ExpenseAction::Add { amount, description, date, category } => {
            let id = ledger.add(NewExpense {
                amount,
                description,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                category,
            })?;
            ledger.save(&store)?;
            println!("Added expense {}", id);
        }
        ExpenseAction::List => {
            for expense in ledger.iter() {
                println!("{} {} {:>10} {} {}",
                    expense.id, expense.date,
                    format_amount(expense.amount, &config.base_currency),
                    expense.description,
                    expense.category.as_deref().unwrap_or(""));
            }
            let summary = ledger.summary();
            println!("\nTotal Expenses: {}", format_amount(summary.total, &config.base_currency));
            println!("Number of Expenses: {}", summary.count);
            for (category, total) in &summary.by_category {
                println!("  {}: {}", category, format_amount(*total, &config.base_currency));
            }
        }
        ExpenseAction::Remove { id } => {
            let removed = ledger.remove(&id)?;
            ledger.save(&store)?;
            println!("Removed expense {} ({})", removed.id, removed.description);
        }
    }
    Ok(())
}
