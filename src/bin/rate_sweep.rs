//! Compare investment outcomes across a range of annual returns
//!
//! Runs every rate in parallel and prints final balances; optionally writes
//! the comparison to CSV.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use finance_toolkit::{GrowthTerms, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "rate_sweep", about = "Final balance of a savings plan across annual return rates")]
struct Args {
    #[arg(long, default_value_t = 10_000.0)]
    principal: f64,
    #[arg(long, default_value_t = 500.0)]
    monthly: f64,
    #[arg(long, default_value_t = 30.0)]
    years: f64,
    #[arg(long, default_value_t = 0.0, help = "Lowest annual rate in percent")]
    from: f64,
    #[arg(long, default_value_t = 12.0, help = "Highest annual rate in percent")]
    to: f64,
    #[arg(long, default_value_t = 0.5, help = "Rate increment in percent")]
    step: f64,
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Upper bound on scenarios in one sweep
const MAX_RATES: usize = 10_000;

/// Rates from `from` to `to` inclusive in increments of `step`
fn sweep_rates(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if !from.is_finite() || !to.is_finite() || !step.is_finite() {
        anyhow::bail!("--from, --to and --step must be finite");
    }
    if step <= 0.0 || to < from {
        anyhow::bail!("need --step > 0 and --to >= --from");
    }
    let steps = ((to - from) / step).floor();
    if steps >= MAX_RATES as f64 {
        anyhow::bail!("sweep would run {} scenarios; at most {} allowed", steps + 1.0, MAX_RATES);
    }
    Ok((0..=steps as usize).map(|i| from + i as f64 * step).collect())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rates = sweep_rates(args.from, args.to, args.step)?;
    let base = GrowthTerms::new(args.principal, args.monthly, args.from, args.years);

    let start = Instant::now();
    let results = ScenarioRunner::summary_only().rate_sweep(&base, &rates);
    println!("Ran {} scenarios in {:?}", results.len(), start.elapsed());

    println!("{:>7} {:>16} {:>16} {:>16}", "Rate%", "Final", "Contributions", "Interest");
    println!("{}", "-".repeat(58));

    let mut writer = match &args.csv {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(["RatePct", "FinalAmount", "TotalContributions", "TotalInterest"])?;
            Some(writer)
        }
        None => None,
    };

    for (rate, result) in rates.iter().zip(&results) {
        match result {
            Ok(growth) => {
                println!("{:>7.2} {:>16.2} {:>16.2} {:>16.2}", rate, growth.final_amount, growth.total_contributions, growth.total_interest);
                if let Some(writer) = writer.as_mut() {
                    writer.write_record([
                        format!("{:.2}", rate),
                        format!("{:.2}", growth.final_amount),
                        format!("{:.2}", growth.total_contributions),
                        format!("{:.2}", growth.total_interest),
                    ])?;
                }
            }
            Err(err) => println!("{:>7.2} {}", rate, err),
        }
    }

    if let Some(mut writer) = writer {
        writer.flush()?;
        if let Some(path) = &args.csv {
            println!("\nComparison written to: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_rates_inclusive() {
        let rates = sweep_rates(0.0, 12.0, 0.5).unwrap();
        assert_eq!(rates.len(), 25);
        assert_eq!(rates[24], 12.0);
    }

    #[test]
    fn test_sweep_rates_rejects_unbounded_ranges() {
        assert!(sweep_rates(0.0, f64::INFINITY, 0.5).is_err());
        assert!(sweep_rates(f64::NAN, 12.0, 0.5).is_err());
        assert!(sweep_rates(0.0, 12.0, 1e-300).is_err());
        assert!(sweep_rates(0.0, 12.0, 0.0).is_err());
        assert!(sweep_rates(5.0, 1.0, 0.5).is_err());
    }
}
