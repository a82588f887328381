//! Exchange rate tables

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::history::ConversionResult;
use crate::error::{EngineError, Result, StoreError};
use crate::rates::require_positive;

/// Approximate PHP per USD, used when a quote set lacks PHP
pub const PHP_PER_USD_FALLBACK: f64 = 56.0;

/// Direct rates keyed by source then target currency
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Raw CSV row: `from,to,rate`
#[derive(Debug, Deserialize)]
struct CsvRow {
    from: String,
    to: String,
    rate: f64,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in static table for when no fresher rates are available
    pub fn fallback() -> Self {
        let mut table = Self::new();
        let rows: [(&str, [(&str, f64); 6]); 7] = [
            ("USD", [("EUR", 0.85), ("GBP", 0.73), ("JPY", 110.0), ("CAD", 1.25), ("AUD", 1.35), ("CHF", 0.92)]),
            ("EUR", [("USD", 1.18), ("GBP", 0.86), ("JPY", 129.5), ("CAD", 1.47), ("AUD", 1.59), ("CHF", 1.08)]),
            ("GBP", [("USD", 1.37), ("EUR", 1.16), ("JPY", 150.5), ("CAD", 1.71), ("AUD", 1.85), ("CHF", 1.26)]),
            ("JPY", [("USD", 0.0091), ("EUR", 0.0077), ("GBP", 0.0066), ("CAD", 0.0113), ("AUD", 0.0122), ("CHF", 0.0083)]),
            ("CAD", [("USD", 0.80), ("EUR", 0.68), ("GBP", 0.58), ("JPY", 88.0), ("AUD", 1.08), ("CHF", 0.74)]),
            ("AUD", [("USD", 0.74), ("EUR", 0.63), ("GBP", 0.54), ("JPY", 81.5), ("CAD", 0.93), ("CHF", 0.68)]),
            ("CHF", [("USD", 1.09), ("EUR", 0.93), ("GBP", 0.79), ("JPY", 119.5), ("CAD", 1.35), ("AUD", 1.47)]),
        ];
        for (from, targets) in rows {
            for (to, rate) in targets {
                table.insert(from, to, rate);
            }
        }
        table
    }

    /// Load `from,to,rate` rows from any reader
    pub fn from_csv_reader<R: Read>(reader: R) -> std::result::Result<Self, StoreError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut table = Self::new();

        for result in csv_reader.deserialize() {
            let row: CsvRow = result?;
            if !row.rate.is_finite() || row.rate <= 0.0 {
                return Err(StoreError::Malformed(format!(
                    "rate {} for {} -> {}",
                    row.rate, row.from, row.to
                )));
            }
            table.insert(&row.from, &row.to, row.rate);
        }

        Ok(table)
    }

    /// Load a CSV rate snapshot from disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> std::result::Result<Self, StoreError> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_csv_reader(file)?;
        log::debug!("loaded {} currencies from {}", table.rates.len(), path.as_ref().display());
        Ok(table)
    }

    pub fn insert(&mut self, from: &str, to: &str, rate: f64) {
        self.rates
            .entry(from.to_ascii_uppercase())
            .or_default()
            .insert(to.to_ascii_uppercase(), rate);
    }

    /// Direct rate for a pair; identical codes always give 1
    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();
        if from == to {
            return Some(1.0);
        }
        self.rates.get(&from).and_then(|targets| targets.get(&to)).copied()
    }

    /// Source currencies in the table, sorted
    pub fn currencies(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    /// USD-based quotes for every currency that has a USD leg
    pub fn usd_quotes(&self) -> UsdQuotes {
        let mut quotes = BTreeMap::new();
        for code in self.rates.keys() {
            if let Some(rate) = self.rate("USD", code) {
                quotes.insert(code.clone(), rate);
            }
        }
        UsdQuotes::new(quotes)
    }

    /// Convert a positive amount using the direct rate for the pair
    pub fn convert(&self, amount: f64, from: &str, to: &str, timestamp: DateTime<Utc>) -> Result<ConversionResult> {
        let from_amount = require_positive("amount", amount)?;
        let rate = self.rate(from, to).ok_or_else(|| {
            log::warn!("no rate for {} -> {}", from, to);
            EngineError::UnsupportedCurrencyPair {
                from: from.to_string(),
                to: to.to_string(),
            }
        })?;

        Ok(ConversionResult {
            from_amount,
            from_currency: from.to_ascii_uppercase(),
            to_amount: from_amount * rate,
            to_currency: to.to_ascii_uppercase(),
            rate,
            timestamp,
        })
    }
}

/// Units of each currency per one USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsdQuotes {
    quotes: BTreeMap<String, f64>,
}

impl UsdQuotes {
    /// Build from a quote map, adding USD = 1 and the PHP fallback when absent
    pub fn new(mut quotes: BTreeMap<String, f64>) -> Self {
        quotes.entry("USD".to_string()).or_insert(1.0);
        quotes.entry("PHP".to_string()).or_insert(PHP_PER_USD_FALLBACK);
        Self { quotes }
    }

    pub fn quote(&self, code: &str) -> Option<f64> {
        self.quotes.get(&code.to_ascii_uppercase()).copied()
    }

    /// Cross through USD: `amount / q[from] * q[to]`
    ///
    /// The amount comes back unchanged when the codes match or either quote is
    /// missing.
    pub fn convert_amount(&self, amount: f64, from: &str, to: &str) -> f64 {
        if from.eq_ignore_ascii_case(to) {
            return amount;
        }
        match (self.quote(from), self.quote(to)) {
            (Some(q_from), Some(q_to)) if q_from > 0.0 => amount / q_from * q_to,
            _ => {
                log::warn!("missing quote for {} or {}, amount left unconverted", from, to);
                amount
            }
        }
    }

    /// Full cross table derived from the USD quotes
    pub fn to_rate_table(&self) -> RateTable {
        let mut table = RateTable::new();
        for (from, q_from) in &self.quotes {
            for (to, q_to) in &self.quotes {
                if from != to && *q_from > 0.0 {
                    table.insert(from, to, q_to / q_from);
                }
            }
        }
        table
    }
}

/// Display an amount with its currency symbol and two decimals
pub fn format_amount(amount: f64, code: &str) -> String {
    let symbol = match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF",
        "PHP" => "₱",
        _ => return format!("{:.2} {}", amount, code),
    };
    format!("{}{:.2}", symbol, amount)
}
