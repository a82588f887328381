//! Conversion results and the recent-conversions list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::Repository;

/// Number of conversions kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// A completed conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub from_amount: f64,
    pub from_currency: String,
    pub to_amount: f64,
    pub to_currency: String,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// Most recent conversions, newest first, capped at `limit`
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionHistory {
    entries: Vec<ConversionResult>,
    limit: usize,
}

impl ConversionHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Restore from persisted entries, dropping any beyond the limit
    pub fn from_entries(mut entries: Vec<ConversionResult>, limit: usize) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn load<R: Repository<ConversionResult>>(repo: &R, limit: usize) -> Result<Self, StoreError> {
        Ok(Self::from_entries(repo.load()?, limit))
    }

    pub fn save<R: Repository<ConversionResult>>(&self, repo: &R) -> Result<(), StoreError> {
        repo.save(&self.entries)
    }

    pub fn record(&mut self, result: ConversionResult) {
        self.entries.insert(0, result);
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[ConversionResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ConversionResult> {
        self.entries.first()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RateTable;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let table = RateTable::fallback();
        let start = Utc.with_ymd_and_hms(2025, 1, 18, 9, 45, 0).unwrap();
        let mut history = ConversionHistory::default();

        for i in 0..12 {
            let result = table
                .convert(100.0 + i as f64, "USD", "EUR", start + Duration::minutes(i))
                .unwrap();
            history.record(result);
        }

        assert_eq!(history.entries().len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().from_amount, 111.0);
        assert_eq!(history.entries().last().unwrap().from_amount, 102.0);
    }

    #[test]
    fn test_persisted_history_round_trip() {
        let table = RateTable::fallback();
        let at = Utc.with_ymd_and_hms(2025, 1, 19, 14, 15, 0).unwrap();
        let store = MemoryStore::new(Vec::new());

        let mut history = ConversionHistory::load(&store, 3).unwrap();
        history.record(table.convert(500.0, "EUR", "USD", at).unwrap());
        history.save(&store).unwrap();

        let reloaded = ConversionHistory::load(&store, 3).unwrap();
        assert_eq!(reloaded, history);
        assert_eq!(reloaded.latest().unwrap().to_currency, "USD");
    }
}
