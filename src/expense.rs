//! Expense ledger with summary totals

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result, StoreError};
use crate::rates::require_positive;
use crate::store::{next_timestamp_id, Repository};

/// Category bucket for expenses recorded without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Expense fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
}

/// Totals over a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub count: usize,
    pub by_category: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn load<R: Repository<Expense>>(repo: &R) -> std::result::Result<Self, StoreError> {
        Ok(Self::from_expenses(repo.load()?))
    }

    pub fn save<R: Repository<Expense>>(&self, repo: &R) -> std::result::Result<(), StoreError> {
        repo.save(&self.expenses)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Validate and append an expense, returning its id
    pub fn add(&mut self, new_expense: NewExpense) -> Result<String> {
        let amount = require_positive("amount", new_expense.amount)?;
        let description = new_expense.description.trim();
        if description.is_empty() {
            return Err(EngineError::invalid("description", "<blank>"));
        }
        let category = new_expense
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let id = next_timestamp_id(self.expenses.iter().map(|e| e.id.as_str()));
        self.expenses.push(Expense {
            id: id.clone(),
            amount,
            description: description.to_string(),
            date: new_expense.date,
            category,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Expense> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::UnknownRecord(id.to_string()))?;
        Ok(self.expenses.remove(idx))
    }

    pub fn summary(&self) -> ExpenseSummary {
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        for expense in &self.expenses {
            let key = expense.category.as_deref().unwrap_or(UNCATEGORIZED);
            *by_category.entry(key.to_string()).or_insert(0.0) += expense.amount;
        }

        ExpenseSummary {
            total: self.expenses.iter().map(|e| e.amount).sum(),
            count: self.expenses.len(),
            by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(amount: f64, description: &str, category: Option<&str>) -> NewExpense {
        NewExpense {
            amount,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: category.map(str::to_string),
        }
    }

    fn sample_ledger() -> ExpenseLedger {
        let mut ledger = ExpenseLedger::new();
        ledger.add(entry(45.99, "Grocery shopping", Some("Food"))).unwrap();
        ledger.add(entry(12.50, "Coffee and pastry", Some("Food"))).unwrap();
        ledger.add(entry(89.99, "Gas station", Some("Transportation"))).unwrap();
        ledger.add(entry(25.00, "Movie tickets", Some(""))).unwrap();
        ledger
    }

    #[test]
    fn test_summary_totals() {
        let summary = sample_ledger().summary();
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.total, 173.48, epsilon = 1e-9);
        assert_relative_eq!(summary.by_category["Food"], 58.49, epsilon = 1e-9);
        assert_relative_eq!(summary.by_category[UNCATEGORIZED], 25.0);
    }

    #[test]
    fn test_blank_category_becomes_none() {
        let ledger = sample_ledger();
        let movie = ledger.iter().find(|e| e.description == "Movie tickets").unwrap();
        assert_eq!(movie.category, None);
    }

    #[test]
    fn test_rejects_bad_entries() {
        let mut ledger = ExpenseLedger::new();
        assert!(ledger.add(entry(0.0, "Nothing", None)).is_err());
        assert!(ledger.add(entry(-5.0, "Refund", None)).is_err());
        assert!(ledger.add(entry(5.0, "   ", None)).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut ledger = sample_ledger();
        let id = ledger.iter().next().unwrap().id.clone();
        let removed = ledger.remove(&id).unwrap();
        assert_eq!(removed.description, "Grocery shopping");
        assert_eq!(ledger.len(), 3);
        assert!(matches!(ledger.remove(&id), Err(EngineError::UnknownRecord(_))));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ExpenseLedger::new().summary();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.count, 0);
        assert!(summary.by_category.is_empty());
    }
}
