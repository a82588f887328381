//! Caller-owned list of savings goals

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tracker::{evaluate, GoalStats, SavingsGoal};
use crate::error::{EngineError, Result, StoreError};
use crate::rates::{require_non_negative, require_positive};
use crate::store::{next_timestamp_id, Repository};

/// Fields supplied when creating a goal; the book assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub monthly_contribution: f64,
}

/// Ordered collection of goals with the add/update/remove operations of the tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalBook {
    goals: Vec<SavingsGoal>,
}

impl GoalBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_goals(goals: Vec<SavingsGoal>) -> Self {
        Self { goals }
    }

    pub fn load<R: Repository<SavingsGoal>>(repo: &R) -> std::result::Result<Self, StoreError> {
        Ok(Self::from_goals(repo.load()?))
    }

    pub fn save<R: Repository<SavingsGoal>>(&self, repo: &R) -> std::result::Result<(), StoreError> {
        repo.save(&self.goals)
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavingsGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Validate and append a goal, returning its assigned id
    pub fn add(&mut self, new_goal: NewGoal) -> Result<String> {
        let name = new_goal.name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid("name", "<blank>"));
        }
        require_positive("target_amount", new_goal.target_amount)?;
        require_non_negative("current_amount", new_goal.current_amount)?;
        require_non_negative("monthly_contribution", new_goal.monthly_contribution)?;

        let id = next_timestamp_id(self.goals.iter().map(|g| g.id.as_str()));
        self.goals.push(SavingsGoal {
            id: id.clone(),
            name: name.to_string(),
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            monthly_contribution: new_goal.monthly_contribution,
        });
        log::debug!("added goal {} ({})", id, name);
        Ok(id)
    }

    /// Record a new saved balance for a goal
    pub fn update_current_amount(&mut self, id: &str, amount: f64) -> Result<()> {
        require_non_negative("current_amount", amount)?;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| EngineError::UnknownRecord(id.to_string()))?;
        goal.current_amount = amount;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<SavingsGoal> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| EngineError::UnknownRecord(id.to_string()))?;
        Ok(self.goals.remove(idx))
    }

    /// Evaluate every goal against the same date, in book order
    pub fn evaluate_all(&self, as_of: NaiveDate) -> Vec<(String, Result<GoalStats>)> {
        self.goals
            .par_iter()
            .map(|goal| (goal.id.clone(), evaluate(goal, as_of)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vacation() -> NewGoal {
        NewGoal {
            name: "  Vacation to Europe ".to_string(),
            target_amount: 5_000.0,
            current_amount: 1_200.0,
            target_date: date(2025, 6, 15),
            monthly_contribution: 300.0,
        }
    }

    #[test]
    fn test_add_update_remove() {
        let mut book = GoalBook::new();
        let id = book.add(vacation()).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&id).unwrap().name, "Vacation to Europe");

        book.update_current_amount(&id, 2_000.0).unwrap();
        assert_eq!(book.get(&id).unwrap().current_amount, 2_000.0);

        let removed = book.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_rejects_blank_name_and_bad_target() {
        let mut book = GoalBook::new();
        let blank = NewGoal { name: "   ".to_string(), ..vacation() };
        assert!(book.add(blank).is_err());

        let zero_target = NewGoal { target_amount: 0.0, ..vacation() };
        assert!(book.add(zero_target).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_new_goal_json_matches_saved_goal_keys() {
        let json = serde_json::to_string(&vacation()).unwrap();
        assert!(json.contains("\"targetAmount\":5000.0"));
        assert!(json.contains("\"targetDate\":\"2025-06-15\""));
        assert!(!json.contains("target_amount"));

        let parsed: NewGoal =
            serde_json::from_str(r#"{"name":"Car","targetAmount":9000.0,"targetDate":"2026-01-01"}"#).unwrap();
        assert_eq!(parsed.current_amount, 0.0);
        assert_eq!(parsed.monthly_contribution, 0.0);

        let mut book = GoalBook::new();
        let id = book.add(vacation()).unwrap();
        let saved = serde_json::to_value(book.get(&id).unwrap()).unwrap();
        let fresh = serde_json::to_value(vacation()).unwrap();
        for key in fresh.as_object().unwrap().keys() {
            assert!(saved.get(key).is_some(), "saved goal lacks {}", key);
        }
    }

    #[test]
    fn test_unknown_ids() {
        let mut book = GoalBook::new();
        assert_eq!(
            book.update_current_amount("missing", 1.0),
            Err(EngineError::UnknownRecord("missing".to_string()))
        );
        assert!(book.remove("missing").is_err());
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut book = GoalBook::new();
        let a = book.add(vacation()).unwrap();
        let b = book.add(vacation()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_evaluate_all_preserves_order() {
        let mut book = GoalBook::new();
        let first = book.add(vacation()).unwrap();
        let second = book
            .add(NewGoal {
                name: "Emergency Fund".to_string(),
                target_amount: 10_000.0,
                current_amount: 2_500.0,
                target_date: date(2025, 12, 31),
                monthly_contribution: 500.0,
            })
            .unwrap();

        let results = book.evaluate_all(date(2025, 1, 1));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, first);
        assert_eq!(results[1].0, second);
        assert!(results.iter().all(|(_, stats)| stats.is_ok()));
    }

    #[test]
    fn test_load_and_save_through_repository() {
        let store = MemoryStore::new(Vec::new());
        let mut book = GoalBook::load(&store).unwrap();
        book.add(vacation()).unwrap();
        book.save(&store).unwrap();

        let reloaded = GoalBook::load(&store).unwrap();
        assert_eq!(reloaded, book);
    }
}
