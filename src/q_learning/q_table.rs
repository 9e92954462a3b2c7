//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Q-table mapping canonical board strings to one value per cell.
///
/// Rows are indexed by linear cell position whether or not that cell is legal
/// in the state. States that were never written read as all zeros and are not
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// state string -> action values, each of length `cell_count`
    rows: HashMap<String, Vec<f64>>,
    cell_count: usize,
}

impl QTable {
    /// Create an empty table for boards of `cell_count` cells.
    pub fn new(cell_count: usize) -> Self {
        Self {
            rows: HashMap::new(),
            cell_count,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Row for a state, or all zeros for an unseen state.
    pub fn row(&self, state: &str) -> Vec<f64> {
        self.rows
            .get(state)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.cell_count])
    }

    /// Stored row for a state, without the zero default.
    pub fn stored_row(&self, state: &str) -> Option<&[f64]> {
        self.rows.get(state).map(Vec::as_slice)
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &str, action: usize) -> f64 {
        self.rows
            .get(state)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair, materializing the row if needed.
    ///
    /// Actions outside the row are ignored.
    pub fn set(&mut self, state: &str, action: usize, value: f64) {
        if action >= self.cell_count {
            return;
        }
        let cell_count = self.cell_count;
        let row = self
            .rows
            .entry(state.to_string())
            .or_insert_with(|| vec![0.0; cell_count]);
        row[action] = value;
    }

    /// Insert a whole row. Returns `false` (and stores nothing) when the row
    /// length does not match the table.
    pub fn insert_row(&mut self, state: String, values: Vec<f64>) -> bool {
        if values.len() != self.cell_count {
            return false;
        }
        self.rows.insert(state, values);
        true
    }

    /// Largest value in the row of `state` (0 for unseen states).
    pub fn max_value(&self, state: &str) -> f64 {
        match self.rows.get(state) {
            Some(row) => row.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            None => 0.0,
        }
    }

    /// First action with the highest value among `legal_actions`.
    ///
    /// Ties keep the earliest action in the given order.
    pub fn greedy_action(&self, state: &str, legal_actions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &action in legal_actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ·max_future - Q(s,a)]
    ///
    /// Returns the new value.
    pub fn q_learning_update(
        &mut self,
        state: &str,
        action: usize,
        reward: f64,
        max_future: f64,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(state, action);
        let td_target = reward + discount_factor * max_future;
        let td_error = td_target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Drop every stored row
    pub fn reset(&mut self) {
        self.rows.clear();
    }

    /// Number of stored states
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> {
        self.rows.iter()
    }
}
