use crate::error::Result;
use crate::{Action, State};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Dense table of action-value estimates, one row per state.
///
/// Indexing is unchecked from the caller's point of view: a state or action
/// outside the table is a programming error and panics.
///
/// # Example
///
/// ```
/// use tabula::value_table::ValueTable;
///
/// let mut table = ValueTable::new(4, 2, 0.0);
/// table.set(3, 1, 1.5);
/// assert_eq!(table.argmax(3), 1);
/// assert_eq!(table.max(3), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    /// Value every entry started from
    pub initial_value: f64,

    values: Array2<f64>,
}

impl ValueTable {
    pub fn new(state_count: usize, action_count: usize, initial_value: f64) -> Self {
        ValueTable {
            initial_value,
            values: Array2::from_elem((state_count, action_count), initial_value),
        }
    }

    pub fn state_count(&self) -> usize {
        self.values.nrows()
    }

    pub fn action_count(&self) -> usize {
        self.values.ncols()
    }

    #[inline]
    pub fn get(&self, state: State, action: Action) -> f64 {
        self.values[[state, action]]
    }

    #[inline]
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.values[[state, action]] = value;
    }

    pub fn row(&self, state: State) -> ArrayView1<'_, f64> {
        self.values.row(state)
    }

    /// Overwrite every action value of `state`.
    pub fn fill_row(&mut self, state: State, value: f64) {
        self.values.row_mut(state).fill(value);
    }

    /// Largest value in the row of `state`.
    pub fn max(&self, state: State) -> f64 {
        self.get(state, self.argmax(state))
    }

    /// Index of the largest value in the row of `state`; ties go to the
    /// lowest index.
    ///
    /// # Panics
    ///
    /// Panics when the table has no actions.
    pub fn argmax(&self, state: State) -> Action {
        let row = self.values.row(state);
        assert!(!row.is_empty(), "argmax over an empty action row");

        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Save the table to disk
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a table from disk
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        let table: Self = bincode::deserialize(&data)?;
        Ok(table)
    }
}
