//! Bottom-up evaluator: dynamic-programming sweep over the full state space
//!
//! The table is seeded with every terminal state, then filled by ascending
//! raven countdown and ascending fruit combination. Every transition either
//! lowers the countdown or lowers a fruit level, so each state only reads
//! entries that are already filled.

use crate::state::{GameState, StateKey, MAX_RAVEN, NUM_FRUITS};
use crate::strategy::Strategy;
use crate::transition::successors;

/// Win probabilities indexed by [`StateKey`]
#[derive(Debug, Clone)]
pub struct StateTable {
    values: Vec<Option<f64>>,
    filled: usize,
}

impl StateTable {
    fn new() -> Self {
        StateTable { values: vec![None; StateKey::SPACE], filled: 0 }
    }

    fn set(&mut self, state: &GameState, p: f64) {
        let slot = &mut self.values[state.key().index()];
        if slot.is_none() {
            self.filled += 1;
        }
        *slot = Some(p);
    }

    /// Value of a state the sweep has already reached.
    fn filled(&self, state: &GameState) -> f64 {
        self.get(state).expect("sweep read a state before filling it")
    }

    pub fn get(&self, state: &GameState) -> Option<f64> {
        self.values[state.key().index()]
    }

    /// Number of filled entries
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}

/// Fill the table for every valid state under `strategy`.
pub fn solve<S: Strategy + ?Sized>(strategy: &S) -> StateTable {
    let mut table = StateTable::new();
    let combos = GameState::fruit_combinations();

    // Win states, including the all-empty orchard at raven 0
    for raven in 0..=MAX_RAVEN {
        table.set(&GameState::new([0; NUM_FRUITS], raven), 1.0);
    }

    // Lose states
    for &fruits in combos.iter().filter(|f| f[0] > 0) {
        table.set(&GameState::new(fruits, 0), 0.0);
    }

    // Intermediate states
    for raven in 1..=MAX_RAVEN {
        for &fruits in combos.iter().filter(|f| f[0] > 0) {
            let state = GameState::new(fruits, raven);
            let branches = successors(&state, strategy);
            let weight = branches.len() as f64;
            let mut sum = 0.0_f64;
            for next in &branches {
                sum += table.filled(next);
            }
            table.set(&state, sum / weight);
        }
    }

    log::debug!("sweep filled {} states", table.len());
    table
}

/// Win probability from the initial state.
pub fn evaluate<S: Strategy + ?Sized>(strategy: &S) -> f64 {
    evaluate_from(strategy, &GameState::initial())
}

/// Win probability from an arbitrary state.
pub fn evaluate_from<S: Strategy + ?Sized>(strategy: &S, state: &GameState) -> f64 {
    solve(strategy)
        .get(state)
        .expect("sweep fills every valid state")
}
