//! Top-down evaluator: memoized recursion over the transition model
//!
//! The memo table lives in a [`RecursiveEvaluator`] built fresh for every
//! top-level call, so separate strategy evaluations never share entries.

use crate::state::GameState;
use crate::strategy::Strategy;
use crate::transition::successors;
use std::collections::HashMap;

/// Memoized win-probability recursion for a single strategy.
pub struct RecursiveEvaluator<'a, S: Strategy + ?Sized> {
    strategy: &'a S,
    cache: HashMap<GameState, f64>,
}

impl<'a, S: Strategy + ?Sized> RecursiveEvaluator<'a, S> {
    pub fn new(strategy: &'a S) -> Self {
        RecursiveEvaluator { strategy, cache: HashMap::new() }
    }

    /// Win probability of `state`, memoizing every non-terminal state visited.
    pub fn win_chance(&mut self, state: &GameState) -> f64 {
        if state.is_win() {
            return 1.0;
        }
        if state.is_lose() {
            return 0.0;
        }
        if let Some(&p) = self.cache.get(state) {
            return p;
        }

        let branches = successors(state, self.strategy);
        let weight = branches.len() as f64;
        let mut sum = 0.0_f64;
        for next in &branches {
            sum += self.win_chance(next);
        }

        let p = sum / weight;
        self.cache.insert(*state, p);
        p
    }

    /// Number of non-terminal states memoized so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Win probability from the initial state.
pub fn evaluate<S: Strategy + ?Sized>(strategy: &S) -> f64 {
    evaluate_from(strategy, &GameState::initial())
}

/// Win probability from an arbitrary state.
pub fn evaluate_from<S: Strategy + ?Sized>(strategy: &S, state: &GameState) -> f64 {
    let mut evaluator = RecursiveEvaluator::new(strategy);
    let p = evaluator.win_chance(state);
    log::debug!("recursive evaluation from {} memoized {} states", state, evaluator.cached());
    p
}
