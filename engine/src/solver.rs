//! Batch evaluation of (strategy, algorithm) pairs
//!
//! Each pair is independent and owns its own cache or table, so the batch is
//! spread across threads with Rayon and collected back in input order.

use crate::recursive;
use crate::state::GameState;
use crate::strategy::StrategyKind;
use crate::sweep;
use rayon::prelude::*;
use std::fmt;

/// Which evaluator computes the probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Memoized top-down recursion
    Recursive,
    /// Bottom-up dynamic-programming sweep
    Sweep,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Sweep, Algorithm::Recursive];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Recursive => write!(f, "Recursive"),
            Algorithm::Sweep => write!(f, "DP"),
        }
    }
}

/// Result of one evaluator run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub strategy: StrategyKind,
    pub algorithm: Algorithm,
    pub state: GameState,
    pub probability: f64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}: {}", self.strategy, self.algorithm, self.probability)
    }
}

/// Run a single evaluator.
pub fn evaluate(strategy: StrategyKind, algorithm: Algorithm, state: GameState) -> Evaluation {
    let probability = match algorithm {
        Algorithm::Recursive => recursive::evaluate_from(&strategy, &state),
        Algorithm::Sweep => sweep::evaluate_from(&strategy, &state),
    };
    log::info!("{} by {} from {}: {:.6}", strategy, algorithm, state, probability);
    Evaluation { strategy, algorithm, state, probability }
}

/// Run every pair in parallel. Results are strategy-major, in input order.
pub fn evaluate_all(
    strategies: &[StrategyKind],
    algorithms: &[Algorithm],
    state: GameState,
) -> Vec<Evaluation> {
    let pairs: Vec<(StrategyKind, Algorithm)> = strategies
        .iter()
        .flat_map(|&s| algorithms.iter().map(move |&a| (s, a)))
        .collect();
    pairs
        .par_iter()
        .map(|&(strategy, algorithm)| evaluate(strategy, algorithm, state))
        .collect()
}

/// Pairs of evaluations of the same strategy and state that differ by more
/// than `tolerance`.
pub fn disagreements(results: &[Evaluation], tolerance: f64) -> Vec<(Evaluation, Evaluation)> {
    let mut out = Vec::new();
    for (i, a) in results.iter().enumerate() {
        for b in &results[i + 1..] {
            if a.strategy == b.strategy
                && a.state == b.state
                && (a.probability - b.probability).abs() > tolerance
            {
                log::warn!(
                    "{} disagrees from {}: {} {} vs {} {}",
                    a.strategy, a.state, a.algorithm, a.probability, b.algorithm, b.probability
                );
                out.push((*a, *b));
            }
        }
    }
    out
}
