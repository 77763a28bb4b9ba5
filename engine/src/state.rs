//! Game state definitions for the orchard
//!
//! A position is four fruit levels plus the raven countdown. Fruits are
//! interchangeable under the rules, so levels are always kept sorted in
//! non-increasing order; this collapses permutation-symmetric positions into
//! one representation and keeps the state space at 420 entries.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of distinct fruit trees
pub const NUM_FRUITS: usize = 4;

/// Fruit per tree at the start of a game
pub const MAX_FRUIT: u8 = 4;

/// Raven steps before it reaches the orchard
pub const MAX_RAVEN: u8 = 5;

/// Position of a fruit level within a sorted state (0 = fullest tree)
pub type FruitIndex = usize;

/// Errors from constructing or parsing a state out of untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("fruit level {level} at position {index} exceeds 4")]
    FruitOutOfRange { index: usize, level: u8 },
    #[error("raven countdown {0} exceeds 5")]
    RavenOutOfRange(u8),
    #[error("fruit levels {0:?} are not sorted in non-increasing order")]
    Unsorted([u8; NUM_FRUITS]),
    #[error("expected five comma-separated values, found {0}")]
    WrongArity(usize),
    #[error("invalid level {0:?}")]
    Parse(String),
}

/// Dense, collision-free key of a state.
///
/// Packs the raven countdown and the four fruit levels as base-5 digits:
/// `raven * 5^4 + a * 5^3 + b * 5^2 + c * 5 + d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(u16);

impl StateKey {
    const RADIX: u16 = MAX_FRUIT as u16 + 1;

    /// Size of the key space (every raven value times every unsorted fruit tuple)
    pub const SPACE: usize = (MAX_RAVEN as usize + 1) * 625;

    /// Index into a table of `SPACE` entries
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One position in the game.
///
/// Immutable: every transition builds a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    fruits: [u8; NUM_FRUITS],
    raven: u8,
}

impl GameState {
    /// Build a state from already sorted, in-range values.
    ///
    /// Callers inside the engine only ever produce valid tuples; untrusted input
    /// goes through [`GameState::try_new`] or [`GameState::canonical`].
    pub fn new(fruits: [u8; NUM_FRUITS], raven: u8) -> Self {
        debug_assert!(fruits.iter().all(|&f| f <= MAX_FRUIT), "fruit out of range: {:?}", fruits);
        debug_assert!(raven <= MAX_RAVEN, "raven out of range: {}", raven);
        debug_assert!(fruits.windows(2).all(|w| w[0] >= w[1]), "unsorted fruits: {:?}", fruits);
        GameState { fruits, raven }
    }

    /// Validating constructor: rejects out-of-range or unsorted values.
    pub fn try_new(fruits: [u8; NUM_FRUITS], raven: u8) -> Result<Self, StateError> {
        if let Some((index, &level)) = fruits.iter().enumerate().find(|(_, &f)| f > MAX_FRUIT) {
            return Err(StateError::FruitOutOfRange { index, level });
        }
        if raven > MAX_RAVEN {
            return Err(StateError::RavenOutOfRange(raven));
        }
        if !fruits.windows(2).all(|w| w[0] >= w[1]) {
            return Err(StateError::Unsorted(fruits));
        }
        Ok(GameState { fruits, raven })
    }

    /// Sort arbitrary fruit levels into canonical order, then validate.
    pub fn canonical(mut fruits: [u8; NUM_FRUITS], raven: u8) -> Result<Self, StateError> {
        fruits.sort_unstable_by(|a, b| b.cmp(a));
        Self::try_new(fruits, raven)
    }

    /// Full trees, raven at the start of its path
    pub fn initial() -> Self {
        GameState::new([MAX_FRUIT; NUM_FRUITS], MAX_RAVEN)
    }

    /// Fruit levels, fullest first
    pub fn fruits(&self) -> [u8; NUM_FRUITS] {
        self.fruits
    }

    /// Fruit level at a sorted position
    pub fn fruit(&self, index: FruitIndex) -> u8 {
        self.fruits[index]
    }

    /// Raven steps remaining
    pub fn raven(&self) -> u8 {
        self.raven
    }

    /// Won once every fruit is harvested, regardless of the raven.
    pub fn is_win(&self) -> bool {
        self.fruits.iter().all(|&f| f == 0)
    }

    /// Lost once the raven reaches the orchard.
    pub fn is_lose(&self) -> bool {
        self.raven == 0
    }

    /// No further turns are played from a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }

    pub fn key(&self) -> StateKey {
        let packed = self
            .fruits
            .iter()
            .fold(self.raven as u16, |acc, &f| acc * StateKey::RADIX + f as u16);
        StateKey(packed)
    }

    /// Every sorted fruit combination, ascending lexicographically.
    ///
    /// Depleting a fruit always yields a combination that appears earlier.
    pub fn fruit_combinations() -> Vec<[u8; NUM_FRUITS]> {
        let mut combos = Vec::with_capacity(70);
        for a in 0..=MAX_FRUIT {
            for b in 0..=a {
                for c in 0..=b {
                    for d in 0..=c {
                        combos.push([a, b, c, d]);
                    }
                }
            }
        }
        combos
    }

    /// Every valid state exactly once, by ascending raven then ascending fruits.
    pub fn all() -> Vec<GameState> {
        let combos = Self::fruit_combinations();
        (0..=MAX_RAVEN)
            .flat_map(|raven| combos.iter().map(move |&fruits| GameState::new(fruits, raven)))
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.fruits;
        write!(f, "({},{},{},{},{})", a, b, c, d, self.raven)
    }
}

impl FromStr for GameState {
    type Err = StateError;

    /// Parses `a,b,c,d,r` with optional parentheses; fruit order is free.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim().trim_start_matches('(').trim_end_matches(')');
        let values = body
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u8>().map_err(|_| StateError::Parse(part.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;
        match values.as_slice() {
            &[a, b, c, d, raven] => GameState::canonical([a, b, c, d], raven),
            other => Err(StateError::WrongArity(other.len())),
        }
    }
}
