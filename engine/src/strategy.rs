//! Basket strategies
//!
//! A strategy decides which tree the player's basket roll harvests. It is only
//! consulted on non-terminal states, so at least one tree carries fruit, and it
//! must name a position whose level is positive.

use crate::state::{FruitIndex, GameState, NUM_FRUITS};
use std::fmt;

/// Decision policy for the basket roll
pub trait Strategy: Sync {
    /// Choose the sorted position to harvest from.
    fn choose(&self, state: &GameState) -> FruitIndex;
}

impl<F> Strategy for F
where
    F: Fn(&GameState) -> FruitIndex + Sync,
{
    fn choose(&self, state: &GameState) -> FruitIndex {
        self(state)
    }
}

/// Harvest the emptiest tree that still has fruit.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBasket;

impl Strategy for GreedyBasket {
    fn choose(&self, state: &GameState) -> FruitIndex {
        (1..NUM_FRUITS).rev().find(|&i| state.fruit(i) > 0).unwrap_or(0)
    }
}

/// Harvest the fullest tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarietyBasket;

impl Strategy for VarietyBasket {
    fn choose(&self, _state: &GameState) -> FruitIndex {
        0
    }
}

/// Built-in strategies, selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Greedy,
    Variety,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Greedy, StrategyKind::Variety];
}

impl Strategy for StrategyKind {
    fn choose(&self, state: &GameState) -> FruitIndex {
        match self {
            StrategyKind::Greedy => GreedyBasket.choose(state),
            StrategyKind::Variety => VarietyBasket.choose(state),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "Greedy"),
            StrategyKind::Variety => write!(f, "Variety"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_picks_smallest_nonempty() {
        assert_eq!(GreedyBasket.choose(&GameState::initial()), 3);
        assert_eq!(GreedyBasket.choose(&GameState::new([3, 2, 1, 0], 4)), 2);
        assert_eq!(GreedyBasket.choose(&GameState::new([3, 2, 0, 0], 4)), 1);
        assert_eq!(GreedyBasket.choose(&GameState::new([3, 0, 0, 0], 4)), 0);
    }

    #[test]
    fn test_variety_picks_fullest() {
        assert_eq!(VarietyBasket.choose(&GameState::initial()), 0);
        assert_eq!(VarietyBasket.choose(&GameState::new([1, 0, 0, 0], 1)), 0);
    }

    #[test]
    fn test_strategies_choose_nonempty_tree() {
        for s in GameState::all().into_iter().filter(|s| !s.is_win()) {
            for kind in StrategyKind::ALL {
                let i = kind.choose(&s);
                assert!(s.fruit(i) > 0, "{} chose empty tree {} in {}", kind, i, s);
            }
        }
    }

    #[test]
    fn test_closure_strategy() {
        let last = |s: &GameState| -> FruitIndex {
            (0..NUM_FRUITS).rev().find(|&i| s.fruit(i) > 0).unwrap_or(0)
        };
        let s = GameState::new([2, 2, 1, 0], 3);
        assert_eq!(last.choose(&s), 2);
    }

    #[test]
    fn test_kind_delegates() {
        let s = GameState::new([4, 3, 3, 1], 2);
        assert_eq!(StrategyKind::Greedy.choose(&s), GreedyBasket.choose(&s));
        assert_eq!(StrategyKind::Variety.choose(&s), VarietyBasket.choose(&s));
        assert_eq!(StrategyKind::Greedy.to_string(), "Greedy");
    }
}
