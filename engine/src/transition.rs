//! Transition model: one new state per event
//!
//! A turn either advances the raven or depletes a fruit. All functions are
//! pure and preserve the descending-sort invariant of [`GameState`].

use crate::state::{FruitIndex, GameState, NUM_FRUITS};
use crate::strategy::Strategy;

/// Move the raven one step closer. Must not be called on a lost state.
pub fn advance_raven(state: &GameState) -> GameState {
    debug_assert!(state.raven() > 0, "raven already arrived in {}", state);
    GameState::new(state.fruits(), state.raven() - 1)
}

/// Harvest one fruit from the tree at `index`.
///
/// The index is moved forward across a run of equal levels so that the last
/// element of the run is decremented, which keeps the levels sorted without a
/// re-sort. The resolved level must be positive.
pub fn pick_fruit(state: &GameState, index: FruitIndex) -> GameState {
    let mut fruits = state.fruits();
    let mut i = index;
    while i < NUM_FRUITS - 1 && fruits[i] == fruits[i + 1] {
        i += 1;
    }
    debug_assert!(fruits[i] > 0, "picking empty tree {} in {}", index, state);
    fruits[i] -= 1;
    GameState::new(fruits, state.raven())
}

/// Ordered branches of one turn from a non-terminal state.
///
/// Raven first, then one pick per tree that still carries fruit (ascending
/// index), then the basket pick chosen by `strategy`. Each entry carries equal
/// weight. The basket pick repeats one of the tree picks on purpose: it is the
/// player's own move and counts as its own term.
pub fn successors<S: Strategy + ?Sized>(state: &GameState, strategy: &S) -> Vec<GameState> {
    debug_assert!(!state.is_terminal(), "no successors of terminal state {}", state);
    let mut next = Vec::with_capacity(NUM_FRUITS + 2);
    next.push(advance_raven(state));
    next.extend(
        (0..NUM_FRUITS)
            .filter(|&i| state.fruit(i) > 0)
            .map(|i| pick_fruit(state, i)),
    );
    next.push(pick_fruit(state, strategy.choose(state)));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{GreedyBasket, VarietyBasket};

    fn is_sorted(s: &GameState) -> bool {
        s.fruits().windows(2).all(|w| w[0] >= w[1])
    }

    #[test]
    fn test_advance_raven_keeps_fruits() {
        let s = advance_raven(&GameState::initial());
        assert_eq!(s, GameState::new([4, 4, 4, 4], 4));
    }

    #[test]
    fn test_pick_fruit_resolves_ties_forward() {
        let s = pick_fruit(&GameState::initial(), 0);
        assert_eq!(s, GameState::new([4, 4, 4, 3], 5));
    }

    #[test]
    fn test_pick_fruit_partial_run() {
        let s = GameState::new([2, 2, 1, 0], 3);
        assert_eq!(pick_fruit(&s, 0), GameState::new([2, 1, 1, 0], 3));
        assert_eq!(pick_fruit(&s, 1), GameState::new([2, 1, 1, 0], 3));
        assert_eq!(pick_fruit(&s, 2), GameState::new([2, 2, 0, 0], 3));
    }

    #[test]
    fn test_pick_fruit_last_position() {
        let s = GameState::new([3, 1, 1, 1], 2);
        assert_eq!(pick_fruit(&s, 3), GameState::new([3, 1, 1, 0], 2));
        assert_eq!(pick_fruit(&s, 1), GameState::new([3, 1, 1, 0], 2));
    }

    #[test]
    fn test_pick_fruit_preserves_order_everywhere() {
        for s in GameState::all() {
            for i in 0..NUM_FRUITS {
                if s.fruit(i) > 0 {
                    let next = pick_fruit(&s, i);
                    assert!(is_sorted(&next), "{} pick {} -> {}", s, i, next);
                    assert_eq!(next.raven(), s.raven());
                    let before: u8 = s.fruits().iter().sum();
                    let after: u8 = next.fruits().iter().sum();
                    assert_eq!(before, after + 1);
                }
            }
        }
    }

    #[test]
    fn test_successors_branch_count() {
        // raven + 4 trees + basket
        assert_eq!(successors(&GameState::initial(), &GreedyBasket).len(), 6);
        // raven + 1 tree + basket
        let s = GameState::new([1, 0, 0, 0], 2);
        assert_eq!(successors(&s, &VarietyBasket).len(), 3);
    }

    #[test]
    fn test_successors_order() {
        let s = GameState::new([3, 1, 0, 0], 2);
        let next = successors(&s, &GreedyBasket);
        assert_eq!(
            next,
            vec![
                GameState::new([3, 1, 0, 0], 1),
                GameState::new([2, 1, 0, 0], 2),
                GameState::new([3, 0, 0, 0], 2),
                GameState::new([3, 0, 0, 0], 2),
            ]
        );
        let next = successors(&s, &VarietyBasket);
        assert_eq!(next[3], GameState::new([2, 1, 0, 0], 2));
    }
}
