//! orchard Engine - State space and win-probability evaluators
//!
//! This crate contains the orchard game state model, the transition model,
//! the basket strategies, and two exact evaluators over the state space:
//! a memoized top-down recursion and a bottom-up dynamic-programming sweep.
//!
//! The engine is deterministic and has no I/O beyond `log` output.

pub mod recursive;
pub mod solver;
pub mod state;
pub mod strategy;
pub mod sweep;
pub mod transition;

pub use state::{GameState, StateError};
pub use strategy::{GreedyBasket, Strategy, StrategyKind, VarietyBasket};
