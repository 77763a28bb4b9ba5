//! orchard Tree Builder - Reachable game graph construction
//!
//! Builds the graph of states reachable from a root under a strategy by
//! breadth-first expansion of the engine's transition model. Terminal states
//! are recorded but never expanded.

use orchard_engine::state::{GameState, MAX_RAVEN};
use orchard_engine::strategy::Strategy;
use orchard_engine::transition::successors;
use std::collections::{HashMap, VecDeque};

/// Node ID type (index into flat array storage)
pub type NodeId = u32;

/// One reachable state
#[derive(Debug, Clone)]
pub struct Node {
    /// Index in the flat node array (discovery order)
    pub id: NodeId,
    pub state: GameState,
    /// Distinct successor nodes; empty for terminal states
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Flat graph of reachable states.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    /// Flat array of nodes indexed by NodeId
    pub nodes: Vec<Node>,
    index: HashMap<GameState, NodeId>,
}

impl StateGraph {
    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    pub fn contains(&self, state: &GameState) -> bool {
        self.index.contains_key(state)
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn terminal_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_terminal()).count()
    }

    /// Node counts per raven countdown, index = countdown
    pub fn by_raven(&self) -> Vec<usize> {
        let mut counts = vec![0usize; MAX_RAVEN as usize + 1];
        for node in &self.nodes {
            counts[node.state.raven() as usize] += 1;
        }
        counts
    }

    fn intern(&mut self, state: GameState, queue: &mut VecDeque<NodeId>) -> NodeId {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node { id, state, children: Vec::new() });
        self.index.insert(state, id);
        queue.push_back(id);
        id
    }
}

/// Breadth-first closure of the transition model from `root`.
pub fn build_graph<S: Strategy + ?Sized>(root: GameState, strategy: &S) -> StateGraph {
    let mut graph = StateGraph::default();
    let mut queue = VecDeque::new();
    graph.intern(root, &mut queue);

    while let Some(id) = queue.pop_front() {
        let state = graph.nodes[id as usize].state;
        if state.is_terminal() {
            continue;
        }
        let mut children: Vec<NodeId> = Vec::new();
        for next in successors(&state, strategy) {
            let child = graph.intern(next, &mut queue);
            if !children.contains(&child) {
                children.push(child);
            }
        }
        graph.nodes[id as usize].children = children;
    }

    log::debug!(
        "built graph from {}: {} states, {} terminal",
        root,
        graph.len(),
        graph.terminal_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_engine::strategy::{GreedyBasket, StrategyKind, VarietyBasket};
    use orchard_engine::sweep;

    #[test]
    fn test_reachable_count_from_initial() {
        for kind in StrategyKind::ALL {
            let graph = build_graph(GameState::initial(), &kind);
            // 70 combinations at raven 1..=5, 69 non-empty ones at raven 0
            assert_eq!(graph.len(), 419, "{}", kind);
            assert!(!graph.contains(&GameState::new([0, 0, 0, 0], 0)));
        }
    }

    #[test]
    fn test_by_raven_breakdown() {
        let graph = build_graph(GameState::initial(), &GreedyBasket);
        assert_eq!(graph.by_raven(), vec![69, 70, 70, 70, 70, 70]);
        // 69 lose states + 5 win states
        assert_eq!(graph.terminal_count(), 74);
    }

    #[test]
    fn test_root_is_node_zero() {
        let graph = build_graph(GameState::initial(), &VarietyBasket);
        assert_eq!(graph.get(0).unwrap().state, GameState::initial());
        // raven + one distinct pick (all trees tied)
        assert_eq!(graph.get(0).unwrap().children.len(), 2);
    }

    #[test]
    fn test_node_ids_match_array_index() {
        let graph = build_graph(GameState::initial(), &GreedyBasket);
        for (idx, node) in graph.nodes.iter().enumerate() {
            assert_eq!(node.id as usize, idx, "node id mismatch at index {}", idx);
            for &child in &node.children {
                assert!(graph.get(child).is_some(), "child {} out of bounds", child);
            }
        }
    }

    #[test]
    fn test_terminal_nodes_have_no_children() {
        let graph = build_graph(GameState::initial(), &GreedyBasket);
        for node in graph.nodes.iter().filter(|n| n.is_terminal()) {
            assert!(node.children.is_empty(), "terminal {} expanded", node.state);
        }
    }

    #[test]
    fn test_terminal_root() {
        let graph = build_graph(GameState::new([2, 1, 0, 0], 0), &GreedyBasket);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.terminal_count(), 1);
    }

    #[test]
    fn test_sweep_table_covers_reachable_states() {
        let graph = build_graph(GameState::initial(), &GreedyBasket);
        let table = sweep::solve(&GreedyBasket);
        for node in &graph.nodes {
            assert!(table.get(&node.state).is_some(), "{} missing from table", node.state);
        }
    }
}
