use crate::grid::{Direction, Grid, Position};
use rustc_hash::FxHashSet;
use std::ops::Index;
use tracing::{debug, trace};

/// Handle to a node stored in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One step of a search tree. Nodes are never mutated after insertion;
/// children point back to their parent by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub state: Position,
    pub parent: Option<NodeId>,
    pub action: Option<Direction>,
    pub path_cost: usize,
}

impl SearchNode {
    pub fn root(state: Position) -> Self {
        SearchNode {
            state,
            parent: None,
            action: None,
            path_cost: 0,
        }
    }
}

/// Owns every node created during one search run.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Create the child reached from `parent` by moving `action` into `state`.
    pub fn extend(&mut self, parent: NodeId, action: Direction, state: Position) -> NodeId {
        let path_cost = self[parent].path_cost + 1;
        self.insert(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            path_cost,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn chain(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        std::iter::successors(Some(&self[id]), move |node| node.parent.map(|p| &self[p]))
    }

    /// Cells from the root to `id`, inclusive on both ends.
    pub fn path_to(&self, id: NodeId) -> Vec<Position> {
        let mut path: Vec<Position> = self.chain(id).map(|n| n.state).collect();
        path.reverse();
        path
    }

    /// Moves taken from the root to reach `id`.
    pub fn actions_to(&self, id: NodeId) -> Vec<Direction> {
        let mut actions: Vec<Direction> = self.chain(id).filter_map(|n| n.action).collect();
        actions.reverse();
        actions
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

/// Order in which states were committed to the explored set.
///
/// Snapshot `i` is the explored set right after the `i`-th commit; it is the
/// prefix `order[..=i]`, so full snapshots are never copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorationHistory {
    order: Vec<Position>,
}

impl ExplorationHistory {
    pub fn record(&mut self, state: Position) {
        self.order.push(state);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[Position] {
        &self.order
    }

    /// Explored set after `step` commits (0-based), clamped to the last one.
    pub fn snapshot(&self, step: usize) -> &[Position] {
        match self.order.len() {
            0 => &[],
            len => &self.order[..=step.min(len - 1)],
        }
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &[Position]> + '_ {
        (0..self.order.len()).map(move |i| self.snapshot(i))
    }
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<Vec<Position>>,
    pub actions: Option<Vec<Direction>>,
    pub history: ExplorationHistory,
}

impl SearchOutcome {
    /// Number of nodes expanded. Every expansion commits exactly one state.
    pub fn expansions(&self) -> usize {
        self.history.len()
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Steps in the path, i.e. one less than its cell count.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Discipline deciding which discovered node is expanded next.
pub trait Frontier {
    /// Whether a child reaching `state` with cost `path_cost` should be
    /// added. `explored` holds every state committed so far.
    fn should_push(
        &self,
        state: Position,
        path_cost: usize,
        explored: &FxHashSet<Position>,
    ) -> bool;

    fn push(&mut self, id: NodeId, node: &SearchNode);

    fn pop(&mut self) -> Option<NodeId>;
}

/// Drive a search over `grid` with the given frontier discipline.
///
/// A popped node whose state is already explored is dropped without being
/// counted. The goal is committed to the explored set (and the history)
/// before its path is returned.
pub fn run_search<F: Frontier>(grid: &Grid, mut frontier: F, name: &str) -> SearchOutcome {
    debug!(algorithm = name, start = ?grid.start, goal = ?grid.goal, "starting search");

    let mut arena = NodeArena::new();
    let mut explored: FxHashSet<Position> = FxHashSet::default();
    let mut history = ExplorationHistory::default();

    let root = arena.insert(SearchNode::root(grid.start));
    frontier.push(root, &arena[root]);

    while let Some(current) = frontier.pop() {
        let state = arena[current].state;
        if !explored.insert(state) {
            trace!(algorithm = name, ?state, "skipping already explored state");
            continue;
        }
        history.record(state);

        if state == grid.goal {
            debug!(
                algorithm = name,
                expansions = history.len(),
                nodes = arena.len(),
                cost = arena[current].path_cost,
                "goal reached"
            );
            return SearchOutcome {
                path: Some(arena.path_to(current)),
                actions: Some(arena.actions_to(current)),
                history,
            };
        }

        let path_cost = arena[current].path_cost + 1;
        for (action, next) in grid.neighbors(state) {
            if frontier.should_push(next, path_cost, &explored) {
                let child = arena.extend(current, action, next);
                frontier.push(child, &arena[child]);
            }
        }
    }

    debug!(
        algorithm = name,
        expansions = history.len(),
        nodes = arena.len(),
        "frontier exhausted without reaching the goal"
    );
    SearchOutcome {
        path: None,
        actions: None,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_reconstruction_walks_parents() {
        let mut arena = NodeArena::new();
        let root = arena.insert(SearchNode::root(Position::new(0, 0)));
        let a = arena.extend(root, Direction::Right, Position::new(1, 0));
        let b = arena.extend(a, Direction::Down, Position::new(1, 1));
        // Fan-out: a second child of the root must not disturb the chain.
        arena.extend(root, Direction::Down, Position::new(0, 1));

        assert_eq!(arena[b].path_cost, 2);
        assert_eq!(
            arena.path_to(b),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
        assert_eq!(arena.actions_to(b), vec![Direction::Right, Direction::Down]);
        assert_eq!(arena.path_to(root), vec![Position::new(0, 0)]);
        assert!(arena.actions_to(root).is_empty());
    }

    #[test]
    fn snapshots_are_prefixes() {
        let mut history = ExplorationHistory::default();
        assert!(history.snapshot(3).is_empty());
        for x in 0..3 {
            history.record(Position::new(x, 0));
        }
        assert_eq!(history.snapshot(0), &[Position::new(0, 0)]);
        assert_eq!(history.snapshot(1).len(), 2);
        assert_eq!(history.snapshot(99).len(), 3);
        let sizes: Vec<usize> = history.snapshots().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
    }
}
