use crate::algorithms::common::{run_search, Frontier, NodeId, SearchNode, SearchOutcome};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// FIFO frontier. A state is never queued twice, so the goal is first
/// dequeued along a path with the fewest steps.
#[derive(Debug, Default)]
pub struct BreadthFirst {
    queue: VecDeque<(NodeId, Position)>,
    queued: FxHashSet<Position>,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for BreadthFirst {
    fn should_push(&self, state: Position, _: usize, explored: &FxHashSet<Position>) -> bool {
        !explored.contains(&state) && !self.queued.contains(&state)
    }

    fn push(&mut self, id: NodeId, node: &SearchNode) {
        self.queued.insert(node.state);
        self.queue.push_back((id, node.state));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let (id, state) = self.queue.pop_front()?;
        self.queued.remove(&state);
        Some(id)
    }
}

/// Breadth-first search from `grid.start` to `grid.goal`.
pub fn breadth_first(grid: &Grid) -> SearchOutcome {
    run_search(grid, BreadthFirst::new(), "bfs")
}
