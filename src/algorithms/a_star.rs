use crate::algorithms::common::{run_search, Frontier, NodeId, SearchNode, SearchOutcome};
use crate::algorithms::heuristics::manhattan;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Priority frontier ordered by `f = g + h`, ties broken by insertion order.
///
/// A child is only queued when it improves on the best `g` recorded for its
/// state. Older, costlier entries stay in the heap and are dropped by the
/// engine once their state has been explored.
#[derive(Debug)]
pub struct AStar {
    goal: Position,
    heap: BinaryHeap<Reverse<(usize, u64, NodeId)>>,
    g_costs: FxHashMap<Position, usize>,
    counter: u64,
}

impl AStar {
    pub fn new(goal: Position) -> Self {
        AStar {
            goal,
            heap: BinaryHeap::new(),
            g_costs: FxHashMap::default(),
            counter: 0,
        }
    }
}

impl Frontier for AStar {
    fn should_push(&self, state: Position, path_cost: usize, _: &FxHashSet<Position>) -> bool {
        self.g_costs
            .get(&state)
            .map_or(true, |&best| path_cost < best)
    }

    fn push(&mut self, id: NodeId, node: &SearchNode) {
        self.g_costs.insert(node.state, node.path_cost);
        let f_score = node.path_cost + manhattan(node.state, self.goal);
        self.heap.push(Reverse((f_score, self.counter, id)));
        self.counter += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }
}

/// A* search guided by the Manhattan distance to the goal.
pub fn a_star_search(grid: &Grid) -> SearchOutcome {
    run_search(grid, AStar::new(grid.goal), "a_star")
}
