use crate::algorithms::common::{run_search, Frontier, NodeId, SearchNode, SearchOutcome};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;

/// LIFO frontier. The same state may sit on the stack several times;
/// the engine drops the stale copies when they are popped.
#[derive(Debug, Default)]
pub struct DepthFirst {
    stack: Vec<NodeId>,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for DepthFirst {
    fn should_push(&self, state: Position, _: usize, explored: &FxHashSet<Position>) -> bool {
        !explored.contains(&state)
    }

    fn push(&mut self, id: NodeId, _: &SearchNode) {
        self.stack.push(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }
}

/// Depth-first search. The route it finds is valid but not necessarily short.
pub fn depth_first(grid: &Grid) -> SearchOutcome {
    run_search(grid, DepthFirst::new(), "dfs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn open_square_snakes() {
        let grid = Grid::new(3, 3, [], p(0, 0), p(2, 2)).unwrap();
        let outcome = depth_first(&grid);
        assert_eq!(
            outcome.path,
            Some(vec![
                p(0, 0),
                p(1, 0),
                p(2, 0),
                p(2, 1),
                p(1, 1),
                p(0, 1),
                p(0, 2),
                p(1, 2),
                p(2, 2)
            ])
        );
        assert_eq!(outcome.expansions(), 9);
        assert_eq!(
            outcome.actions.as_deref().map(|a| &a[..3]),
            Some(&[Direction::Right, Direction::Right, Direction::Down][..])
        );
    }

    #[test]
    fn stale_duplicates_are_not_counted() {
        // (1,1) is pushed twice before it is explored.
        let grid = Grid::new(3, 3, [], p(0, 0), p(2, 2)).unwrap();
        let outcome = depth_first(&grid);
        let mut seen = outcome.history.order().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), outcome.expansions());
    }
}
