pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod heuristics;

use crate::grid::{Grid, Position};
use clap::ValueEnum;
use common::{ExplorationHistory, SearchOutcome};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SearchMethod {
    Bfs,
    Dfs,
    #[value(name = "a_star")]
    AStar,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 3] = [SearchMethod::Bfs, SearchMethod::Dfs, SearchMethod::AStar];

    /// File-name friendly label.
    pub fn label(self) -> &'static str {
        match self {
            SearchMethod::Bfs => "BFS",
            SearchMethod::Dfs => "DFS",
            SearchMethod::AStar => "A_Star",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMethod::Bfs => write!(f, "BFS"),
            SearchMethod::Dfs => write!(f, "DFS"),
            SearchMethod::AStar => write!(f, "A*"),
        }
    }
}

/// Run `method` on `grid` and return everything it produced.
pub fn search(grid: &Grid, method: SearchMethod) -> SearchOutcome {
    let outcome = match method {
        SearchMethod::Bfs => bfs::breadth_first(grid),
        SearchMethod::Dfs => dfs::depth_first(grid),
        SearchMethod::AStar => a_star::a_star_search(grid),
    };
    info!(
        algorithm = %method,
        found = outcome.found(),
        steps = ?outcome.steps(),
        expansions = outcome.expansions(),
        "search finished"
    );
    outcome
}

/// Path and explored-set history, for animating the run.
pub fn search_with_history(
    grid: &Grid,
    method: SearchMethod,
) -> (Option<Vec<Position>>, ExplorationHistory) {
    let outcome = search(grid, method);
    (outcome.path, outcome.history)
}

fn with_count(grid: &Grid, method: SearchMethod) -> (Option<Vec<Position>>, usize) {
    let outcome = search(grid, method);
    let expansions = outcome.expansions();
    (outcome.path, expansions)
}

/// Breadth-first search: shortest path and number of expanded nodes.
pub fn bfs(grid: &Grid) -> (Option<Vec<Position>>, usize) {
    with_count(grid, SearchMethod::Bfs)
}

/// Depth-first search: some path and number of expanded nodes.
pub fn dfs(grid: &Grid) -> (Option<Vec<Position>>, usize) {
    with_count(grid, SearchMethod::Dfs)
}

/// A* search: shortest path and number of expanded nodes.
pub fn a_star(grid: &Grid) -> (Option<Vec<Position>>, usize) {
    with_count(grid, SearchMethod::AStar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_equal_to_goal_is_a_single_cell() {
        let here = Position::new(1, 1);
        let grid = Grid::new(3, 3, [Position::new(0, 0)], here, here).unwrap();
        for method in SearchMethod::ALL {
            let outcome = search(&grid, method);
            assert_eq!(outcome.path, Some(vec![here]), "{method}");
            assert_eq!(outcome.expansions(), 1, "{method}");
            assert_eq!(outcome.actions, Some(vec![]), "{method}");
        }
    }

    #[test]
    fn enclosed_goal_exhausts_the_start_component() {
        let grid = Grid::from_rows(&[
            "S..#.", //
            "...#G", //
            "..###",
        ])
        .unwrap();
        for method in SearchMethod::ALL {
            let (path, history) = search_with_history(&grid, method);
            assert_eq!(path, None, "{method}");
            assert_eq!(history.len(), 8, "{method}");
        }
    }

    #[test]
    fn count_variants_match_history_variant() {
        let grid = Grid::from_rows(&["S...G"]).unwrap();
        let runs: [(SearchMethod, fn(&Grid) -> (Option<Vec<Position>>, usize)); 3] = [
            (SearchMethod::Bfs, bfs),
            (SearchMethod::Dfs, dfs),
            (SearchMethod::AStar, a_star),
        ];
        for (method, run) in runs {
            let (path, count) = run(&grid);
            let (history_path, history) = search_with_history(&grid, method);
            assert_eq!(path, history_path);
            assert_eq!(count, history.len());
            assert_eq!(count, 5);
        }
    }

    #[test]
    fn parses_method_names() {
        assert_eq!(
            SearchMethod::from_str("a_star", true).unwrap(),
            SearchMethod::AStar
        );
        assert_eq!(SearchMethod::from_str("bfs", true).unwrap(), SearchMethod::Bfs);
        assert_eq!(SearchMethod::AStar.to_string(), "A*");
    }
}
