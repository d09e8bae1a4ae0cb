use crate::algorithms::common::SearchOutcome;
use crate::algorithms::heuristics::manhattan;
use crate::algorithms::SearchMethod;
use crate::grid::{Grid, Position};
use pathfinding::prelude::astar;
use std::fmt;

/// Summary of one algorithm's run against a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub method: SearchMethod,
    pub path_steps: Option<usize>,
    pub expansions: usize,
    pub optimal_steps: Option<usize>,
    pub route_efficiency: f64,
}

impl SearchReport {
    pub fn new(method: SearchMethod, outcome: &SearchOutcome, optimal_steps: Option<usize>) -> Self {
        let mut report = SearchReport {
            method,
            path_steps: outcome.steps(),
            expansions: outcome.expansions(),
            optimal_steps,
            route_efficiency: 0.0,
        };
        report.calculate_efficiency();
        report
    }

    /// Ratio of steps taken to the optimal number of steps. 1.0 is optimal,
    /// 0.0 means there was nothing to compare.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match (self.path_steps, self.optimal_steps) {
            (Some(steps), Some(optimal)) if optimal > 0 => steps as f64 / optimal as f64,
            (Some(0), Some(0)) => 1.0,
            _ => 0.0,
        };
    }

    pub fn is_optimal(&self) -> bool {
        self.path_steps.is_some() && self.path_steps == self.optimal_steps
    }

    /// `"<n>. <NAME> -> Cost: c, Nodes: k"`, with `X` as the cost when no
    /// path was found.
    pub fn summary_line(&self, index: usize) -> String {
        let cost = self
            .path_steps
            .map_or_else(|| "X".to_string(), |s| s.to_string());
        format!(
            "{}. {} -> Cost: {}, Nodes: {}",
            index, self.method, cost, self.expansions
        )
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Search Statistics:", self.method)?;
        match self.path_steps {
            Some(steps) => writeln!(f, "Path Length: {} steps", steps)?,
            None => writeln!(f, "Path Length: no path found")?,
        }
        writeln!(f, "Nodes Expanded: {}", self.expansions)?;
        if let Some(optimal) = self.optimal_steps {
            writeln!(f, "Optimal Path Length: {}", optimal)?;
            writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        }
        Ok(())
    }
}

/// Shortest path length computed independently with the `pathfinding`
/// crate, used as a reference for the reports.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    let goal = grid.goal;
    astar(
        &grid.start,
        |p: &Position| {
            grid.neighbors(*p)
                .into_iter()
                .map(|(_, next)| (next, 1usize))
                .collect::<Vec<_>>()
        },
        |p| manhattan(*p, goal),
        |p| *p == goal,
    )
    .map(|(_, cost)| cost)
}

/// Print the reports side by side.
pub fn print_comparison(reports: &[SearchReport]) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();
    println!(
        "{:<10} {:<8} {:<8} {:<8} {:<12} {:<10}",
        "Algorithm", "Found", "Steps", "Optimal", "Efficiency", "Expanded"
    );
    println!("{}", "-".repeat(60));

    for report in reports {
        let found = if report.path_steps.is_some() { "✓" } else { "✗" };
        let steps = report
            .path_steps
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let optimal = report
            .optimal_steps
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "{:<10} {:<8} {:<8} {:<8} {:<12.3} {:<10}",
            report.method.to_string(),
            found,
            steps,
            optimal,
            report.route_efficiency,
            report.expansions
        );
    }

    if let Some(best) = reports
        .iter()
        .filter(|r| r.path_steps.is_some())
        .min_by_key(|r| r.expansions)
    {
        println!();
        println!(
            "Fewest expansions: {} ({} nodes)",
            best.method, best.expansions
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::search;

    #[test]
    fn reference_length_matches_bfs() {
        let grid = Grid::from_rows(&["S.#.", "..#.", "...G"]).unwrap();
        assert_eq!(optimal_path_length(&grid), Some(5));
        let outcome = search(&grid, SearchMethod::Bfs);
        let report = SearchReport::new(SearchMethod::Bfs, &outcome, optimal_path_length(&grid));
        assert!(report.is_optimal());
        assert_eq!(report.route_efficiency, 1.0);
        assert_eq!(report.summary_line(1), "1. BFS -> Cost: 5, Nodes: 8");
    }

    #[test]
    fn report_without_path() {
        let grid = Grid::from_rows(&["S#G"]).unwrap();
        assert_eq!(optimal_path_length(&grid), None);
        let outcome = search(&grid, SearchMethod::Dfs);
        let report = SearchReport::new(SearchMethod::Dfs, &outcome, None);
        assert!(!report.is_optimal());
        assert_eq!(report.route_efficiency, 0.0);
        assert_eq!(report.summary_line(2), "2. DFS -> Cost: X, Nodes: 1");
        assert!(report.to_string().contains("no path found"));
    }

    #[test]
    fn trivial_route_is_fully_efficient() {
        let here = Position::new(0, 0);
        let grid = Grid::new(1, 1, [], here, here).unwrap();
        let outcome = search(&grid, SearchMethod::AStar);
        let report = SearchReport::new(SearchMethod::AStar, &outcome, optimal_path_length(&grid));
        assert_eq!(report.route_efficiency, 1.0);
    }
}
