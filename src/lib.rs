pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod render;
pub mod statistics;

pub use algorithms::common::{ExplorationHistory, SearchOutcome};
pub use algorithms::{a_star, bfs, dfs, search, search_with_history, SearchMethod};
pub use error::{MapError, RenderError};
pub use grid::{Direction, Grid, Position};
