use crate::error::{MapError, MapResult};
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const WALL: char = '#';
pub const START: char = 'S';
pub const GOAL: char = 'G';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// The position one step away in `dir`, or `None` if that would
    /// underflow a coordinate.
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.offset();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// A move between adjacent cells. `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbor enumeration order. Search discovery order depends on it.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

/// Occupancy map with a start and a goal. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    // Indexed as cells[x][y].
    cells: Vec<Vec<Cell>>,
    pub start: Position,
    pub goal: Position,
}

impl Grid {
    pub fn new<I>(
        width: usize,
        height: usize,
        obstacles: I,
        start: Position,
        goal: Position,
    ) -> MapResult<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        if width == 0 || height == 0 {
            return Err(MapError::TooSmall { width, height });
        }

        let mut cells = vec![vec![Cell::Empty; height]; width];
        for wall in obstacles {
            if wall.x >= width || wall.y >= height {
                return Err(MapError::OutOfBounds(wall));
            }
            cells[wall.x][wall.y] = Cell::Wall;
        }

        for endpoint in [start, goal] {
            if endpoint.x >= width || endpoint.y >= height {
                return Err(MapError::OutOfBounds(endpoint));
            }
            if cells[endpoint.x][endpoint.y] == Cell::Wall {
                return Err(MapError::BlockedEndpoint(endpoint));
            }
        }

        Ok(Grid {
            width,
            height,
            cells,
            start,
            goal,
        })
    }

    /// Build a grid from text rows. `#` is a wall, `S` the start, `G` the
    /// goal; anything else is open floor. Each row is trimmed at both ends
    /// and blank lines are skipped.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> MapResult<Self> {
        let rows: Vec<&str> = rows
            .iter()
            .map(|r| r.as_ref().trim())
            .filter(|r| !r.is_empty())
            .collect();

        let width = rows.first().ok_or(MapError::Empty)?.chars().count();
        let height = rows.len();

        let mut walls = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    WALL => walls.push(Position { x, y }),
                    START => start = Some(Position { x, y }),
                    GOAL => goal = Some(Position { x, y }),
                    _ => {}
                }
            }
        }

        let start = start.ok_or(MapError::MissingStart)?;
        let goal = goal.ok_or(MapError::MissingGoal)?;
        Grid::new(width, height, walls, start, goal)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> MapResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<&str> = text.lines().collect();
        let grid = Grid::from_rows(&rows)?;
        debug!(path = %path.display(), width = grid.width, height = grid.height, "loaded map");
        Ok(grid)
    }

    /// Generate a random maze. The start lands in the top-left quadrant and
    /// the goal in the bottom-right one; walls never cover either.
    ///
    /// A seed makes the layout reproducible. Walls are placed with a bounded
    /// number of attempts, so fewer than `num_walls` may end up on the grid.
    pub fn random(
        width: usize,
        height: usize,
        num_walls: usize,
        seed: Option<u64>,
    ) -> MapResult<Self> {
        if width < 2 || height < 2 {
            return Err(MapError::TooSmall { width, height });
        }

        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let start = Position {
            x: rng.gen_range(0..width / 2),
            y: rng.gen_range(0..height / 2),
        };
        let goal = Position {
            x: rng.gen_range(width / 2..width),
            y: rng.gen_range(height / 2..height),
        };

        // Start and goal sit in different quadrants, so two cells stay open.
        let target = num_walls.min(width * height - 2);
        let mut cells = vec![vec![Cell::Empty; height]; width];
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < target && attempts < num_walls.saturating_mul(3) {
            let pos = Position {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
            };
            if pos != start && pos != goal && cells[pos.x][pos.y] == Cell::Empty {
                cells[pos.x][pos.y] = Cell::Wall;
                walls_placed += 1;
            }
            attempts += 1;
        }

        debug!(?seed, walls_placed, ?start, ?goal, "generated random maze");

        Ok(Grid {
            width,
            height,
            cells,
            start,
            goal,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.cells[pos.x][pos.y] == Cell::Wall
    }

    /// All wall positions, row by row.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .map(move |x| Position { x, y })
                .filter(move |&p| self.cells[p.x][p.y] == Cell::Wall)
        })
    }

    /// Legal moves from `pos`, in `Direction::ALL` order.
    pub fn neighbors(&self, pos: Position) -> Vec<(Direction, Position)> {
        let mut neighbors = Vec::with_capacity(4);
        for dir in Direction::ALL {
            if let Some(next) = pos.step(dir) {
                if self.in_bounds(next) && self.cells[next.x][next.y] != Cell::Wall {
                    neighbors.push((dir, next));
                }
            }
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn neighbors_follow_up_down_left_right() {
        let grid = Grid::new(3, 3, [], p(0, 0), p(2, 2)).unwrap();
        assert_eq!(
            grid.neighbors(p(1, 1)),
            vec![
                (Direction::Up, p(1, 0)),
                (Direction::Down, p(1, 2)),
                (Direction::Left, p(0, 1)),
                (Direction::Right, p(2, 1)),
            ]
        );
        assert_eq!(
            grid.neighbors(p(0, 0)),
            vec![(Direction::Down, p(0, 1)), (Direction::Right, p(1, 0))]
        );
    }

    #[test]
    fn neighbors_skip_walls() {
        let grid = Grid::from_rows(&["S#", ".G"]).unwrap();
        assert_eq!(grid.neighbors(p(0, 0)), vec![(Direction::Down, p(0, 1))]);
        assert!(grid.is_wall(p(1, 0)));
        assert!(!grid.is_wall(p(5, 5)));
    }

    #[test]
    fn parses_rows() {
        let grid = Grid::from_rows(&["S..#", ".#.G", "...."]).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.start, p(0, 0));
        assert_eq!(grid.goal, p(3, 1));
        assert_eq!(grid.obstacles().collect::<Vec<_>>(), vec![p(3, 0), p(1, 1)]);
    }

    #[test]
    fn unknown_symbols_are_floor() {
        let grid = Grid::from_rows(&["S x", "~ G"]).unwrap();
        assert_eq!(grid.obstacles().count(), 0);
    }

    #[test]
    fn rejects_malformed_maps() {
        let empty: [&str; 0] = [];
        assert!(matches!(Grid::from_rows(&empty), Err(MapError::Empty)));
        assert!(matches!(
            Grid::from_rows(&["S..", ".G"]),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            Grid::from_rows(&["...", "..G"]),
            Err(MapError::MissingStart)
        ));
        assert!(matches!(
            Grid::from_rows(&["S..", "..."]),
            Err(MapError::MissingGoal)
        ));
    }

    #[test]
    fn rejects_invalid_endpoints() {
        assert!(matches!(
            Grid::new(2, 2, [p(1, 1)], p(0, 0), p(1, 1)),
            Err(MapError::BlockedEndpoint(_))
        ));
        assert!(matches!(
            Grid::new(2, 2, [], p(0, 0), p(2, 0)),
            Err(MapError::OutOfBounds(_))
        ));
        assert!(matches!(
            Grid::new(2, 2, [p(0, 9)], p(0, 0), p(1, 1)),
            Err(MapError::OutOfBounds(_))
        ));
        assert!(matches!(
            Grid::new(0, 2, [], p(0, 0), p(0, 0)),
            Err(MapError::TooSmall { .. })
        ));
    }

    #[test]
    fn rows_are_trimmed_on_both_sides() {
        let grid = Grid::from_rows(&["  S.#  ", "\t..G"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.start, p(0, 0));
        assert_eq!(grid.goal, p(2, 1));
        assert_eq!(grid.obstacles().collect::<Vec<_>>(), vec![p(2, 0)]);
    }

    #[test]
    fn huge_wall_budget_does_not_overflow() {
        let grid = Grid::random(4, 4, usize::MAX, Some(3)).unwrap();
        // Every cell but the start and goal ends up walled.
        assert_eq!(grid.obstacles().count(), 14);
    }

    #[test]
    fn random_maze_is_reproducible() {
        let a = Grid::random(12, 12, 30, Some(7)).unwrap();
        let b = Grid::random(12, 12, 30, Some(7)).unwrap();
        assert_eq!(a, b);
        assert!(a.start.x < 6 && a.start.y < 6);
        assert!(a.goal.x >= 6 && a.goal.y >= 6);
        assert!(!a.is_wall(a.start) && !a.is_wall(a.goal));
        assert!(a.obstacles().count() <= 30);
    }
}
