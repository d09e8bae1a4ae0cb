use crate::algorithms::SearchMethod;
use crate::render::{AnimationFormat, DEFAULT_CELL_SIZE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Predefined maps shipped under `maps/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapSize {
    /// 10x10
    Small,
    /// 20x10
    Medium,
    /// 30x30
    Large,
}

impl MapSize {
    pub fn path(self) -> PathBuf {
        let file = match self {
            MapSize::Small => "small.txt",
            MapSize::Medium => "medium.txt",
            MapSize::Large => "large.txt",
        };
        PathBuf::from("maps").join(file)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Predefined map to search
    #[arg(long, value_enum, default_value_t = MapSize::Small)]
    pub map: MapSize,

    /// Load the maze from this file instead of a predefined map
    #[arg(long, conflicts_with = "random")]
    pub map_file: Option<PathBuf>,

    /// Generate a random maze instead of loading one
    #[arg(long, default_value_t = false)]
    pub random: bool,

    #[arg(long, default_value_t = 20)]
    pub width: usize,

    #[arg(long, default_value_t = 20)]
    pub height: usize,

    #[arg(long, default_value_t = 50)]
    pub num_walls: usize,

    /// Seed for the random maze
    #[arg(long)]
    pub seed: Option<u64>,

    /// Algorithms to run, comma separated
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = SearchMethod::ALL.to_vec()
    )]
    pub algorithm: Vec<SearchMethod>,

    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Replay the exploration instead of only saving the final path
    #[arg(long, default_value_t = false)]
    pub animate: bool,

    #[arg(long, value_enum, default_value_t = AnimationFormat::Terminal)]
    pub format: AnimationFormat,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Pixels per grid cell in saved images
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    #[arg(long, default_value_t = 20)]
    pub trailing_frames: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn map_path(&self) -> PathBuf {
        self.map_file.clone().unwrap_or_else(|| self.map.path())
    }
}
