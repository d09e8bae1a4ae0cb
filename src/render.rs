use crate::algorithms::common::ExplorationHistory;
use crate::error::{RenderError, RenderResult};
use crate::grid::{Grid, Position, GOAL, START, WALL};
use clap::ValueEnum;
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{self, ClearType},
};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub const FLOOR: char = '.';
pub const EXPLORED: char = '+';
pub const ROUTE: char = '*';

/// Side of one grid cell in rendered images, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// What a single cell shows once every layer is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    Start,
    Goal,
    Explored,
    Route,
}

impl Tile {
    pub fn symbol(self) -> char {
        match self {
            Tile::Floor => FLOOR,
            Tile::Wall => WALL,
            Tile::Start => START,
            Tile::Goal => GOAL,
            Tile::Explored => EXPLORED,
            Tile::Route => ROUTE,
        }
    }

    pub fn color(self) -> Rgba<u8> {
        match self {
            Tile::Floor => Rgba([255, 255, 255, 255]),
            Tile::Wall => Rgba([0, 0, 0, 255]),
            Tile::Start => Rgba([0, 128, 0, 255]),
            Tile::Goal => Rgba([255, 0, 0, 255]),
            Tile::Explored => Rgba([211, 211, 211, 255]),
            Tile::Route => Rgba([0, 255, 255, 255]),
        }
    }
}

/// Classify every cell, indexed `[y][x]`.
///
/// Layers from bottom to top: floor and walls, explored cells, the path,
/// then the start and goal markers.
pub fn tiles(grid: &Grid, path: Option<&[Position]>, explored: &[Position]) -> Vec<Vec<Tile>> {
    let mut layers = vec![vec![Tile::Floor; grid.width()]; grid.height()];
    for wall in grid.obstacles() {
        layers[wall.y][wall.x] = Tile::Wall;
    }
    for p in explored {
        layers[p.y][p.x] = Tile::Explored;
    }
    for p in path.unwrap_or_default() {
        layers[p.y][p.x] = Tile::Route;
    }
    layers[grid.start.y][grid.start.x] = Tile::Start;
    layers[grid.goal.y][grid.goal.x] = Tile::Goal;
    layers
}

/// Draw the grid as text, one string per row.
pub fn render_rows(grid: &Grid, path: Option<&[Position]>, explored: &[Position]) -> Vec<String> {
    tiles(grid, path, explored)
        .into_iter()
        .map(|row| row.into_iter().map(Tile::symbol).collect())
        .collect()
}

/// Draw the grid as an image with one `cell_size` square block per cell.
pub fn rasterize(
    grid: &Grid,
    path: Option<&[Position]>,
    explored: &[Position],
    cell_size: u32,
) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let layers = tiles(grid, path, explored);
    RgbaImage::from_fn(
        grid.width() as u32 * cell_size,
        grid.height() as u32 * cell_size,
        |px, py| layers[(py / cell_size) as usize][(px / cell_size) as usize].color(),
    )
}

/// `"<title> (Cost: n)"`, or a no-path marker when the search failed.
pub fn title_line(title: &str, path: Option<&[Position]>) -> String {
    match path {
        Some(path) => format!("{} (Cost: {})", title, path.len().saturating_sub(1)),
        None => format!("{} (No path found)", title),
    }
}

/// Render a found (or missing) path into `<dir>/<title>.png`.
pub fn write_static(
    grid: &Grid,
    path: Option<&[Position]>,
    title: &str,
    dir: &Path,
    cell_size: u32,
) -> RenderResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let file = dir.join(format!("{}.png", title));
    rasterize(grid, path, &[], cell_size).save(&file)?;

    info!(file = %file.display(), label = %title_line(title, path), "saved path image");
    Ok(file)
}

/// One animation frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub step: usize,
    pub path: Option<&'a [Position]>,
    pub explored: &'a [Position],
}

/// Frames for an exploration replay.
///
/// Frame `i` shows the explored set after `i + 1` expansions. Once the
/// history runs out, `trailing` more frames overlay the final path; there
/// are none when no path was found.
pub fn frames<'a>(
    path: Option<&'a [Position]>,
    history: &'a ExplorationHistory,
    trailing: usize,
) -> impl Iterator<Item = Frame<'a>> + 'a {
    let explored_frames = history.len();
    let total = explored_frames + if path.is_some() { trailing } else { 0 };
    (0..total).map(move |step| Frame {
        step,
        path: if step >= explored_frames { path } else { None },
        explored: history.snapshot(step),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnimationFormat {
    /// Replay in the terminal.
    Terminal,
    /// Encode an animated GIF.
    Gif,
}

#[derive(Debug, Clone)]
pub struct AnimationOptions {
    pub format: AnimationFormat,
    pub delay: Duration,
    pub trailing_frames: usize,
    pub cell_size: u32,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationOutput {
    Played { frames: usize },
    Written(PathBuf),
}

/// Animate a search run on stdout, falling back to a GIF when stdout is
/// not a terminal.
pub fn animate(
    grid: &Grid,
    path: Option<&[Position]>,
    history: &ExplorationHistory,
    title: &str,
    options: &AnimationOptions,
) -> RenderResult<AnimationOutput> {
    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    animate_with(stdout.lock(), is_terminal, grid, path, history, title, options)
}

pub fn animate_with<W: Write>(
    out: W,
    is_terminal: bool,
    grid: &Grid,
    path: Option<&[Position]>,
    history: &ExplorationHistory,
    title: &str,
    options: &AnimationOptions,
) -> RenderResult<AnimationOutput> {
    if options.format == AnimationFormat::Terminal {
        match play(out, is_terminal, grid, path, history, title, options) {
            Ok(frames) => return Ok(AnimationOutput::Played { frames }),
            Err(err) => warn!(%err, "falling back to GIF"),
        }
    }
    write_gif(grid, path, history, title, options).map(AnimationOutput::Written)
}

fn play<W: Write>(
    mut out: W,
    is_terminal: bool,
    grid: &Grid,
    path: Option<&[Position]>,
    history: &ExplorationHistory,
    title: &str,
    options: &AnimationOptions,
) -> RenderResult<usize> {
    if !is_terminal {
        return Err(RenderError::EncoderUnavailable("terminal"));
    }

    let mut played = 0;
    for frame in frames(path, history, options.trailing_frames) {
        queue!(
            out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("{} - Step: {}\n\n", title, frame.step))
        )?;
        for row in render_rows(grid, frame.path, frame.explored) {
            queue!(out, Print(row), Print('\n'))?;
        }
        out.flush()?;
        played += 1;
        if !options.delay.is_zero() {
            thread::sleep(options.delay);
        }
    }
    Ok(played)
}

fn write_gif(
    grid: &Grid,
    path: Option<&[Position]>,
    history: &ExplorationHistory,
    title: &str,
    options: &AnimationOptions,
) -> RenderResult<PathBuf> {
    fs::create_dir_all(&options.output_dir)?;
    let file = options.output_dir.join(format!("{}.gif", title));

    let delay_ms = u32::try_from(options.delay.as_millis()).unwrap_or(u32::MAX);
    let mut encoder = GifEncoder::new(BufWriter::new(File::create(&file)?));
    encoder.set_repeat(Repeat::Infinite)?;
    for frame in frames(path, history, options.trailing_frames) {
        let image = rasterize(grid, frame.path, frame.explored, options.cell_size);
        encoder.encode_frame(image::Frame::from_parts(
            image,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))?;
    }

    info!(file = %file.display(), "saved exploration animation");
    Ok(file)
}
