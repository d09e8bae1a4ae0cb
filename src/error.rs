use crate::grid::Position;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error produced when a maze description cannot be turned into a grid.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("could not read map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("map has no rows")]
    Empty,

    #[error("grid of {width}x{height} is too small")]
    TooSmall { width: usize, height: usize },

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map has no start marker 'S'")]
    MissingStart,

    #[error("map has no goal marker 'G'")]
    MissingGoal,

    #[error("position ({}, {}) lies outside the grid", .0.x, .0.y)]
    OutOfBounds(Position),

    #[error("start or goal ({}, {}) is placed on an obstacle", .0.x, .0.y)]
    BlockedEndpoint(Position),
}

/// Error produced by the presentation adapters.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("{0} encoder is unavailable")]
    EncoderUnavailable(&'static str),
}

pub type MapResult<T> = std::result::Result<T, MapError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
