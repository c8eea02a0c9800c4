use grid_util::point::Point;
use thiserror::Error;

/// Failures of a search call that are not a plain "no path" answer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or target cell lies outside the grid.
    #[error("cell {cell:?} is outside the {width}x{height} grid")]
    OutOfBounds {
        cell: Point,
        width: usize,
        height: usize,
    },
    /// Walking the parent pointers back from the target did not reach the start.
    #[error("parent chain is broken at {cell:?}")]
    BrokenParentChain { cell: Point },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("map contains no rows")]
    Empty,
}

/// Failures while turning a path into robot commands.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    #[error("{from:?} and {to:?} are not 4-adjacent")]
    NotAdjacent { from: Point, to: Point },
    #[error("'{0}' is not a robot command")]
    UnknownCommand(char),
}
