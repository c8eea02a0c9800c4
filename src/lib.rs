//! # tile_pathfinding
//!
//! Pathfinding for tile-based puzzle games. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a 4-connected grid with a
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic, which can be
//! switched off to fall back to uniform-cost search. The open list is a hand-rolled binary heap
//! with constant-time lookup of open cells. Every search borrows a frozen grid snapshot and
//! keeps no state between calls.
//!
//! Found paths can be turned into the single-character robot commands the game replays during
//! its automatic "solve" mode, see [trace].
//!
//! ```
//! use grid_util::point::Point;
//! use tile_pathfinding::{CharGrid, Pathfinder};
//!
//! let grid: CharGrid = "R..\n##.\nL..".parse().unwrap();
//! let result = Pathfinder::default()
//!     .find_path(&grid, Point::new(0, 0), Point::new(0, 2))
//!     .unwrap();
//! assert_eq!(result.len(), 7);
//! ```
pub mod components;
pub mod error;
pub mod grid;
pub mod open_list;
pub mod pathfinder;
mod search;
pub mod trace;

pub use components::ComponentMap;
pub use error::{ParseGridError, SearchError, TraceError};
pub use grid::{CharGrid, Walkable};
pub use pathfinder::{
    find_path, PathStatus, Pathfinder, SearchConfig, SearchResult, SearchStats, Termination,
};

/// Impassable wall tile.
pub const WALL: char = '#';
/// Impassable rock tile.
pub const ROCK: char = '*';
/// The robot's own tile, usually the start of a search.
pub const ROBOT: char = 'R';
/// The lift the robot leaves the map through.
pub const LIFT: char = 'L';
/// A collectable lambda. Walkable.
pub const LAMBDA: char = '\\';
/// Earth the robot digs through. Walkable.
pub const EARTH: char = '.';
/// Empty space, also used to pad ragged map rows.
pub const EMPTY: char = ' ';

/// Inline capacity for neighbourhoods, which never exceed four cells on a 4-grid.
pub const N_SMALLVEC_SIZE: usize = 4;
