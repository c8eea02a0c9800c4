use core::fmt;
use std::str::FromStr;

use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::error::ParseGridError;
use crate::{EMPTY, N_SMALLVEC_SIZE, ROCK, WALL};

/// Offsets of the 4-neighbourhood in expansion order: up, left, right, down.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Read-only walkability view consumed by the search. The dimensions must not change while a
/// search borrows the grid.
pub trait Walkable {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Whether the robot may stand on `cell`. Out-of-bounds cells are never walkable.
    fn is_walkable(&self, cell: Point) -> bool;
    fn in_bounds(&self, cell: Point) -> bool;

    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
}

impl<G: Walkable + ?Sized> Walkable for &G {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn is_walkable(&self, cell: Point) -> bool {
        (**self).is_walkable(cell)
    }
    fn in_bounds(&self, cell: Point) -> bool {
        (**self).in_bounds(cell)
    }
}

/// The up/left/right/down neighbours of `cell`, in bounds or not.
pub fn neumann_neighbours(cell: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    NEUMANN_OFFSETS
        .iter()
        .map(|&(dx, dy)| Point::new(cell.x + dx, cell.y + dy))
        .collect()
}

/// Whether a map symbol can be walked on. Walls and rocks both block movement.
pub fn is_walkable_symbol(symbol: char) -> bool {
    symbol != WALL && symbol != ROCK
}

/// A rectangular map of single-character tiles as used by the game engine. Rows run along
/// `y`, columns along `x`.
#[derive(Clone, Debug)]
pub struct CharGrid {
    tiles: SimpleValueGrid<char>,
}

impl CharGrid {
    pub fn new(width: usize, height: usize, fill: char) -> CharGrid {
        CharGrid {
            tiles: SimpleValueGrid::new(width, height, fill),
        }
    }

    pub fn get(&self, cell: Point) -> Option<char> {
        if self.tiles.point_in_bounds(cell) {
            Some(self.tiles.get_point(cell))
        } else {
            None
        }
    }

    /// Overwrites a tile. Returns false and leaves the map untouched if `cell` is out of bounds.
    pub fn set(&mut self, cell: Point, symbol: char) -> bool {
        if !self.tiles.point_in_bounds(cell) {
            return false;
        }
        self.tiles.set_point(cell, symbol);
        true
    }

    /// First cell in row-major order holding `symbol`, e.g. the robot or the lift.
    pub fn find_symbol(&self, symbol: char) -> Option<Point> {
        (0..self.height() as i32)
            .flat_map(|y| (0..self.width() as i32).map(move |x| Point::new(x, y)))
            .find(|p| self.tiles.get_point(*p) == symbol)
    }
}

impl Walkable for CharGrid {
    fn width(&self) -> usize {
        self.tiles.width()
    }
    fn height(&self) -> usize {
        self.tiles.height()
    }
    fn is_walkable(&self, cell: Point) -> bool {
        self.get(cell).is_some_and(is_walkable_symbol)
    }
    fn in_bounds(&self, cell: Point) -> bool {
        self.tiles.point_in_bounds(cell)
    }
}

impl FromStr for CharGrid {
    type Err = ParseGridError;

    /// Parses a map one row per line. Ragged rows are padded with empty tiles up to the widest
    /// row, matching how the engine loads its map files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ParseGridError::Empty);
        }
        let mut grid = CharGrid::new(width, height, EMPTY);
        for (y, line) in lines.iter().enumerate() {
            for (x, symbol) in line.chars().enumerate() {
                grid.tiles.set(x as i32, y as i32, symbol);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| self.tiles.get(x, y))
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
