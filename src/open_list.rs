//! The open list of the search: an array-backed binary min-heap keyed on F-cost.
//!
//! Slots are 1-based so that the children of slot `i` sit at `2i` and `2i + 1`. A side table
//! maps every cell to the slot currently holding it, which keeps the "is this neighbour already
//! open, and where" check constant time instead of a scan over the heap.
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::trace;

/// A frontier cell with its path costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenListItem {
    pub cell: Point,
    /// Steps taken from the start.
    pub g: i32,
    /// Heuristic estimate to the target, 0 for uniform-cost search.
    pub h: i32,
    /// `g + h`, the heap key.
    pub f: i32,
}

impl OpenListItem {
    pub fn new(cell: Point, g: i32, h: i32) -> OpenListItem {
        OpenListItem { cell, g, h, f: g + h }
    }

    fn set_g(&mut self, g: i32) {
        self.g = g;
        self.f = g + self.h;
    }
}

const ABSENT: usize = 0;

#[derive(Clone, Debug)]
pub struct OpenList {
    /// Slot 0 is a placeholder and never read as a live entry.
    slots: Vec<OpenListItem>,
    /// Heap slot of every cell, `ABSENT` if the cell has no live entry.
    positions: SimpleValueGrid<usize>,
}

impl OpenList {
    /// Creates an empty heap able to hold every cell of a `width` x `height` grid.
    pub fn new(width: usize, height: usize) -> OpenList {
        let mut slots = Vec::with_capacity(width * height + 2);
        slots.push(OpenListItem::new(Point::new(-1, -1), 0, 0));
        OpenList {
            slots,
            positions: SimpleValueGrid::new(width, height, ABSENT),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lowest-F entry without removing it.
    pub fn peek(&self) -> Option<&OpenListItem> {
        self.slots.get(1)
    }

    /// Whether `cell` currently has a live entry.
    pub fn contains(&self, cell: Point) -> bool {
        self.find(cell).is_some()
    }

    /// Slot holding `cell`, if it is on the heap. Cells outside the grid are never on it.
    pub fn find(&self, cell: Point) -> Option<usize> {
        if !self.positions.point_in_bounds(cell) {
            return None;
        }
        match self.positions.get_point(cell) {
            ABSENT => None,
            slot => Some(slot),
        }
    }

    pub fn get(&self, cell: Point) -> Option<&OpenListItem> {
        self.find(cell).map(|slot| &self.slots[slot])
    }

    /// Appends `item` and lets it rise to its place. Returns false and leaves the heap untouched
    /// if the cell lies outside the grid or is already on the heap.
    pub fn push(&mut self, item: OpenListItem) -> bool {
        if !self.positions.point_in_bounds(item.cell) || self.contains(item.cell) {
            return false;
        }
        self.slots.push(item);
        let slot = self.len();
        self.positions.set_point(item.cell, slot);
        self.sift_up(slot);
        true
    }

    /// Removes and returns the lowest-F entry.
    pub fn pop(&mut self) -> Option<OpenListItem> {
        if self.is_empty() {
            return None;
        }
        let top = self.slots[1];
        self.positions.set_point(top.cell, ABSENT);
        let last = self.slots.pop()?;
        if !self.is_empty() {
            self.slots[1] = last;
            self.positions.set_point(last.cell, 1);
            self.sift_down(1);
        }
        Some(top)
    }

    /// Lowers the G-cost of the entry for `cell` and restores heap order. Returns false if the
    /// cell is not on the heap or `g` is not an improvement.
    pub fn decrease_key(&mut self, cell: Point, g: i32) -> bool {
        match self.find(cell) {
            Some(slot) if g < self.slots[slot].g => {
                trace!("decrease {:?}: g {} -> {}", cell, self.slots[slot].g, g);
                self.slots[slot].set_g(g);
                self.sift_up(slot);
                true
            }
            _ => false,
        }
    }

    /// Entries that tie with their parent still rise, so among equal F-costs newer entries tend
    /// to be served first.
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 1 && self.slots[slot].f <= self.slots[slot / 2].f {
            self.swap(slot, slot / 2);
            slot /= 2;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.len();
        loop {
            let left = 2 * slot;
            let right = left + 1;
            let mut next = slot;
            if left <= len && self.slots[next].f >= self.slots[left].f {
                next = left;
            }
            if right <= len && self.slots[next].f >= self.slots[right].f {
                next = right;
            }
            if next == slot {
                break;
            }
            self.swap(slot, next);
            slot = next;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.positions.set_point(self.slots[a].cell, a);
        self.positions.set_point(self.slots[b].cell, b);
    }
}
