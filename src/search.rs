//! The search loop shared by A* and uniform-cost search. All state lives in a [SearchContext]
//! created for one call and dropped when the call returns, whichever way it returns.
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::{debug, trace, warn};

use crate::error::SearchError;
use crate::grid::{neumann_neighbours, Walkable};
use crate::open_list::{OpenList, OpenListItem};
use crate::pathfinder::{SearchConfig, SearchResult, SearchStats, Termination};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Visit {
    #[default]
    Unvisited,
    Open,
    Closed,
}

struct SearchContext {
    open_list: OpenList,
    visits: SimpleValueGrid<Visit>,
    parents: SimpleValueGrid<Option<Point>>,
}

/// Cells are only handed to the context after the search has bounds-checked them.
impl SearchContext {
    fn new(width: usize, height: usize) -> SearchContext {
        SearchContext {
            open_list: OpenList::new(width, height),
            visits: SimpleValueGrid::new(width, height, Visit::Unvisited),
            parents: SimpleValueGrid::new(width, height, None),
        }
    }

    fn visit(&self, cell: Point) -> Visit {
        self.visits.get_point(cell)
    }

    fn set_visit(&mut self, cell: Point, visit: Visit) {
        self.visits.set_point(cell, visit);
    }

    fn set_parent(&mut self, cell: Point, parent: Point) {
        self.parents.set_point(cell, Some(parent));
    }

    fn parent(&self, cell: Point) -> Option<Point> {
        if self.parents.point_in_bounds(cell) {
            self.parents.get_point(cell)
        } else {
            None
        }
    }

    /// Follows parent pointers from `target` back to `start` and returns the path start first.
    fn reverse_path(&self, start: Point, target: Point) -> Result<Vec<Point>, SearchError> {
        let cell_count = self.parents.width() * self.parents.height();
        let mut path = vec![target];
        let mut current = target;
        while current != start {
            // A chain longer than the grid has a cycle in it.
            let parent = match self.parent(current) {
                Some(parent) if path.len() <= cell_count => parent,
                _ => {
                    warn!("Parent chain from {:?} to {:?} broke at {:?}", target, start, current);
                    return Err(SearchError::BrokenParentChain { cell: current });
                }
            };
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }
}

/// Runs the search from `start` to `target`. Both cells must already be known to be in bounds,
/// the target walkable and distinct from the start.
pub(crate) fn astar_grid<G: Walkable>(
    grid: &G,
    start: Point,
    target: Point,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError> {
    let heuristic = |cell: Point| {
        if config.use_heuristic {
            cell.manhattan_distance(&target)
        } else {
            0
        }
    };
    let mut ct = SearchContext::new(grid.width(), grid.height());
    let mut stats = SearchStats::default();

    ct.open_list.push(OpenListItem::new(start, 0, heuristic(start)));
    ct.set_visit(start, Visit::Open);

    while let Some(current) = ct.open_list.pop() {
        ct.set_visit(current.cell, Visit::Closed);
        stats.expanded += 1;
        trace!("Expanding {:?} (g {}, f {})", current.cell, current.g, current.f);

        if config.termination == Termination::OnExtraction && current.cell == target {
            return found(&ct, start, target, stats);
        }

        for neighbour in neumann_neighbours(current.cell) {
            if !grid.in_bounds(neighbour)
                || ct.visit(neighbour) == Visit::Closed
                || !grid.is_walkable(neighbour)
            {
                continue;
            }
            // Always derived from the expanded cell, never carried over between siblings.
            let g = current.g + 1;
            match ct.visit(neighbour) {
                Visit::Unvisited => {
                    ct.open_list
                        .push(OpenListItem::new(neighbour, g, heuristic(neighbour)));
                    ct.set_parent(neighbour, current.cell);
                    ct.set_visit(neighbour, Visit::Open);
                }
                Visit::Open => {
                    if ct.open_list.decrease_key(neighbour, g) {
                        ct.set_parent(neighbour, current.cell);
                    }
                }
                Visit::Closed => unreachable!("closed cells are skipped above"),
            }
        }
        stats.peak_open = stats.peak_open.max(ct.open_list.len());

        if config.termination == Termination::OnDiscovery && ct.visit(target) == Visit::Open {
            return found(&ct, start, target, stats);
        }
    }
    debug!(
        "Open list exhausted after {} expansions, {:?} is not reachable from {:?}",
        stats.expanded, target, start
    );
    Ok(SearchResult::not_found(stats))
}

fn found(
    ct: &SearchContext,
    start: Point,
    target: Point,
    stats: SearchStats,
) -> Result<SearchResult, SearchError> {
    let path = ct.reverse_path(start, target)?;
    debug!(
        "Found path of {} cells from {:?} to {:?} after {} expansions",
        path.len(),
        start,
        target,
        stats.expanded
    );
    Ok(SearchResult::found(path, stats))
}
