use grid_util::point::Point;
use log::debug;

use crate::components::ComponentMap;
use crate::error::SearchError;
use crate::grid::Walkable;
use crate::search::astar_grid;

/// When the search is allowed to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Termination {
    /// Stop once the target is extracted as the cheapest open cell (classic A*).
    #[default]
    OnExtraction,
    /// Stop as soon as the target is placed on the open list. Expands fewer cells; on this
    /// unit-cost 4-grid the returned length is unchanged, although the exact route may differ.
    OnDiscovery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Manhattan heuristic when true, uniform-cost search when false.
    pub use_heuristic: bool,
    pub termination: Termination,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            use_heuristic: true,
            termination: Termination::OnExtraction,
        }
    }
}

impl SearchConfig {
    pub fn uniform_cost() -> SearchConfig {
        SearchConfig {
            use_heuristic: false,
            ..SearchConfig::default()
        }
    }

    /// Heuristic search that stops on discovery of the target, like the engine's original solver.
    pub fn legacy() -> SearchConfig {
        SearchConfig {
            use_heuristic: true,
            termination: Termination::OnDiscovery,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    Found,
    NotFound,
}

/// Bookkeeping from one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells extracted from the open list and closed.
    pub expanded: usize,
    /// Largest number of simultaneously open cells.
    pub peak_open: usize,
}

/// Outcome of a search call. The path runs from start to target inclusive and is empty unless
/// the status is [PathStatus::Found].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    status: PathStatus,
    path: Vec<Point>,
    stats: SearchStats,
}

impl SearchResult {
    pub(crate) fn found(path: Vec<Point>, stats: SearchStats) -> SearchResult {
        SearchResult {
            status: PathStatus::Found,
            path,
            stats,
        }
    }

    pub(crate) fn not_found(stats: SearchStats) -> SearchResult {
        SearchResult {
            status: PathStatus::NotFound,
            path: Vec::new(),
            stats,
        }
    }

    pub fn status(&self) -> PathStatus {
        self.status
    }

    pub fn is_found(&self) -> bool {
        self.status == PathStatus::Found
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Number of cells on the path, start and target included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}

/// Finds 4-connected paths on a borrowed grid snapshot. Holds nothing but its configuration, so
/// one value can serve any number of grids and threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pathfinder {
    pub config: SearchConfig,
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Pathfinder {
        Pathfinder { config }
    }

    /// Computes a path from `start` to `target`.
    ///
    /// Out-of-bounds coordinates are an error. A walled target is never found, even when the
    /// start already stands on it. A start equal to the target yields the single-cell path.
    pub fn find_path<G: Walkable>(
        &self,
        grid: &G,
        start: Point,
        target: Point,
    ) -> Result<SearchResult, SearchError> {
        check_bounds(grid, start)?;
        check_bounds(grid, target)?;
        if !grid.is_walkable(target) {
            debug!("{:?} is not walkable, no path from {:?}", target, start);
            return Ok(SearchResult::not_found(SearchStats::default()));
        }
        if start == target {
            return Ok(SearchResult::found(vec![start], SearchStats::default()));
        }
        astar_grid(grid, start, target, &self.config)
    }

    /// Like [find_path](Self::find_path), but consults precomputed connected components first
    /// and skips the search entirely when the target cannot be reached.
    pub fn find_path_with_components<G: Walkable>(
        &self,
        grid: &G,
        components: &ComponentMap,
        start: Point,
        target: Point,
    ) -> Result<SearchResult, SearchError> {
        check_bounds(grid, start)?;
        check_bounds(grid, target)?;
        if components.unreachable(&start, &target) {
            debug!("{:?} is not reachable from {:?}", target, start);
            return Ok(SearchResult::not_found(SearchStats::default()));
        }
        self.find_path(grid, start, target)
    }
}

fn check_bounds<G: Walkable>(grid: &G, cell: Point) -> Result<(), SearchError> {
    if grid.in_bounds(cell) {
        Ok(())
    } else {
        Err(SearchError::OutOfBounds {
            cell,
            width: grid.width(),
            height: grid.height(),
        })
    }
}

/// One-shot search with the default termination rule.
pub fn find_path<G: Walkable>(
    grid: &G,
    start: Point,
    target: Point,
    use_heuristic: bool,
) -> Result<SearchResult, SearchError> {
    let config = SearchConfig {
        use_heuristic,
        ..SearchConfig::default()
    };
    Pathfinder::new(config).find_path(grid, start, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CharGrid;

    fn grid(rows: &str) -> CharGrid {
        rows.parse().unwrap()
    }

    fn assert_steps_adjacent(path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1, "{:?}", pair);
        }
    }

    /// Asserts that the case in which start and target are equal is handled correctly.
    #[test]
    fn equal_start_target() {
        let grid = grid("...\n...");
        let start = Point::new(1, 1);
        let result = find_path(&grid, start, start, true).unwrap();
        assert!(result.is_found());
        assert_eq!(result.path(), &[start]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let grid = grid(".....\n.....\n.....\n.....\n.....");
        let start = Point::new(0, 0);
        let target = Point::new(4, 4);
        for config in [
            SearchConfig::default(),
            SearchConfig::uniform_cost(),
            SearchConfig::legacy(),
        ] {
            let result = Pathfinder::new(config)
                .find_path(&grid, start, target)
                .unwrap();
            assert_eq!(result.status(), PathStatus::Found);
            assert_eq!(result.len(), 9);
            assert_eq!(result.path().first(), Some(&start));
            assert_eq!(result.path().last(), Some(&target));
            assert_steps_adjacent(result.path());
            for (i, p) in result.path().iter().enumerate() {
                assert_eq!(p.manhattan_distance(&target), 8 - i as i32);
            }
        }
    }

    /// The middle row is blocked except at one end, forcing a detour.
    #[test]
    fn detours_around_blocked_row() {
        let grid = grid("...\n##.\n...");
        let start = Point::new(0, 0);
        let target = Point::new(2, 2);
        let result = find_path(&grid, start, target, true).unwrap();
        assert!(result.is_found());
        assert_eq!(result.len(), 5);
        assert_steps_adjacent(result.path());
        assert!(result.path().iter().all(|p| grid.is_walkable(*p)));
    }

    #[test]
    fn fully_blocked_row_has_no_path() {
        let grid = grid("...\n#*#\n...");
        let result = find_path(&grid, Point::new(0, 0), Point::new(2, 2), true).unwrap();
        assert_eq!(result.status(), PathStatus::NotFound);
        assert!(result.is_empty());
        assert!(result.stats().expanded > 0);
    }

    #[test]
    fn walled_target_short_circuits() {
        let grid = grid("..#\n...");
        let target = Point::new(2, 0);
        for start in [Point::new(0, 0), Point::new(1, 1), target] {
            let result = find_path(&grid, start, target, true).unwrap();
            assert_eq!(result.status(), PathStatus::NotFound);
            assert!(result.is_empty());
            assert_eq!(result.stats(), SearchStats::default());
        }
    }

    #[test]
    fn enclosed_target_is_not_found() {
        let grid = grid(".....\n..#..\n.#.#.\n..#..\n.....");
        let result = find_path(&grid, Point::new(0, 0), Point::new(2, 2), false).unwrap();
        assert_eq!(result.status(), PathStatus::NotFound);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let grid = grid("...\n...");
        let inside = Point::new(0, 0);
        for outside in [Point::new(3, 0), Point::new(0, 2), Point::new(-1, 1)] {
            assert_eq!(
                find_path(&grid, inside, outside, true),
                Err(SearchError::OutOfBounds {
                    cell: outside,
                    width: 3,
                    height: 2
                })
            );
            assert!(find_path(&grid, outside, inside, true).is_err());
        }
    }

    #[test]
    fn heuristic_expands_no_more_than_uniform_cost() {
        let grid = grid("........\n.######.\n......#.\n.####.#.\n........");
        let start = Point::new(0, 0);
        let target = Point::new(7, 4);
        let astar = find_path(&grid, start, target, true).unwrap();
        let uniform = find_path(&grid, start, target, false).unwrap();
        assert_eq!(astar.len(), uniform.len());
        assert!(astar.stats().expanded <= uniform.stats().expanded);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let grid = grid("....#...\n.##.#.#.\n.#..#.#.\n.#.##.#.\n........");
        let pathfinder = Pathfinder::default();
        let first = pathfinder
            .find_path(&grid, Point::new(0, 0), Point::new(7, 0))
            .unwrap();
        for _ in 0..5 {
            let again = pathfinder
                .find_path(&grid, Point::new(0, 0), Point::new(7, 0))
                .unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn components_skip_hopeless_search() {
        let grid = grid("..#..\n..#..");
        let components = ComponentMap::new(&grid);
        let pathfinder = Pathfinder::default();
        let blocked = pathfinder
            .find_path_with_components(&grid, &components, Point::new(0, 0), Point::new(4, 1))
            .unwrap();
        assert_eq!(blocked.status(), PathStatus::NotFound);
        assert_eq!(blocked.stats().expanded, 0);
        let open = pathfinder
            .find_path_with_components(&grid, &components, Point::new(0, 0), Point::new(1, 1))
            .unwrap();
        assert_eq!(open.len(), 3);
    }
}
