use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::grid::{neumann_neighbours, Walkable};

/// 4-connected components of the walkable cells of one grid snapshot, kept in a [UnionFind]
/// structure. Must be rebuilt whenever the grid changes.
#[derive(Clone, Debug)]
pub struct ComponentMap {
    walkable: BoolGrid,
    components: UnionFind<usize>,
}

impl ComponentMap {
    /// Snapshots walkability, then links up every walkable cell with its walkable right and
    /// lower neighbours.
    pub fn new<G: Walkable>(grid: &G) -> ComponentMap {
        let w = grid.width();
        let h = grid.height();
        info!("Generating connected components for a {}x{} grid", w, h);
        let mut walkable = BoolGrid::new(w, h, false);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                walkable.set_point(point, grid.is_walkable(point));
            }
        }
        let mut components = UnionFind::new(w * h);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if !walkable.get_point(point) {
                    continue;
                }
                let ix = walkable.get_ix_point(&point);
                [Point::new(x + 1, y), Point::new(x, y + 1)]
                    .into_iter()
                    .filter(|p| walkable.point_in_bounds(*p) && walkable.get_point(*p))
                    .for_each(|p| {
                        components.union(ix, walkable.get_ix_point(&p));
                    });
            }
        }
        ComponentMap {
            walkable,
            components,
        }
    }

    /// Retrieves the component id of a walkable [Point].
    pub fn component(&self, point: &Point) -> Option<usize> {
        if self.walkable.point_in_bounds(*point) && self.walkable.get_point(*point) {
            Some(self.components.find(self.walkable.get_ix_point(point)))
        } else {
            None
        }
    }

    /// Checks if a search from `start` can reach `goal`. The start itself need not be walkable
    /// (the robot may stand anywhere), only one of its neighbours has to share the goal's
    /// component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        let goal_component = match self.component(goal) {
            Some(c) => c,
            None => return false,
        };
        if start == goal {
            return true;
        }
        self.component(start) == Some(goal_component)
            || neumann_neighbours(*start)
                .iter()
                .any(|p| self.component(p) == Some(goal_component))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}
