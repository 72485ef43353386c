//! The [`Pathfinder`] query facade.
//!
//! One `Pathfinder` owns an occupancy grid, the search arena reused across
//! queries, and the diagnostic counters of the most recent search. All world
//! facing queries live here; the A* engine itself is in `astar.rs`.

use navgrid_core::{Point, Vec2};

use crate::arena::SearchArena;
use crate::grid::{BLOCKED, NavGrid};
use crate::spiral::SpiralOut;

/// Pathfinding queries over a world-anchored occupancy grid.
///
/// The grid is mutated only through [`grid_mut`](Pathfinder::grid_mut)
/// (obstacle marking, clearing, window moves); every query reads it without
/// copying. Searches borrow the whole `Pathfinder` mutably, so grid writes
/// and concurrent searches are serialized by the borrow checker.
pub struct Pathfinder {
    pub(crate) grid: NavGrid,
    pub(crate) arena: SearchArena,
    pub(crate) path_cells: Vec<Point>,
    pub(crate) runs: u32,
    pub(crate) nodes_used: u32,
    pub(crate) reused: u32,
}

impl Pathfinder {
    /// Create a pathfinder over a world rectangle at `origin` with extent
    /// `size`, discretized into `cols × rows` cells (initially all blocked).
    pub fn new(origin: Vec2, size: Vec2, cols: i32, rows: i32) -> Self {
        Self {
            grid: NavGrid::new(origin, size, cols, rows),
            arena: SearchArena::default(),
            path_cells: Vec::new(),
            runs: 0,
            nodes_used: 0,
            reused: 0,
        }
    }

    /// The occupancy grid.
    #[inline]
    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Mutable access to the occupancy grid, for obstacle marking and
    /// window reconfiguration.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut NavGrid {
        &mut self.grid
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether every cell covered by an axis-aligned footprint centered at
    /// world point `center` with extent `size` is free.
    ///
    /// Uses the same covered-rectangle rule as
    /// [`NavGrid::add_obstacle`]; an empty rectangle is vacuously free.
    pub fn is_area_free(&self, center: Vec2, size: Vec2) -> bool {
        let (start, end) = self.grid.footprint(center, size);
        for i in start.x..end.x {
            for j in start.y..end.y {
                if self.grid.value(Point::new(i, j)) == BLOCKED {
                    return false;
                }
            }
        }
        true
    }

    /// Find the free cell nearest to world point `world`.
    ///
    /// Returns the point's own cell when it is free; otherwise probes
    /// outward in a square spiral, bounded by the grid area, and returns
    /// `None` if the budget runs out with every probed cell blocked.
    pub fn find_free_cell(&self, world: Vec2) -> Option<Point> {
        let cell = self.grid.to_cell(world);
        if self.grid.is_free(cell) {
            return Some(cell);
        }
        SpiralOut::new(cell, self.grid.cols() * self.grid.rows()).find(|&p| self.grid.is_free(p))
    }

    /// [`find_free_cell`](Pathfinder::find_free_cell), converted to the
    /// world-space cell center.
    pub fn find_free_position(&self, world: Vec2) -> Option<Vec2> {
        self.find_free_cell(world).map(|c| self.grid.to_world(c))
    }

    /// Find the shortest walkable route between two world points.
    ///
    /// Returns the route as world-space cell centers with the leading start
    /// point dropped (the caller already stands there), or `None` when the
    /// engine reports failure: an endpoint outside the active area, both
    /// endpoints in the same cell, or no route at all.
    pub fn find_path(&mut self, start: Vec2, end: Vec2, diagonal: bool) -> Option<Vec<Vec2>> {
        let start_cell = self.grid.to_cell(start);
        let end_cell = self.grid.to_cell(end);

        let found = self.search_astar(start_cell, end_cell, diagonal);
        log::trace!(
            "find_path {start} {start_cell} -> {end} {end_cell}: {} runs, {} nodes ({} reused), found={found}",
            self.runs,
            self.nodes_used,
            self.reused,
        );
        if !found {
            return None;
        }

        let mut path: Vec<Vec2> = self
            .path_cells
            .iter()
            .map(|&c| self.grid.to_world(c))
            .collect();
        path.remove(0);
        Some(path)
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Queue pops during the last search.
    #[inline]
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Nodes allocated during the last search.
    #[inline]
    pub fn nodes_used(&self) -> u32 {
        self.nodes_used
    }

    /// Open-node overwrites during the last search.
    #[inline]
    pub fn nodes_reused(&self) -> u32 {
        self.reused
    }

    /// Cell path of the last successful search, start through goal.
    /// Read-only view for visualization collaborators.
    #[inline]
    pub fn path_cells(&self) -> &[Point] {
        &self.path_cells
    }

    /// ASCII rendering of the grid with the last path overlaid: `.` free,
    /// `#` blocked, `S`/`E` the given endpoints, `X` path cells, `?` any
    /// other marker value.
    pub fn render(&self, start: Point, end: Point) -> String {
        let mut cells = self.grid.cells().to_vec();
        for &p in &self.path_cells {
            cells[self.grid.index(p)] = 80;
        }
        if self.grid.in_active(start) {
            cells[self.grid.index(start)] = 90;
        }
        if self.grid.in_active(end) {
            cells[self.grid.index(end)] = 99;
        }

        let mut out = String::new();
        for j in 0..self.grid.rows() {
            for i in 0..self.grid.cols() {
                out.push(match cells[self.grid.index(Point::new(i, j))] {
                    1 => '.',
                    0 => '#',
                    80 => 'X',
                    90 => 'S',
                    99 => 'E',
                    _ => '?',
                });
                if i + 1 < self.grid.cols() {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pathfinder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Only the grid is durable state; arena, counters and the last path
        // are per-search scratch.
        self.grid.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pathfinder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grid = NavGrid::deserialize(deserializer)?;
        Ok(Self {
            grid,
            arena: SearchArena::default(),
            path_cells: Vec::new(),
            runs: 0,
            nodes_used: 0,
            reused: 0,
        })
    }
}
