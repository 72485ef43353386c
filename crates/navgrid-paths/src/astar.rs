//! A* search over the occupancy grid.
//!
//! The engine keeps two deliberate quirks of long standing, documented here
//! so nobody "fixes" them in passing:
//!
//! - The heuristic is the **squared** Euclidean distance in cell units, and
//!   every step costs 1 whether orthogonal or diagonal. Squared distance is
//!   not admissible in the classical sense, and the combination makes the
//!   search prefer diagonal routes over orthogonal routes of equal true
//!   length. Query results depend on this.
//! - Relaxing a cell that is already open **overwrites** its node without
//!   comparing costs and pushes a fresh heap entry. Stale entries stay in
//!   the heap and are discarded at pop time via the closed set; the
//!   `nodes_reused` counter tracks how often this happens.

use navgrid_core::Point;

use crate::Pathfinder;
use crate::arena::{HeapEntry, NO_PARENT};
use crate::grid::BLOCKED;

impl Pathfinder {
    /// Run A* from cell `start` to cell `goal`.
    ///
    /// On success the cell path (start through goal inclusive) is left in
    /// [`path_cells`](Pathfinder::path_cells). Fails, without treating it as
    /// an error, when either endpoint is outside the active area, when
    /// `start == goal` (a query for "where you already are" is refused by
    /// policy), or when the grid offers no route.
    pub fn search_astar(&mut self, start: Point, goal: Point, diagonal: bool) -> bool {
        self.runs = 0;
        self.reused = 0;
        self.nodes_used = 0;
        self.path_cells.clear();

        if !self.grid.in_active(start) || !self.grid.in_active(goal) {
            return false;
        }
        if start == goal {
            return false;
        }

        self.arena.reset();

        let goal_idx = self.grid.index(goal);

        let slot = self.arena.alloc(start, 0, 0, 0, NO_PARENT);
        self.arena.open.insert(self.grid.index(start), slot);
        self.arena.heap.push(HeapEntry {
            slot,
            f: self.arena.node(slot).f,
        });

        let mut found = false;
        while let Some(entry) = self.arena.heap.pop() {
            self.runs += 1;

            let cur = entry.slot;
            let cur_cell = self.arena.node(cur).cell;
            let cur_idx = self.grid.index(cur_cell);

            // Stale duplicate from an overwritten open node.
            if self.arena.closed.contains(&cur_idx) {
                continue;
            }
            self.arena.closed.insert(cur_idx);

            if cur_idx == goal_idx {
                let mut slot = cur;
                while slot != NO_PARENT {
                    self.path_cells.push(self.arena.node(slot).cell);
                    slot = self.arena.node(slot).parent;
                }
                self.path_cells.reverse();
                found = true;
                break;
            }

            let cur_g = self.arena.node(cur).g;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if !self.admissible_step(cur_cell, dx, dy, diagonal) {
                        continue;
                    }
                    let next = cur_cell.shift(dx, dy);
                    let next_idx = self.grid.index(next);
                    if self.arena.closed.contains(&next_idx) {
                        continue;
                    }

                    let g = cur_g + 1;
                    let d = goal - next;
                    let h = d.x * d.x + d.y * d.y;
                    let f = g + h;

                    match self.arena.open.get(&next_idx).copied() {
                        None => {
                            let s = self.arena.alloc(next, g, h, f, cur);
                            self.arena.open.insert(next_idx, s);
                            self.arena.heap.push(HeapEntry { slot: s, f });
                        }
                        Some(s) => {
                            let n = self.arena.node_mut(s);
                            n.g = g;
                            n.h = h;
                            n.f = n.g + n.h;
                            n.parent = cur;
                            let f = n.f;
                            self.arena.heap.push(HeapEntry { slot: s, f });
                            self.reused += 1;
                        }
                    }
                }
            }
        }

        self.nodes_used = self.arena.len() as u32;
        found
    }

    /// Whether stepping by `(dx, dy)` from `from` is allowed.
    ///
    /// The target cell must be free. Diagonal steps are rejected outright
    /// when `diagonal` is off, and otherwise rejected when either of the two
    /// orthogonally adjacent corner cells is blocked, so a route never cuts
    /// through a blocked corner.
    fn admissible_step(&self, from: Point, dx: i32, dy: i32, diagonal: bool) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        if !self.grid.is_free(from.shift(dx, dy)) {
            return false;
        }
        if dx.abs() != dy.abs() {
            return true;
        }
        if !diagonal {
            return false;
        }

        let corner = Point::new(from.x, from.y + dy);
        if self.grid.in_active(corner) && self.grid.value(corner) == BLOCKED {
            return false;
        }
        let corner = Point::new(from.x + dx, from.y);
        if self.grid.in_active(corner) && self.grid.value(corner) == BLOCKED {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FREE;
    use navgrid_core::Vec2;

    /// 5x5 cells over a 5x5 world, all free: cell size 1, origin 0.
    fn open5() -> Pathfinder {
        let mut pf = Pathfinder::new(Vec2::ZERO, Vec2::splat(5.0), 5, 5);
        pf.grid_mut().clear();
        pf
    }

    fn step_is_orthogonal(a: Point, b: Point) -> bool {
        let d = b - a;
        (d.x.abs() + d.y.abs()) == 1
    }

    #[test]
    fn diagonal_crossing_of_open_grid() {
        let mut pf = open5();
        assert!(pf.search_astar(Point::ZERO, Point::new(4, 4), true));
        // One diagonal step per row/col advance.
        assert_eq!(pf.path_cells().len(), 5);
        assert_eq!(pf.path_cells()[0], Point::ZERO);
        assert_eq!(pf.path_cells()[4], Point::new(4, 4));
        assert!(pf.runs() <= 25);
        assert!(pf.nodes_used() > 0);
    }

    #[test]
    fn orthogonal_only_without_diagonal() {
        let mut pf = open5();
        assert!(pf.search_astar(Point::ZERO, Point::new(4, 4), false));
        let path = pf.path_cells().to_vec();
        // Manhattan distance 8 means 9 cells.
        assert_eq!(path.len(), 9);
        for w in path.windows(2) {
            assert!(
                step_is_orthogonal(w[0], w[1]),
                "diagonal step {} -> {}",
                w[0],
                w[1]
            );
        }
    }

    #[test]
    fn start_equals_goal_fails() {
        let mut pf = open5();
        assert!(!pf.search_astar(Point::new(2, 2), Point::new(2, 2), true));
        assert!(pf.path_cells().is_empty());
    }

    #[test]
    fn endpoints_outside_active_area_fail() {
        let mut pf = open5();
        assert!(!pf.search_astar(Point::new(-1, 0), Point::new(4, 4), true));
        assert!(!pf.search_astar(Point::ZERO, Point::new(5, 0), true));
        pf.grid_mut().set_active_area(3, 3);
        assert!(!pf.search_astar(Point::ZERO, Point::new(4, 4), true));
        // No allocation happens on early rejection.
        assert_eq!(pf.nodes_used(), 0);
    }

    #[test]
    fn detour_around_almost_full_wall() {
        let mut pf = open5();
        // Column x = 2 blocked except at the top; the only crossing is at
        // y = 0, forcing a route far longer than the Manhattan distance (4).
        for y in 1..5 {
            pf.grid_mut().set_value(Point::new(2, y), BLOCKED);
        }
        assert!(pf.search_astar(Point::new(0, 4), Point::new(4, 4), false));
        let path = pf.path_cells().to_vec();
        assert!(path.len() > 9, "expected a detour, got {} cells", path.len());
        for w in path.windows(2) {
            assert!(step_is_orthogonal(w[0], w[1]));
        }
        for &p in &path {
            assert_ne!(pf.grid().value(p), BLOCKED, "blocked cell {p} in path");
        }
    }

    #[test]
    fn full_wall_exhausts_and_fails() {
        let mut pf = open5();
        for y in 0..5 {
            pf.grid_mut().set_value(Point::new(2, y), BLOCKED);
        }
        assert!(!pf.search_astar(Point::ZERO, Point::new(4, 4), true));
        // The whole left half was explored before giving up.
        assert!(pf.runs() > 0);
        assert!(pf.nodes_used() > 0);
        assert!(pf.path_cells().is_empty());
    }

    #[test]
    fn corner_cutting_is_rejected() {
        // 2x2 grid, diagonal from (0,0) to (1,1); both corners blocked.
        let mut pf = Pathfinder::new(Vec2::ZERO, Vec2::splat(2.0), 2, 2);
        pf.grid_mut().clear();
        pf.grid_mut().set_value(Point::new(1, 0), BLOCKED);
        pf.grid_mut().set_value(Point::new(0, 1), BLOCKED);
        assert!(!pf.search_astar(Point::ZERO, Point::new(1, 1), true));

        // A single blocked corner vetoes the diagonal too.
        pf.grid_mut().clear();
        pf.grid_mut().set_value(Point::new(1, 0), BLOCKED);
        assert!(pf.search_astar(Point::ZERO, Point::new(1, 1), true));
        assert_eq!(
            pf.path_cells(),
            &[Point::ZERO, Point::new(0, 1), Point::new(1, 1)]
        );

        // With both corners free the diagonal goes straight through.
        pf.grid_mut().clear();
        assert!(pf.search_astar(Point::ZERO, Point::new(1, 1), true));
        assert_eq!(pf.path_cells(), &[Point::ZERO, Point::new(1, 1)]);
    }

    #[test]
    fn corner_rule_checks_both_sides_independently() {
        // 3x3, going (0,1) -> (1,0) with (1,1) blocked: the diagonal
        // (1,0)<->(0,1) square has corners (1,1) and (0,0).
        let mut pf = Pathfinder::new(Vec2::ZERO, Vec2::splat(3.0), 3, 3);
        pf.grid_mut().clear();
        pf.grid_mut().set_value(Point::new(1, 1), BLOCKED);
        assert!(pf.search_astar(Point::new(0, 1), Point::new(1, 0), true));
        // Must route through (0,0), not diagonally past the blocked corner.
        assert_eq!(
            pf.path_cells(),
            &[Point::new(0, 1), Point::ZERO, Point::new(1, 0)]
        );
    }

    #[test]
    fn reopened_nodes_are_counted() {
        let mut pf = open5();
        assert!(pf.search_astar(Point::ZERO, Point::new(4, 4), true));
        // Open-grid diagonal searches relax already-open cells repeatedly;
        // the overwrite-on-reopen policy records each occurrence.
        assert!(pf.nodes_reused() > 0);
    }

    #[test]
    fn non_blocked_markers_are_walkable() {
        let mut pf = open5();
        // Visualization markers (anything non-zero) do not block movement.
        pf.grid_mut().set_value(Point::new(1, 0), 80);
        pf.grid_mut().set_value(Point::new(2, 0), 99);
        assert!(pf.search_astar(Point::ZERO, Point::new(4, 0), false));
        assert_eq!(pf.path_cells().len(), 5);
        assert_eq!(pf.grid().value(Point::new(3, 0)), FREE);
    }

    #[test]
    fn counters_reset_between_searches() {
        let mut pf = open5();
        assert!(pf.search_astar(Point::ZERO, Point::new(4, 4), true));
        let first_used = pf.nodes_used();
        assert!(pf.search_astar(Point::ZERO, Point::new(1, 0), true));
        assert!(pf.nodes_used() < first_used);
        assert!(pf.runs() >= 1);
    }
}
