//! Outward square-spiral cell enumeration.

use navgrid_core::Point;

/// A lazy square spiral walking outward from a starting cell.
///
/// The first yielded cell is one step to the right of the start; the walk
/// then turns counter-clockwise, its run length growing by one every second
/// turn, so each Chebyshev ring around the start is visited completely
/// before the next one begins. Yields at most `max + 1` cells, then `None`
/// forever. Single-use: construct a new one to restart.
///
/// Cells are plain offsets — nothing here knows about grid bounds or
/// occupancy, so callers must filter what they consume.
pub struct SpiralOut {
    cur: Point,
    max: i32,
    run: i32,
    turns: i32,
    step: i32,
    count: i32,
    dx: i32,
    dy: i32,
}

impl SpiralOut {
    /// Start a spiral at `start` with a budget of `max` steps.
    pub fn new(start: Point, max: i32) -> Self {
        Self {
            cur: start,
            max,
            run: 1,
            turns: 0,
            step: 0,
            count: 0,
            dx: 1,
            dy: 0,
        }
    }
}

impl Iterator for SpiralOut {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.count > self.max {
            return None;
        }
        self.cur = self.cur.shift(self.dx, self.dy);
        self.count += 1;

        self.step += 1;
        if self.step > self.run - 1 {
            // Turn: swap the deltas and negate the new dy.
            std::mem::swap(&mut self.dx, &mut self.dy);
            self.dy = -self.dy;
            self.turns += 1;
            if self.turns > 1 {
                self.run += 1;
                self.turns = 0;
            }
            self.step = 0;
        }

        Some(self.cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ring_in_walk_order() {
        let cells: Vec<Point> = SpiralOut::new(Point::ZERO, 7).collect();
        assert_eq!(
            cells,
            vec![
                Point::new(1, 0),
                Point::new(1, -1),
                Point::new(0, -1),
                Point::new(-1, -1),
                Point::new(-1, 0),
                Point::new(-1, 1),
                Point::new(0, 1),
                Point::new(1, 1),
            ]
        );
    }

    #[test]
    fn budget_yields_max_plus_one() {
        assert_eq!(SpiralOut::new(Point::ZERO, 0).count(), 1);
        assert_eq!(SpiralOut::new(Point::ZERO, 24).count(), 25);
    }

    #[test]
    fn exhausted_spiral_stays_exhausted() {
        let mut sp = SpiralOut::new(Point::new(3, 3), 2);
        assert!(sp.next().is_some());
        assert!(sp.next().is_some());
        assert!(sp.next().is_some());
        assert!(sp.next().is_none());
        assert!(sp.next().is_none());
    }

    #[test]
    fn rings_complete_in_chebyshev_order() {
        // The walk never returns to an inner ring, and ring k (8k cells) is
        // complete after 4k(k+1) total steps.
        let start = Point::new(10, 10);
        let mut prev = 0;
        let mut steps = 0;
        for p in SpiralOut::new(start, 79) {
            let d = p.chebyshev(start);
            assert!(d >= 1, "start cell must not be yielded");
            assert!(d >= prev, "cell {p} fell back to an inner ring");
            prev = d;
            steps += 1;
            for k in 1..=4 {
                if steps == 4 * k * (k + 1) {
                    assert_eq!(d, k, "ring {k} should end at step {steps}");
                }
            }
        }
        // Budget 79 = exactly rings 1..=4 (8 + 16 + 24 + 32 cells).
        assert_eq!(steps, 80);
        assert_eq!(prev, 4);
    }

    #[test]
    fn ring_one_covers_all_eight_neighbors() {
        let start = Point::new(5, 5);
        let first8: Vec<Point> = SpiralOut::new(start, 7).collect();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let p = start.shift(dx, dy);
                assert!(first8.contains(&p), "missing neighbor {p}");
            }
        }
    }
}
