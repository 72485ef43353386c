//! The [`NavGrid`] occupancy model.
//!
//! A `NavGrid` discretizes a world-space rectangle into `cols × rows` cells
//! and stores one occupancy value per cell. It owns the affine map between
//! world coordinates and cell indices; it has no search logic of its own.
//!
//! Out-of-range reads return [`BLOCKED`] and out-of-range writes are no-ops,
//! so adjacency checks at the grid edge behave as if the grid were surrounded
//! by walls, with no special-casing in the callers.

use navgrid_core::{Point, Vec2};

/// Occupancy value of a blocked cell. Also returned for out-of-range reads.
pub const BLOCKED: i32 = 0;

/// Occupancy value of a free (walkable) cell.
///
/// Any non-[`BLOCKED`] value is treated as walkable; values other than
/// `FREE` are reserved for callers (e.g. visualization markers).
pub const FREE: i32 = 1;

/// A world-anchored occupancy grid.
///
/// The *active area* is a sub-rectangle `[0, active_cols) × [0, active_rows)`
/// bounding every read, write and search; it can be shrunk or the world
/// origin moved without reallocating the backing array, letting a caller
/// slide a fixed-size window over a larger conceptual world.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavGrid {
    origin: Vec2,
    size: Vec2,
    cols: i32,
    rows: i32,
    active_cols: i32,
    active_rows: i32,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<i32>,
}

impl NavGrid {
    /// Create a grid covering the world rectangle at `origin` with extent
    /// `size`, split into `cols × rows` cells. All cells start [`BLOCKED`];
    /// call [`clear`](NavGrid::clear) to mark everything walkable.
    pub fn new(origin: Vec2, size: Vec2, cols: i32, rows: i32) -> Self {
        assert!(cols > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            origin,
            size,
            cols,
            rows,
            active_cols: cols,
            active_rows: rows,
            cell_width: size.x / cols as f32,
            cell_height: size.y / rows as f32,
            cells: vec![BLOCKED; (cols * rows) as usize],
        }
    }

    // -----------------------------------------------------------------------
    // Occupancy access
    // -----------------------------------------------------------------------

    /// Mark every cell [`FREE`].
    pub fn clear(&mut self) {
        self.cells.fill(FREE);
    }

    /// Replace the entire occupancy array.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != cols * rows`.
    pub fn set_cells(&mut self, values: &[i32]) {
        assert_eq!(
            values.len(),
            (self.cols * self.rows) as usize,
            "occupancy array length must match grid dimensions"
        );
        self.cells.copy_from_slice(values);
    }

    /// Read the occupancy value at cell `p`.
    ///
    /// Returns [`BLOCKED`] if `p` is outside the active area.
    #[inline]
    pub fn value(&self, p: Point) -> i32 {
        if !self.in_active(p) {
            return BLOCKED;
        }
        self.cells[self.index(p)]
    }

    /// Read the occupancy value at the cell containing world point `world`.
    #[inline]
    pub fn value_at(&self, world: Vec2) -> i32 {
        self.value(self.to_cell(world))
    }

    /// Set the occupancy value at cell `p`. No-op if `p` is outside the
    /// active area.
    #[inline]
    pub fn set_value(&mut self, p: Point, v: i32) {
        if !self.in_active(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = v;
    }

    /// Whether cell `p` is inside the active area and walkable.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.in_active(p) && self.cells[self.index(p)] != BLOCKED
    }

    /// Whether cell `p` lies inside the active area.
    #[inline]
    pub fn in_active(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.active_cols && p.y >= 0 && p.y < self.active_rows
    }

    /// Block every cell covered by an axis-aligned obstacle centered at the
    /// world point `center` with extent `size`.
    ///
    /// The covered rectangle takes the floor of the low corner and the
    /// ceiling of the high corner, so any partial overlap blocks the whole
    /// cell. Re-adding the same obstacle is idempotent.
    pub fn add_obstacle(&mut self, center: Vec2, size: Vec2) {
        let (start, end) = self.footprint(center, size);
        for i in start.x..end.x {
            for j in start.y..end.y {
                self.set_value(Point::new(i, j), BLOCKED);
            }
        }
    }

    /// Cell rectangle `[start, end)` covered by an axis-aligned footprint
    /// centered at world point `center` with extent `size`.
    pub(crate) fn footprint(&self, center: Vec2, size: Vec2) -> (Point, Point) {
        let top_left = center - self.origin - size / 2.0;
        let start = Point::new(
            (top_left.x / self.cell_width).floor() as i32,
            (top_left.y / self.cell_height).floor() as i32,
        );
        let end = Point::new(
            ((top_left.x + size.x) / self.cell_width).ceil() as i32,
            ((top_left.y + size.y) / self.cell_height).ceil() as i32,
        );
        (start, end)
    }

    // -----------------------------------------------------------------------
    // Coordinate transforms
    // -----------------------------------------------------------------------

    /// Cell containing the world point `world`.
    #[inline]
    pub fn to_cell(&self, world: Vec2) -> Point {
        self.to_local_cell(world - self.origin)
    }

    /// Cell containing the grid-local point `local` (origin already removed).
    #[inline]
    pub fn to_local_cell(&self, local: Vec2) -> Point {
        Point::new(
            (local.x / self.cell_width).floor() as i32,
            (local.y / self.cell_height).floor() as i32,
        )
    }

    /// World-space **center** of cell `p`.
    #[inline]
    pub fn to_world(&self, p: Point) -> Vec2 {
        self.origin + self.to_local_world(p)
    }

    /// Grid-local center of cell `p`.
    #[inline]
    pub fn to_local_world(&self, p: Point) -> Vec2 {
        Vec2::new(
            p.x as f32 * self.cell_width + self.cell_width / 2.0,
            p.y as f32 * self.cell_height + self.cell_height / 2.0,
        )
    }

    // -----------------------------------------------------------------------
    // Reconfiguration
    // -----------------------------------------------------------------------

    /// Shrink (or restore) the active area without reallocating.
    ///
    /// Values are clamped to the allocated dimensions.
    pub fn set_active_area(&mut self, cols: i32, rows: i32) {
        self.active_cols = cols.clamp(0, self.cols);
        self.active_rows = rows.clamp(0, self.rows);
    }

    /// Move the grid's world-space origin. Occupancy is left untouched.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Flat index of cell `p`. `p` must be inside the allocated grid.
    #[inline]
    pub fn index(&self, p: Point) -> usize {
        (p.x + self.cols * p.y) as usize
    }

    /// Allocated column count.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Allocated row count.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Active (searchable) column count.
    #[inline]
    pub fn active_cols(&self) -> i32 {
        self.active_cols
    }

    /// Active (searchable) row count.
    #[inline]
    pub fn active_rows(&self) -> i32 {
        self.active_rows
    }

    /// World-space origin.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World-space extent.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Physical width of one cell.
    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Physical height of one cell.
    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Raw occupancy values, row index `i + cols * j`. Read-only view for
    /// visualization collaborators.
    #[inline]
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }
}
