//! Occupancy-grid pathfinding for world-space games.
//!
//! This crate discretizes a continuous world rectangle into an occupancy
//! grid and answers two query classes over it: *is this area free* and
//! *what is the shortest walkable route between two points*.
//!
//! - [`NavGrid`] owns the occupancy array and the world ↔ cell coordinate
//!   transforms; obstacle geometry is marked with
//!   [`NavGrid::add_obstacle`].
//! - [`Pathfinder`] composes the grid with an A* engine
//!   ([`Pathfinder::search_astar`]) whose node arena is reused across
//!   queries, so per-frame repeated searches stop allocating after warm-up.
//! - [`SpiralOut`] enumerates cells in an outward square spiral, used by
//!   [`Pathfinder::find_free_cell`] to recover when a query point lands on
//!   a blocked cell.
//!
//! Failed queries ("no path", endpoint outside the active window, start and
//! goal in the same cell) are ordinary `None`/`false` results, never errors.

mod arena;
mod astar;
mod grid;
mod pathfinder;
mod spiral;

pub use grid::{BLOCKED, FREE, NavGrid};
pub use pathfinder::Pathfinder;
pub use spiral::SpiralOut;
