//! **navgrid-core** — Grid-based navigation subsystem (core geometry types).
//!
//! This crate provides the two coordinate types shared across the *navgrid*
//! ecosystem: integer cell coordinates ([`Point`]) addressing cells of an
//! occupancy grid, and float world coordinates ([`Vec2`]) for the continuous
//! space the grid discretizes.

pub mod geom;

pub use geom::{Point, Vec2};
