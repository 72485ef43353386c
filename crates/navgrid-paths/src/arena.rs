//! Search-node arena and open/closed bookkeeping.
//!
//! Nodes live in a per-search arena and refer to their parents by arena
//! slot, never by pointer. [`SearchArena::reset`] empties every container
//! while keeping its capacity, so repeated searches on the same
//! [`Pathfinder`](crate::Pathfinder) stop allocating once warmed up, and a
//! search never has to free nodes on its exit paths one by one.

use std::collections::{BinaryHeap, HashMap, HashSet};

use navgrid_core::Point;

/// Parent slot of a root node.
pub(crate) const NO_PARENT: u32 = u32::MAX;

/// One A* search node. `g` is the accumulated cost from the start, `h` the
/// heuristic estimate to the goal, `f = g + h` the queue priority.
#[derive(Clone, Copy)]
pub(crate) struct Node {
    pub(crate) cell: Point,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: u32,
}

/// Heap entry referencing an arena slot, ordered by `f` for `BinaryHeap`.
///
/// `f` is captured at push time: updating an open node pushes a fresh entry
/// and leaves the stale one in place, to be discarded at pop time via the
/// closed set.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct HeapEntry {
    pub(crate) slot: u32,
    pub(crate) f: i32,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Arena plus the open/closed sets of one search run.
///
/// `open` maps a flat cell index to the arena slot currently holding that
/// cell's best-known node; `closed` holds cell indices whose cost is final.
/// A cell index is in at most one of the two, except transiently while an
/// updated open node waits in the heap behind its stale entry.
#[derive(Default)]
pub(crate) struct SearchArena {
    nodes: Vec<Node>,
    pub(crate) open: HashMap<usize, u32>,
    pub(crate) closed: HashSet<usize>,
    pub(crate) heap: BinaryHeap<HeapEntry>,
}

impl SearchArena {
    /// Empty all containers, retaining capacity.
    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.heap.clear();
    }

    /// Allocate a node and return its slot.
    pub(crate) fn alloc(&mut self, cell: Point, g: i32, h: i32, f: i32, parent: u32) -> u32 {
        let slot = self.nodes.len() as u32;
        self.nodes.push(Node {
            cell,
            g,
            h,
            f,
            parent,
        });
        slot
    }

    #[inline]
    pub(crate) fn node(&self, slot: u32) -> &Node {
        &self.nodes[slot as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, slot: u32) -> &mut Node {
        &mut self.nodes[slot as usize]
    }

    /// Number of nodes allocated since the last reset.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
