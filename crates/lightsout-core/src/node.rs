//! A single cell of the playing field.

/// Handles to the up-to-four orthogonal neighbors of a node.
///
/// Each handle is an index into the owning grid's backing vector; the grid is
/// the sole owner of every node, so these are non-owning back-references.
/// Absent handles mark grid edges and corners.
///
/// The field order (`next`, `previous`, `top`, `bottom`) is also the cascade
/// order used by [`Grid::activate`](crate::Grid::activate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// The cell one column to the right, if any.
    pub next: Option<u16>,
    /// The cell one column to the left, if any.
    pub previous: Option<u16>,
    /// The cell one row up, if any.
    pub top: Option<u16>,
    /// The cell one row down, if any.
    pub bottom: Option<u16>,
}

impl Neighbors {
    /// Returns the present neighbor handles in cascade order.
    pub fn present(self) -> impl Iterator<Item = u16> {
        [self.next, self.previous, self.top, self.bottom]
            .into_iter()
            .flatten()
    }

    /// Returns how many neighbors are present.
    #[must_use]
    pub fn count(self) -> usize {
        self.present().count()
    }
}

/// One grid cell with a binary on/off state.
///
/// A node never cascades by itself: the one-hop propagation to its neighbors
/// is driven by [`Grid::activate`](crate::Grid::activate), which has access
/// to the backing storage the neighbor handles point into. Neighbor wiring is
/// injected exactly once, during [`Grid::build`](crate::Grid::build), and is
/// immutable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    on: bool,
    neighbors: Neighbors,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn wire(&mut self, neighbors: Neighbors) {
        self.neighbors = neighbors;
    }

    pub(crate) fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Flips the state unconditionally.
    ///
    /// Called on a node that neighbors the activated one; it never cascades
    /// further and never triggers a win recheck.
    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    /// Force-sets the state without cascading.
    ///
    /// Used for bulk resets; deliberately bypasses propagation so that a
    /// reset can never re-trigger win checks.
    pub fn reset(&mut self, on: bool) {
        self.on = on;
    }

    /// Returns the current state.
    #[must_use]
    pub fn is_on(self) -> bool {
        self.on
    }

    /// Returns the neighbor handles of this node.
    #[must_use]
    pub fn neighbors(self) -> Neighbors {
        self.neighbors
    }
}
