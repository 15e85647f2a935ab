//! The playing field: node storage, adjacency wiring, and the toggle cascade.

use derive_more::{Display, Error};

use crate::{Node, Position, node::Neighbors};

/// Errors reported while wiring the grid to its view-supplied cell sources.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The view supplied fewer cell widgets than the grid has cells.
    ///
    /// This is a contract violation of the embedding, not a recoverable
    /// runtime condition; callers are expected to fail fast on it.
    #[display("field supplies {actual} cell sources but the grid needs {expected}")]
    InsufficientCellSources {
        /// Number of cells the grid requires (size squared).
        expected: usize,
        /// Number of cell sources the view actually supplied.
        actual: usize,
    },
}

/// A square field of toggle nodes with one-hop propagation.
///
/// The grid owns every [`Node`]; neighbor links are indices into the backing
/// vector, resolved once by [`build`](Self::build) and immutable afterwards.
/// Activating a cell flips it and toggles its up-to-four orthogonal
/// neighbors exactly one hop deep.
///
/// # Examples
///
/// ```
/// use lightsout_core::{Grid, Position};
///
/// let mut grid = Grid::new(5);
/// grid.build(25).unwrap();
/// assert!(grid.is_solved());
///
/// let changed = grid.activate(Position::new(2, 2), true);
/// assert_eq!(changed.len(), 5); // the cell itself plus four neighbors
/// assert!(!grid.is_solved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u8,
    nodes: Vec<Node>,
    built: bool,
}

impl Grid {
    /// Creates an unwired grid of `size` × `size` nodes, all off.
    ///
    /// Nodes exist from this point on, but carry no neighbor links until
    /// [`build`](Self::build) runs.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    #[must_use]
    pub fn new(size: u8) -> Self {
        assert!(size > 0, "grid size must be at least 1");
        let cells = usize::from(size) * usize::from(size);
        Self {
            size,
            nodes: vec![Node::new(); cells],
            built: false,
        }
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns the total number of cells (size squared).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether [`build`](Self::build) has already wired the grid.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Wires every node with its orthogonal neighbors.
    ///
    /// `cell_source_count` is the length of the row-major cell widget
    /// sequence the view supplies; the grid consumes only its length, since
    /// adjacency derives from coordinates. Wiring happens at most once per
    /// grid lifetime: repeated calls are successful no-ops, so a game
    /// restart never re-wires the field.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InsufficientCellSources`] if the view supplies
    /// fewer cell sources than the grid has cells.
    pub fn build(&mut self, cell_source_count: usize) -> Result<(), GridError> {
        if self.built {
            return Ok(());
        }
        let expected = self.cell_count();
        if cell_source_count < expected {
            return Err(GridError::InsufficientCellSources {
                expected,
                actual: cell_source_count,
            });
        }

        let size = self.size;
        for y in 0..size {
            for x in 0..size {
                let neighbors = Neighbors {
                    next: (x + 1 < size).then(|| Self::linear(size, x + 1, y)),
                    previous: (x > 0).then(|| Self::linear(size, x - 1, y)),
                    top: (y > 0).then(|| Self::linear(size, x, y - 1)),
                    bottom: (y + 1 < size).then(|| Self::linear(size, x, y + 1)),
                };
                let index = usize::from(Self::linear(size, x, y));
                self.nodes[index].wire(neighbors);
            }
        }
        self.built = true;
        Ok(())
    }

    /// Activates the node at `pos`: sets it to `is_on`, then toggles every
    /// present neighbor exactly once.
    ///
    /// Propagation is always one hop deep and always fires, whatever the
    /// value of `is_on`. Returns the changed positions, the activated cell
    /// first, followed by its neighbors in next/previous/top/bottom order;
    /// the caller runs exactly one win recheck after the whole cascade.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn activate(&mut self, pos: Position, is_on: bool) -> Vec<Position> {
        let index = self.index_of(pos);
        self.nodes[index].set_on(is_on);

        let neighbors = self.nodes[index].neighbors();
        let mut changed = Vec::with_capacity(5);
        changed.push(pos);
        for neighbor in neighbors.present() {
            self.nodes[usize::from(neighbor)].toggle();
            changed.push(self.position_of(neighbor));
        }
        changed
    }

    /// Force-sets every node to `on` without cascading.
    ///
    /// Bulk resets must never re-trigger win checks, so this bypasses
    /// propagation entirely.
    pub fn reset_all(&mut self, on: bool) {
        for node in &mut self.nodes {
            node.reset(on);
        }
    }

    /// Returns `true` iff every node is off.
    ///
    /// Short-circuits on the first lit node.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.nodes.iter().all(|node| !node.is_on())
    }

    /// Returns the state of the node at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn node_state(&self, pos: Position) -> bool {
        self.nodes[self.index_of(pos)].is_on()
    }

    /// Returns the positions of the present neighbors of `pos`, in cascade
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn neighbor_positions(&self, pos: Position) -> Vec<Position> {
        self.nodes[self.index_of(pos)]
            .neighbors()
            .present()
            .map(|index| self.position_of(index))
            .collect()
    }

    /// Returns all positions of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    fn linear(size: u8, x: u8, y: u8) -> u16 {
        u16::from(y) * u16::from(size) + u16::from(x)
    }

    fn index_of(&self, pos: Position) -> usize {
        assert!(
            pos.x() < self.size && pos.y() < self.size,
            "position {pos} outside a {size}x{size} grid",
            size = self.size,
        );
        usize::from(Self::linear(self.size, pos.x(), pos.y()))
    }

    fn position_of(&self, index: u16) -> Position {
        let size = u16::from(self.size);
        #[expect(clippy::cast_possible_truncation)]
        let pos = Position::new((index % size) as u8, (index / size) as u8);
        pos
    }
}
