//! Grid cell coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on the playing field.
///
/// `x` is the column (0-based, left to right) and `y` is the row (0-based,
/// top to bottom). Positions are plain coordinates; whether a position lies
/// inside a particular grid is decided by the [`Grid`](crate::Grid) that owns
/// the cells.
///
/// # Examples
///
/// ```
/// use lightsout_core::Position;
///
/// let pos = Position::new(2, 4);
/// assert_eq!(pos.x(), 2);
/// assert_eq!(pos.y(), 4);
/// assert_eq!(pos.to_string(), "(2, 4)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position from a column (`x`) and row (`y`) coordinate.
    #[must_use]
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the column coordinate (0-based).
    #[must_use]
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row coordinate (0-based).
    #[must_use]
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
