//! Riddle generation for the Lights-Out playing field.
//!
//! A riddle is produced by simulating player presses: each step picks a
//! uniformly random cell and activates it with the regular one-hop cascade.
//! Because every scramble step is a legal move, every generated riddle is
//! solvable by construction — replaying the same picks unwinds the scramble.
//!
//! Generation is reproducible: every riddle records the RNG seed it was
//! produced from, and [`RiddleGenerator::generate_with_seed`] replays it.
//!
//! Repeated or mutually canceling picks can leave the field trivial or even
//! already solved. That fairness gap is deliberate and preserved; the
//! generator never re-rolls to guarantee a non-trivial riddle.
//!
//! # Examples
//!
//! ```
//! use lightsout_core::Grid;
//! use lightsout_generator::RiddleGenerator;
//!
//! let mut grid = Grid::new(5);
//! grid.build(25).unwrap();
//!
//! let generator = RiddleGenerator::new(3);
//! let riddle = generator.generate(&mut grid);
//! assert_eq!(riddle.picks.len(), 3);
//! ```

use lightsout_core::{Grid, Position};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A generated riddle: the seed it came from and the cells that were pressed.
///
/// The picks double as a reference solution: pressing each recorded cell once
/// more (in any order) returns the field to the all-off state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRiddle {
    /// Seed of the random stream that produced the scramble.
    pub seed: u64,
    /// The pressed cells, in scramble order.
    pub picks: Vec<Position>,
}

/// Scrambles a grid by simulating a fixed number of random presses.
///
/// The difficulty is the number of simulated presses, not a guaranteed
/// distance from the solved state.
///
/// # Examples
///
/// ```
/// use lightsout_core::Grid;
/// use lightsout_generator::RiddleGenerator;
///
/// let mut grid = Grid::new(5);
/// grid.build(25).unwrap();
///
/// let generator = RiddleGenerator::new(3);
/// let riddle = generator.generate_with_seed(&mut grid, 7);
///
/// // The same seed scrambles a fresh grid identically.
/// let mut again = Grid::new(5);
/// again.build(25).unwrap();
/// let replay = generator.generate_with_seed(&mut again, 7);
/// assert_eq!(riddle, replay);
/// assert_eq!(grid, again);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiddleGenerator {
    difficulty: u32,
}

impl RiddleGenerator {
    /// Creates a generator performing `difficulty` scramble presses.
    #[must_use]
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    /// Returns the number of scramble presses per riddle.
    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Scrambles `grid` with a freshly drawn seed.
    pub fn generate(&self, grid: &mut Grid) -> GeneratedRiddle {
        let seed = rand::rng().random();
        self.generate_with_seed(grid, seed)
    }

    /// Scrambles `grid` deterministically from `seed`.
    pub fn generate_with_seed(&self, grid: &mut Grid, seed: u64) -> GeneratedRiddle {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let picks = self.scramble_with_rng(grid, &mut rng);
        GeneratedRiddle { seed, picks }
    }

    /// Scrambles `grid` using an arbitrary random source.
    ///
    /// Each step draws an `x` then a `y` coordinate uniformly, then activates
    /// that cell with the inverse of its current state, cascading to its
    /// neighbors like a real press would. Returns the pressed cells in order.
    pub fn scramble_with_rng<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Vec<Position> {
        let size = grid.size();
        let mut picks = Vec::new();
        for _ in 0..self.difficulty {
            let x = rng.random_range(0..size);
            let y = rng.random_range(0..size);
            let pos = Position::new(x, y);
            grid.activate(pos, !grid.node_state(pos));
            picks.push(pos);
        }
        picks
    }
}
