//! Grid engine: board state, score, and the move/spawn/terminal operations.
//!
//! The engine owns its random source so games are reproducible from a seed:
//! ```
//! use grid_2048::engine::{Engine, Move};
//!
//! let mut a = Engine::new(7);
//! let mut b = Engine::new(7);
//! assert_eq!(a.grid(), b.grid());
//!
//! a.shift(Move::Left);
//! a.spawn_tile();
//! b.shift(Move::Left);
//! b.spawn_tile();
//! assert_eq!(a.grid(), b.grid());
//! assert_eq!(a.score(), b.score());
//! ```

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod ops;
mod state;

pub use ops::{combine, line_positions, shift_line, slide, Score, Tile, MAX_TILE, SIZE};
pub use state::{Grid, GridError, Move, Position};

/// Board and score for one game, plus the random source used for spawning.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    grid: Grid,
    score: Score,
    rng: R,
}

impl Engine<StdRng> {
    /// A freshly initialized engine driven by a seeded `StdRng`.
    pub fn new(seed: u64) -> Self {
        Engine::with_rng(StdRng::seed_from_u64(seed))
    }

    /// A freshly initialized engine seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Engine::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Engine<R> {
    /// A freshly initialized engine (two tiles, score 0) using `rng`.
    pub fn with_rng(rng: R) -> Self {
        let mut engine = Engine { grid: Grid::EMPTY, score: 0, rng };
        engine.initialize();
        engine
    }

    /// Wrap an existing grid and score without spawning anything.
    pub fn from_parts(grid: Grid, score: Score, rng: R) -> Self {
        Engine { grid, score, rng }
    }

    /// Clear the grid, zero the score and spawn the two starting tiles.
    pub fn initialize(&mut self) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.spawn_tile();
        self.spawn_tile();
    }

    /// Put a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns where the tile landed, or `None` when the grid is full.
    pub fn spawn_tile(&mut self) -> Option<Position> {
        let empty = self.grid.empty_positions();
        if empty.is_empty() {
            return None;
        }
        let pos = empty[self.rng.gen_range(0..empty.len())];
        let value = ops::spawn_value(&mut self.rng);
        self.grid[pos] = value;
        trace!("spawned {value} at ({}, {})", pos.row, pos.col);
        Some(pos)
    }

    /// Slide and merge toward `direction`, adding merged values to the score.
    ///
    /// Does not spawn; the caller decides when to call [`Engine::spawn_tile`].
    pub fn shift(&mut self, direction: Move) -> Score {
        let gained = self.grid.shift(direction);
        self.score += gained;
        gained
    }

    /// True when no move can change the grid.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }
}
