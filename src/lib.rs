//! grid-2048: a sliding-tile merge puzzle engine
//!
//! This crate provides:
//! - A 4x4 `Grid` with slide/merge moves and terminal detection (`engine` module)
//! - An `Engine` owning grid, score and a seedable random source for tile spawns
//! - A `Session` state machine (Active/Terminal) for front ends (`session` module)
//! - Text command parsing for the terminal front end (`input` module)
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Engine, Move};
//! use grid_2048::session::{Session, SpawnRule};
//!
//! // Deterministic game from a seed
//! let mut session = Session::new(Engine::new(42), SpawnRule::Always);
//! let mut moves = 0u32;
//! while !session.is_over() && moves < 8 {
//!     session.play(Move::ALL[moves as usize % 4]);
//!     moves += 1;
//! }
//! println!("{}", session.engine().grid());
//! let _score = session.engine().score();
//! ```
//!
//! Lower level, without the session bookkeeping:
//! ```
//! use grid_2048::engine::{Engine, Grid, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let mut engine = Engine::from_parts(grid, 0, StdRng::seed_from_u64(1));
//! assert_eq!(engine.shift(Move::Left), 4);
//! assert_eq!(engine.grid().rows()[0], [4, 0, 0, 0]);
//! assert!(engine.spawn_tile().is_some());
//! ```
//!
pub mod engine;
pub mod input;
pub mod session;
