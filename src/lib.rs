//! smart-2048: a 2048 board engine + depth-limited lookahead planner
//!
//! This crate provides:
//! - A `Copy` [`engine::Board`] type with the pure transition functions
//!   (`apply`, `with_random_tile`, `make_move`, `is_terminal`, ...)
//! - A lookahead move planner (`planner` module) with single-threaded and
//!   parallel variants, scoring candidate moves by simulating a few turns
//!   ahead and picking the one that least degrades the position
//! - Snapshot I/O for presentation layers (`snapshot` module)
//!
//! Quick start:
//! ```
//! use smart_2048::engine::{Board, Move};
//! use smart_2048::planner::Planner;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//!
//! // Advise and play a couple of moves
//! let mut planner = Planner::new();
//! let mut moves = 0u32;
//! while !board.is_terminal() && moves < 4 {
//!     let dir = planner.best_move(board);
//!     let (_, moved) = board.apply(dir);
//!     assert!(moved);
//!     board = board.make_move(dir, &mut rng);
//!     moves += 1;
//! }
//! assert!(moves > 0);
//! ```
//!
//! The live game loop owns all rendering, input and timing; it calls exactly
//! three things here: `Board::apply` (or `engine::apply`), a spawn function
//! (`engine::spawn_random_tile` / `Board::with_random_tile`) after every
//! effective move, and `planner::next_move` (or a configured `Planner`) for
//! advice.

pub mod engine;
pub mod planner;
pub mod snapshot;
