//! slide-2048: a 2048 game engine with a terminal frontend
//!
//! This crate provides:
//! - A 4x4 `Board` with checked cell access and structural queries (`engine::state`)
//! - The slide/merge transformation with a changed flag (`engine::ops`)
//! - A seedable tile source for spawning 2s and 4s (`engine::TileSpawner`)
//! - A turn controller tracking status and final score (`game::Game`)
//! - A line-based terminal frontend kept outside the core (`ui`)
//!
//! Quick start:
//! ```
//! use slide_2048::engine::{Board, Move};
//! use slide_2048::game::{Game, GameStatus};
//!
//! // Deterministic game with a seeded tile source
//! let mut game = Game::new(42);
//! let res = game.submit_move(Move::Left);
//! assert_eq!(res.status, GameStatus::InProgress);
//!
//! // The engine is usable on its own
//! let b = Board::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
//! assert_eq!(b.shift(Move::Left).rows()[0], [4, 4, 0, 0]);
//! ```
//!
pub mod engine;
pub mod error;
pub mod game;
pub mod ui;

pub use error::GameError;
