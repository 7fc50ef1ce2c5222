//! Implementation of the chessboard, its piece movement rules and the state of
//! the game.

pub mod board;
pub mod core;
mod movegen;
pub mod position;
