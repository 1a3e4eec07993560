//! Falling-block puzzle engine.
//!
//! The engine owns a fixed 20x10 [`grid::Grid`] and at most one active
//! [`piece::Piece`]. Everything is call-driven: an external driver (see
//! `main.rs`) feeds directions into [`game::Game`] and reads the board back
//! for drawing.

pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod piece;
pub mod square;
