//! BLOCKFALL - a falling-block puzzle for the terminal
//!
//! The core is [`GameEngine`]: a single-owner session that arbitrates moves,
//! rotation, locking and row clearing on a [`Grid`]. Rendering, input and the
//! gravity clock live outside the engine and only consume its state.

pub mod bag;
pub mod board;
pub mod error;
pub mod game;
pub mod input;
pub mod piece;
pub mod settings;
pub mod tetromino;
pub mod ui;
pub mod view;

pub use bag::BlockQueue;
pub use board::{Cell, Grid};
pub use error::{Error, Result};
pub use game::{Action, GameEngine, GameState};
pub use piece::PlacedBlock;
pub use tetromino::{Block, BlockKind, Position, Rotation, RotationDirection};
