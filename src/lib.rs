//! Othello against a greedy computer opponent.
//!
//! - [`board`]: board state, legal moves with their flips, move application.
//! - [`ai`]: move selection for the computer.
//! - [`game`]: the turn and pass state machine.
//! - [`frontend`]: the `Renderer`/`InputSource` seam with console and canvas
//!   adapters; [`wasm`] exports the canvas one to the browser.
use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod frontend;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::{Board, FlipSet, LegalMoveMap, init_board};
pub use error::GameError;
pub use game::{Session, Turn, TurnState};
pub use types::{Player, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
