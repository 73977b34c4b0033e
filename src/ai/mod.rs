pub mod greedy;

pub use greedy::{GreedySelector, choose_greedy};

use crate::board::{Board, LegalMoveMap};
use crate::types::{Player, Position};

/// Picks the computer's move from the legal moves of the side to move.
pub trait MoveSelector {
    /// Caller contract: `moves` is `board.legal_moves(player)`.
    /// Returns `None` only when `moves` is empty.
    fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        moves: &LegalMoveMap,
    ) -> Option<Position>;
}
