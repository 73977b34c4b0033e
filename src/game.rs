use tracing::{debug, info, instrument};
use web_time::Instant;

use crate::ai::MoveSelector;
use crate::board::{Board, FlipSet, LegalMoveMap};
use crate::error::GameError;
use crate::types::{GameResult, GameState, Player, Position};

/// Where the game stands between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    BlackToMove,
    WhiteToMove,
    GameOver,
}

impl TurnState {
    fn for_player(player: Player) -> Self {
        match player {
            Player::Black => TurnState::BlackToMove,
            Player::White => TurnState::WhiteToMove,
        }
    }
}

/// Outcome of evaluating the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// `player` must choose one of `moves`.
    Move { player: Player, moves: LegalMoveMap },
    /// `player` had nothing to play; the opponent is now to move.
    Pass(Player),
    /// Second consecutive pass, or a repeated query after it.
    Over(GameResult),
}

/// One game from the opening position to two consecutive passes.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    state: TurnState,
    passes: u8,
    is_pass: bool,
    flipped: Vec<u8>,
}

impl Session {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Resumes play from an arbitrary position.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        Self {
            board,
            state: TurnState::for_player(to_move),
            passes: 0,
            is_pass: false,
            flipped: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The side to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self.state {
            TurnState::BlackToMove => Some(Player::Black),
            TurnState::WhiteToMove => Some(Player::White),
            TurnState::GameOver => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    /// Consecutive passes so far.
    pub fn passes(&self) -> u8 {
        self.passes
    }

    /// Evaluates the side to move.
    ///
    /// An empty move list counts a pass and hands the turn over; the second
    /// consecutive pass ends the game. A non-empty list resets the counter and
    /// leaves the turn with the same side until [`Session::play`] is called,
    /// so calling this again after a rejected move is harmless.
    #[instrument(level = "trace", skip(self))]
    pub fn advance(&mut self) -> Turn {
        let Some(player) = self.to_move() else {
            return Turn::Over(self.to_game_result());
        };

        let moves = self.board.legal_moves(player);
        if !moves.is_empty() {
            self.passes = 0;
            return Turn::Move { player, moves };
        }

        self.passes += 1;
        if self.passes >= 2 {
            self.state = TurnState::GameOver;
            let result = self.to_game_result();
            info!(
                black = result.black_count,
                white = result.white_count,
                empty = self.board.empty_count(),
                "game over"
            );
            return Turn::Over(result);
        }

        debug!(%player, "pass");
        self.is_pass = true;
        self.flipped.clear();
        self.state = TurnState::for_player(!player);
        Turn::Pass(player)
    }

    /// Plays `position` for the side to move. `moves` is the map the last
    /// [`Session::advance`] returned; membership in it is the legality check.
    #[instrument(
        level = "debug",
        skip(self, moves),
        fields(row = position.row, col = position.col)
    )]
    pub fn play(
        &mut self,
        position: Position,
        moves: &LegalMoveMap,
    ) -> Result<FlipSet, GameError> {
        let player = self.to_move().ok_or(GameError::GameOver)?;
        let flips = moves
            .get(&position)
            .ok_or(GameError::NotLegal(position))?
            .clone();

        self.board.apply_move(player, position, &flips);
        debug!(%player, flipped = flips.len(), "move applied");

        self.is_pass = false;
        self.flipped = flips.iter().map(|pos| pos.index() as u8).collect();
        self.state = TurnState::for_player(!player);

        Ok(flips)
    }

    /// Parses and plays a 0-based `(row, col)` pair from untrusted input.
    pub fn place(
        &mut self,
        row: u8,
        col: u8,
        moves: &LegalMoveMap,
    ) -> Result<FlipSet, GameError> {
        let position = Position::new(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        self.play(position, moves)
    }

    /// Lets `selector` choose for the side to move and plays its choice.
    pub fn play_computer(
        &mut self,
        moves: &LegalMoveMap,
        selector: &mut dyn MoveSelector,
    ) -> Result<Position, GameError> {
        let player = self.to_move().ok_or(GameError::GameOver)?;

        let started = Instant::now();
        let selected = selector
            .select_move(&self.board, player, moves)
            .ok_or(GameError::NoLegalMoves(player))?;
        debug!(elapsed = ?started.elapsed(), "computer selected a move");

        self.play(selected, moves)?;
        Ok(selected)
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.to_move().map_or(0, Player::code),
            black_count,
            white_count,
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult::from_score(self.board.score())
    }

    #[cfg(test)]
    pub(crate) fn set_passes_for_test(&mut self, passes: u8) {
        self.passes = passes;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
