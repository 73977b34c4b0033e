//! The seam between the rules engine and its user interfaces.
//!
//! A front-end is a [`Renderer`] plus an [`InputSource`]. [`Driver`] runs the
//! turn state machine of a [`Session`] against any such pair, so the console
//! and the canvas share every rule and differ only in I/O.

pub mod canvas;
pub mod console;

use tracing::debug;

use crate::ai::MoveSelector;
use crate::board::LegalMoveMap;
use crate::error::{FrontendError, GameError};
use crate::game::{Session, Turn};
use crate::types::{GameResult, Player, Position, Verdict};

/// What the human asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(Position),
    /// Input that could not be turned into a square.
    Rejected(GameError),
    Quit,
}

/// Supplies the human's commands.
pub trait InputSource {
    /// Returns `Ok(None)` when no input is available yet; blocking sources
    /// never do.
    fn next_command(&mut self) -> Result<Option<Command>, FrontendError>;
}

/// Presents the game. Every hook is called by [`Driver::step`].
pub trait Renderer {
    /// Shown before the human is asked for a move.
    fn board(&mut self, session: &Session, moves: &LegalMoveMap) -> Result<(), FrontendError>;

    fn prompt(&mut self, _player: Player) -> Result<(), FrontendError> {
        Ok(())
    }

    fn invalid_move(&mut self, err: &GameError) -> Result<(), FrontendError>;

    fn pass(&mut self, player: Player) -> Result<(), FrontendError>;

    /// Called right before the computer chooses.
    fn thinking(&mut self, _player: Player) -> Result<(), FrontendError> {
        Ok(())
    }

    fn computer_move(&mut self, player: Player, mv: Position) -> Result<(), FrontendError>;

    fn aborted(&mut self) -> Result<(), FrontendError>;

    fn game_over(&mut self, session: &Session, result: &GameResult) -> Result<(), FrontendError>;
}

/// Result of one [`Driver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    AwaitingInput,
    Aborted,
    Finished(GameResult),
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Continue => "continue",
            Step::AwaitingInput => "awaiting_input",
            Step::Aborted => "aborted",
            Step::Finished(_) => "finished",
        }
    }

    /// No further step will change anything.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Aborted | Step::Finished(_))
    }
}

/// Plays a human against a [`MoveSelector`].
pub struct Driver<S> {
    human: Player,
    selector: S,
}

impl<S: MoveSelector> Driver<S> {
    /// The human plays Black and moves first.
    pub fn new(selector: S) -> Self {
        Self {
            human: Player::Black,
            selector,
        }
    }

    pub fn human(&self) -> Player {
        self.human
    }

    /// Runs one turn of the state machine.
    pub fn step(
        &mut self,
        session: &mut Session,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
    ) -> Result<Step, FrontendError> {
        match session.advance() {
            Turn::Over(result) => {
                renderer.game_over(session, &result)?;
                Ok(Step::Finished(result))
            }
            Turn::Pass(player) => {
                renderer.pass(player)?;
                Ok(Step::Continue)
            }
            Turn::Move { player, moves } if player == self.human => {
                renderer.board(session, &moves)?;
                renderer.prompt(player)?;

                match input.next_command()? {
                    None => Ok(Step::AwaitingInput),
                    Some(Command::Quit) => {
                        renderer.aborted()?;
                        Ok(Step::Aborted)
                    }
                    Some(Command::Rejected(err)) => {
                        debug!(%err, "rejected input");
                        renderer.invalid_move(&err)?;
                        Ok(Step::Continue)
                    }
                    Some(Command::Place(position)) => match session.play(position, &moves) {
                        Ok(_) => Ok(Step::Continue),
                        Err(err) if err.is_invalid_move() => {
                            debug!(%err, "rejected move");
                            renderer.invalid_move(&err)?;
                            Ok(Step::Continue)
                        }
                        Err(err) => Err(err.into()),
                    },
                }
            }
            Turn::Move { player, moves } => {
                renderer.thinking(player)?;
                let mv = session.play_computer(&moves, &mut self.selector)?;
                renderer.computer_move(player, mv)?;
                Ok(Step::Continue)
            }
        }
    }

    /// Steps until the game ends, the human quits, or input runs dry.
    pub fn run(
        &mut self,
        session: &mut Session,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
    ) -> Result<Step, FrontendError> {
        loop {
            match self.step(session, renderer, input)? {
                Step::Continue => continue,
                done => return Ok(done),
            }
        }
    }
}

/// `Final score - Black: <b>, White: <w>`
pub fn score_line(result: &GameResult) -> String {
    format!(
        "Final score - Black: {}, White: {}",
        result.black_count, result.white_count
    )
}

/// End-of-game verdict from the human's side of the board.
pub fn verdict_line(verdict: Verdict, human: Player) -> &'static str {
    match (verdict, human) {
        (Verdict::Draw, _) => "It's a draw!",
        (Verdict::BlackWins, Player::Black) | (Verdict::WhiteWins, Player::White) => "You win!",
        _ => "Computer wins!",
    }
}
