//! Graphical front-end: square cells on a fixed-size canvas.
//!
//! Drawing itself happens in the page; this module turns the game into a
//! serializable [`Frame`] of disc draws and turns pointer clicks back into
//! board squares.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::trace;

use crate::board::LegalMoveMap;
use crate::error::{FrontendError, GameError};
use crate::frontend::{Command, InputSource, Renderer, score_line, verdict_line};
use crate::game::Session;
use crate::types::{BOARD_SIZE, Cell, GameResult, Player, Position};

const DISC_RADIUS_RATIO: f64 = 0.4;
const HINT_RADIUS_RATIO: f64 = 0.1;

pub const BOARD_COLOR: &str = "#2e7d32";
pub const BLACK_DISC: &str = "#111111";
pub const WHITE_DISC: &str = "#f5f5f5";
pub const HINT_COLOR: &str = "rgba(0, 0, 0, 0.3)";

/// Pixel geometry of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    cell_size: u32,
}

impl CanvasLayout {
    /// Caller contract: `cell_size > 0` (see `GameConfig::validate`).
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Edge of the square canvas in pixels.
    pub fn canvas_size(&self) -> u32 {
        self.cell_size * BOARD_SIZE as u32
    }

    /// Maps a click to the square under it by integer division.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Position> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x as u32) / self.cell_size;
        let row = (y as u32) / self.cell_size;
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return None;
        }
        Position::new(row as u8, col as u8)
    }

    pub fn center_of(&self, pos: Position) -> (f64, f64) {
        let size = self.cell_size as f64;
        (
            (pos.col as f64 + 0.5) * size,
            (pos.row as f64 + 0.5) * size,
        )
    }
}

/// One filled circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disc {
    pub row: u8,
    pub col: u8,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
}

/// Everything the page needs to repaint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub background: &'static str,
    pub discs: Vec<Disc>,
    /// Legal squares for the human, drawn as small dots.
    pub hints: Vec<Disc>,
    pub messages: Vec<String>,
    pub game_over: bool,
}

impl Frame {
    fn empty(layout: CanvasLayout) -> Self {
        Self {
            width: layout.canvas_size(),
            height: layout.canvas_size(),
            cell_size: layout.cell_size(),
            background: BOARD_COLOR,
            discs: Vec::new(),
            hints: Vec::new(),
            messages: Vec::new(),
            game_over: false,
        }
    }
}

pub struct CanvasRenderer {
    layout: CanvasLayout,
    human: Player,
    frame: Frame,
}

impl CanvasRenderer {
    pub fn new(layout: CanvasLayout, human: Player) -> Self {
        Self {
            layout,
            human,
            frame: Frame::empty(layout),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Drops messages already shown.
    pub fn clear_messages(&mut self) {
        self.frame.messages.clear();
    }

    /// Repaints discs from `session` and clears stale hints.
    pub fn paint(&mut self, session: &Session) {
        let radius = self.layout.cell_size() as f64 * DISC_RADIUS_RATIO;
        let board = session.board();

        self.frame.discs = (0..BOARD_SIZE * BOARD_SIZE)
            .filter_map(|index| {
                let pos = Position::new((index / BOARD_SIZE) as u8, (index % BOARD_SIZE) as u8)?;
                let color = match board.cell(pos) {
                    Cell::Empty => return None,
                    Cell::Disc(Player::Black) => BLACK_DISC,
                    Cell::Disc(Player::White) => WHITE_DISC,
                };
                Some(self.disc(pos, radius, color))
            })
            .collect();
        self.frame.hints.clear();
        self.frame.game_over = session.is_game_over();
    }

    fn disc(&self, pos: Position, radius: f64, color: &'static str) -> Disc {
        let (x, y) = self.layout.center_of(pos);
        Disc {
            row: pos.row,
            col: pos.col,
            x,
            y,
            radius,
            color,
        }
    }
}

impl Renderer for CanvasRenderer {
    fn board(&mut self, session: &Session, moves: &LegalMoveMap) -> Result<(), FrontendError> {
        self.paint(session);
        let radius = self.layout.cell_size() as f64 * HINT_RADIUS_RATIO;
        self.frame.hints = moves
            .keys()
            .map(|pos| self.disc(*pos, radius, HINT_COLOR))
            .collect();
        Ok(())
    }

    fn invalid_move(&mut self, err: &GameError) -> Result<(), FrontendError> {
        trace!(%err, "click ignored");
        Ok(())
    }

    fn pass(&mut self, player: Player) -> Result<(), FrontendError> {
        self.frame
            .messages
            .push(format!("{player} has no valid moves and must pass."));
        Ok(())
    }

    fn computer_move(&mut self, _player: Player, mv: Position) -> Result<(), FrontendError> {
        self.frame
            .messages
            .push(format!("Computer plays {} {}.", mv.row + 1, mv.col + 1));
        Ok(())
    }

    fn aborted(&mut self) -> Result<(), FrontendError> {
        self.frame.messages.push("Game aborted.".to_string());
        Ok(())
    }

    fn game_over(&mut self, session: &Session, result: &GameResult) -> Result<(), FrontendError> {
        self.paint(session);
        self.frame.messages.push(score_line(result));
        self.frame
            .messages
            .push(verdict_line(result.verdict(), self.human).to_string());
        Ok(())
    }
}

/// Pointer clicks waiting to be consumed, in pixels.
#[derive(Debug)]
pub struct ClickQueue {
    layout: CanvasLayout,
    pending: VecDeque<(f64, f64)>,
}

impl ClickQueue {
    pub fn new(layout: CanvasLayout) -> Self {
        Self {
            layout,
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.pending.push_back((x, y));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops clicks no turn consumed.
    pub fn clear(&mut self) {
        if !self.pending.is_empty() {
            trace!(dropped = self.pending.len(), "stale clicks dropped");
            self.pending.clear();
        }
    }
}

impl InputSource for ClickQueue {
    /// Clicks outside the board are dropped.
    fn next_command(&mut self) -> Result<Option<Command>, FrontendError> {
        while let Some((x, y)) = self.pending.pop_front() {
            if let Some(pos) = self.layout.cell_at(x, y) {
                return Ok(Some(Command::Place(pos)));
            }
            trace!(x, y, "click outside the board");
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedySelector;
    use crate::frontend::{Driver, Step};

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn clicks_map_to_cells_by_integer_division() {
        let layout = CanvasLayout::new(60);

        assert_eq!(layout.canvas_size(), 480);
        assert_eq!(layout.cell_at(0.0, 0.0), Some(at(0, 0)));
        assert_eq!(layout.cell_at(59.9, 59.9), Some(at(0, 0)));
        assert_eq!(layout.cell_at(60.0, 125.0), Some(at(2, 1)));
        assert_eq!(layout.cell_at(479.0, 479.0), Some(at(7, 7)));
    }

    #[test]
    fn clicks_off_the_board_map_to_nothing() {
        let layout = CanvasLayout::new(60);

        assert_eq!(layout.cell_at(480.0, 10.0), None);
        assert_eq!(layout.cell_at(10.0, 480.0), None);
        assert_eq!(layout.cell_at(-1.0, 10.0), None);
        assert_eq!(layout.cell_at(f64::NAN, 10.0), None);
    }

    #[test]
    fn disc_centres_sit_in_the_middle_of_cells() {
        let layout = CanvasLayout::new(50);
        assert_eq!(layout.center_of(at(0, 0)), (25.0, 25.0));
        assert_eq!(layout.center_of(at(3, 7)), (375.0, 175.0));
    }

    #[test]
    fn board_frame_has_discs_and_legal_hints() {
        let session = Session::new();
        let moves = session.board().legal_moves(Player::Black);
        let mut renderer = CanvasRenderer::new(CanvasLayout::new(60), Player::Black);

        renderer.board(&session, &moves).unwrap();
        let frame = renderer.frame();

        assert_eq!(frame.discs.len(), 4);
        assert_eq!(frame.hints.len(), 4);
        let black = frame.discs.iter().find(|d| d.row == 3 && d.col == 3).unwrap();
        assert_eq!(black.color, BLACK_DISC);
        assert_eq!((black.x, black.y), (210.0, 210.0));
        assert!((black.radius - 24.0).abs() < 1e-9);
    }

    #[test]
    fn only_legal_clicks_reach_the_board() {
        let layout = CanvasLayout::new(60);
        let mut session = Session::new();
        let mut driver = Driver::new(GreedySelector::from_seed(Some(9)));
        let mut renderer = CanvasRenderer::new(layout, driver.human());
        let mut clicks = ClickQueue::new(layout);

        // Off-board, then an occupied centre square.
        clicks.push(900.0, 900.0);
        clicks.push(200.0, 200.0);
        let step = driver.step(&mut session, &mut renderer, &mut clicks).unwrap();
        assert_eq!(step, Step::Continue);
        assert_eq!(session.board().score().total(), 4);

        assert_eq!(
            driver.step(&mut session, &mut renderer, &mut clicks).unwrap(),
            Step::AwaitingInput
        );

        // (2,4): x in column 4, y in row 2.
        clicks.push(270.0, 150.0);
        driver.step(&mut session, &mut renderer, &mut clicks).unwrap();
        assert_eq!(session.board().score().black, 4);
        assert!(clicks.is_empty());

        driver.step(&mut session, &mut renderer, &mut clicks).unwrap();
        assert!(renderer.frame().messages[0].starts_with("Computer plays"));
    }
}
