//! Text front-end: an 8x8 character grid on a writer, `row col` lines from a
//! reader.

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::board::{Board, LegalMoveMap};
use crate::error::{FrontendError, GameError};
use crate::frontend::{Command, InputSource, Renderer, score_line, verdict_line};
use crate::game::Session;
use crate::types::{BOARD_SIZE, GameResult, Player, Position};

const PROMPT: &str = "Enter your move as 'row col' (1-8) or 'q' to quit:";

/// Parses a 1-based `row col` pair into a board position.
pub fn parse_move(raw: &str) -> Result<Position, GameError> {
    let malformed = || GameError::Malformed(raw.trim().to_string());

    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [row, col] = parts.as_slice() else {
        return Err(malformed());
    };
    let row: u8 = row.parse().map_err(|_| malformed())?;
    let col: u8 = col.parse().map_err(|_| malformed())?;

    row.checked_sub(1)
        .zip(col.checked_sub(1))
        .and_then(|(r, c)| Position::new(r, c))
        .ok_or(GameError::OutOfBounds { row, col })
}

/// Writes the grid with column letters and 1-based row numbers.
pub fn write_board<W: Write>(out: &mut W, board: &Board) -> std::io::Result<()> {
    let header: Vec<String> = (b'A'..b'A' + BOARD_SIZE as u8)
        .map(|c| (c as char).to_string())
        .collect();
    writeln!(out, "  {}", header.join(" "))?;

    for (i, row) in board.rows().enumerate() {
        let cells: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
        writeln!(out, "{} {}", i + 1, cells.join(" "))?;
    }
    writeln!(out)
}

pub struct ConsoleRenderer<W> {
    out: W,
    human: Player,
    ai_delay: Duration,
}

impl<W: Write> ConsoleRenderer<W> {
    /// `human` is the side the verdict is told from.
    pub fn new(out: W, human: Player, ai_delay: Duration) -> Self {
        Self {
            out,
            human,
            ai_delay,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn board(&mut self, session: &Session, _moves: &LegalMoveMap) -> Result<(), FrontendError> {
        write_board(&mut self.out, session.board())?;
        Ok(())
    }

    fn prompt(&mut self, _player: Player) -> Result<(), FrontendError> {
        writeln!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }

    fn invalid_move(&mut self, _err: &GameError) -> Result<(), FrontendError> {
        writeln!(self.out, "Invalid move. Try again.\n")?;
        Ok(())
    }

    fn pass(&mut self, player: Player) -> Result<(), FrontendError> {
        writeln!(self.out, "{player} has no valid moves and must pass.\n")?;
        Ok(())
    }

    fn thinking(&mut self, _player: Player) -> Result<(), FrontendError> {
        if !self.ai_delay.is_zero() {
            self.out.flush()?;
            std::thread::sleep(self.ai_delay);
        }
        Ok(())
    }

    fn computer_move(&mut self, _player: Player, mv: Position) -> Result<(), FrontendError> {
        writeln!(self.out, "Computer plays {} {}.\n", mv.row + 1, mv.col + 1)?;
        Ok(())
    }

    fn aborted(&mut self) -> Result<(), FrontendError> {
        writeln!(self.out, "Game aborted.")?;
        self.out.flush()?;
        Ok(())
    }

    fn game_over(&mut self, session: &Session, result: &GameResult) -> Result<(), FrontendError> {
        write_board(&mut self.out, session.board())?;
        writeln!(self.out, "{}", score_line(result))?;
        writeln!(self.out, "{}", verdict_line(result.verdict(), self.human))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Reads one command per line. End of input counts as quitting.
pub struct ConsoleInput<R> {
    input: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> InputSource for ConsoleInput<R> {
    fn next_command(&mut self) -> Result<Option<Command>, FrontendError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Some(Command::Quit));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(Some(Command::Quit));
        }

        Ok(Some(match parse_move(line) {
            Ok(position) => Command::Place(position),
            Err(err) => Command::Rejected(err),
        }))
    }
}
