use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
}

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Player {
    #[default]
    Black,
    White,
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl Player {
    /// Wire code used by the WASM state: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::Black => "B",
            Player::White => "W",
        })
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Disc(Player),
}

impl Cell {
    /// 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Disc(player) => player.code(),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Disc(Player::Black) => 'B',
            Cell::Disc(Player::White) => 'W',
        }
    }
}

/// Disc tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    pub fn total(self) -> u8 {
        self.black + self.white
    }

    pub fn verdict(self) -> Verdict {
        if self.black > self.white {
            Verdict::BlackWins
        } else if self.white > self.black {
            Verdict::WhiteWins
        } else {
            Verdict::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    BlackWins,
    WhiteWins,
    Draw,
}

impl Verdict {
    /// Wire code: 0=draw, otherwise the winner's player code.
    pub fn code(self) -> u8 {
        match self {
            Verdict::BlackWins => Player::Black.code(),
            Verdict::WhiteWins => Player::White.code(),
            Verdict::Draw => 0,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

impl GameResult {
    pub fn from_score(score: Score) -> Self {
        Self {
            winner: score.verdict().code(),
            black_count: score.black,
            white_count: score.white,
        }
    }

    pub fn verdict(&self) -> Verdict {
        Score {
            black: self.black_count,
            white: self.white_count,
        }
        .verdict()
    }
}
