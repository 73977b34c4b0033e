use std::collections::BTreeMap;

use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Player, Position, Score};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cells a move converts, nearest first within each direction, directions in
/// `DIRECTIONS` order.
pub type FlipSet = Vec<Position>;

/// Every legal move for one side mapped to the discs it would flip.
/// Ordered row-major so iteration is deterministic.
pub type LegalMoveMap = BTreeMap<Position, FlipSet>;

/// Reversi board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=black, e4=white, d5=white, e5=black.
    pub fn new() -> Self {
        Self {
            black: bit(27) | bit(36),
            white: bit(28) | bit(35),
        }
    }

    /// Builds a board from raw occupancy masks. A square set in both masks is
    /// treated as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "overlapping bitboards");
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Disc(Player::Black)
        } else if (self.white & square) != 0 {
            Cell::Disc(Player::White)
        } else {
            Cell::Empty
        }
    }

    /// Returns every legal move for `player` with its flips.
    pub fn legal_moves(&self, player: Player) -> LegalMoveMap {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;

        (0..NUM_SQUARES)
            .filter(|&pos| (occupied & bit(pos)) == 0)
            .filter_map(|pos| {
                let flips = Self::collect_flips(pos, me, opp);
                (!flips.is_empty()).then(|| (Position::from_index(pos), flips))
            })
            .collect()
    }

    /// Places `player`'s disc on `mv` and converts every square in `flips`.
    /// Caller contract: `flips` came from `legal_moves` for the same move.
    pub fn apply_move(&mut self, player: Player, mv: Position, flips: &[Position]) {
        let mask = flips
            .iter()
            .fold(bit(mv.index()), |acc, pos| acc | bit(pos.index()));

        match player {
            Player::Black => {
                self.black |= mask;
                self.white &= !mask;
            }
            Player::White => {
                self.white |= mask;
                self.black &= !mask;
            }
        }
    }

    pub fn score(&self) -> Score {
        let (black, white) = self.count();
        Score { black, white }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(Position::from_index(pos)).code();
        }
        board
    }

    /// Iterates the rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = [Cell; BOARD_SIZE]> + '_ {
        (0..BOARD_SIZE).map(move |row| {
            let mut cells = [Cell::Empty; BOARD_SIZE];
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cell(Position::from_index(row * BOARD_SIZE + col));
            }
            cells
        })
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> FlipSet {
        let (row, col) = pos_to_row_col(pos);
        let mut flips = FlipSet::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = Vec::new();

            while in_bounds(r, c) {
                let index = (r as usize) * BOARD_SIZE + c as usize;
                let square = bit(index);
                if (opp & square) != 0 {
                    line.push(Position::from_index(index));
                } else {
                    if (me & square) != 0 {
                        flips.append(&mut line);
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard starting position.
pub fn init_board() -> Board {
    Board::new()
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
