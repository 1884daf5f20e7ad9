use std::fmt::Display;
use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::types::Outcome;

pub const BOARD_WIDTH: usize = 3;
pub const NUM_CELLS: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Rows, then columns, then diagonals. Evaluation walks them in this order.
pub const WINNING_COMBOS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const FULL_MASK: u16 = (1 << NUM_CELLS) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Not for Mark {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// 3x3 board stored as one bitmask per mark.
/// Bit `i` is cell `i`, row-major: 0 1 2 / 3 4 5 / 6 7 8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    x: u16,
    o: u16,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, pos: usize) -> Option<Mark> {
        let square = bit(pos);
        if self.x & square != 0 {
            Some(Mark::X)
        } else if self.o & square != 0 {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, pos: usize) -> bool {
        pos < NUM_CELLS && (self.x | self.o) & bit(pos) == 0
    }

    /// Returns a new board with `mark` at `pos`.
    /// Returns `None` when the cell is occupied or out of range; `self` is never modified.
    pub fn place(&self, pos: usize, mark: Mark) -> Option<Board> {
        if !self.is_empty_at(pos) {
            return None;
        }

        let mut next = *self;
        match mark {
            Mark::X => next.x |= bit(pos),
            Mark::O => next.o |= bit(pos),
        }
        Some(next)
    }

    pub fn empty_count(&self) -> u8 {
        NUM_CELLS as u8 - (self.x | self.o).count_ones() as u8
    }

    pub fn is_full(&self) -> bool {
        (self.x | self.o) & FULL_MASK == FULL_MASK
    }

    pub fn cells(&self) -> [Option<Mark>; NUM_CELLS] {
        std::array::from_fn(|pos| self.cell(pos))
    }

    /// Converts board to `[u8; 9]` where 0=empty, 1=X, 2=O.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        std::array::from_fn(|pos| match self.cell(pos) {
            None => 0,
            Some(Mark::X) => 1,
            Some(Mark::O) => 2,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_masks(x: u16, o: u16) -> Self {
        debug_assert_eq!(x & o, 0, "masks must be disjoint");
        Self {
            x: x & FULL_MASK,
            o: o & FULL_MASK,
        }
    }

    fn owns_combo(mask: u16, combo: &[usize; 3]) -> bool {
        combo.iter().all(|&pos| mask & bit(pos) != 0)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_WIDTH {
            for col in 0..BOARD_WIDTH {
                match self.cell(row * BOARD_WIDTH + col) {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, "-")?,
                }
            }
            if row + 1 < BOARD_WIDTH {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Decides whether the round is over.
///
/// - First combination (in [`WINNING_COMBOS`] order) fully held by one mark wins,
///   regardless of remaining empty cells.
/// - Otherwise `None` while any cell is empty.
/// - Otherwise the full board is a tie.
pub fn evaluate_outcome(board: &Board) -> Option<Outcome> {
    for combo in &WINNING_COMBOS {
        if Board::owns_combo(board.x, combo) {
            return Some(Outcome::Win(Mark::X));
        }
        if Board::owns_combo(board.o, combo) {
            return Some(Outcome::Win(Mark::O));
        }
    }

    if board.is_full() {
        Some(Outcome::Tie)
    } else {
        None
    }
}

fn bit(pos: usize) -> u16 {
    if pos < NUM_CELLS { 1u16 << pos } else { 0 }
}
