use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::ops::{self, MoveOutcome};
use super::spawn;
use crate::error::GameError;

/// Side length of the square grid.
pub const SIZE: usize = 4;
const CELLS: usize = SIZE * SIZE;
const CELL_WIDTH: usize = 5;

// Cells store log2 of the tile value; 0 is an empty cell.
pub(crate) type Exponent = u8;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl FromStr for Move {
    type Err = GameError;

    /// Accepts W/A/S/D in either case, or the direction spelled out.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "w" | "up" => Ok(Move::Up),
            "s" | "down" => Ok(Move::Down),
            "a" | "left" => Ok(Move::Left),
            "d" | "right" => Ok(Move::Right),
            _ => Err(GameError::InvalidInput(token.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.write_str(s)
    }
}

/// A 4x4 board stored row-major as tile exponents.
///
/// Cell access is checked: indexing outside the grid, or writing a value
/// that is neither 0 nor a power of two >= 2, is a programming error and panics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) [Exponent; CELLS]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; CELLS]);

    /// Build a board from a matrix of tile values (0 for empty).
    ///
    /// ```
    /// use slide_2048::engine::Board;
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]]);
    /// assert_eq!(b.get(3, 3), 8);
    /// assert_eq!(b.count_empty(), 13);
    /// ```
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Self {
        let mut board = Board::EMPTY;
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                board.set(row, col, value);
            }
        }
        board
    }

    /// The board as a matrix of tile values (0 for empty).
    pub fn rows(&self) -> [[u32; SIZE]; SIZE] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.get(row, col)))
    }

    #[inline]
    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < SIZE && col < SIZE,
            "cell ({row}, {col}) is outside the {SIZE}x{SIZE} board"
        );
        row * SIZE + col
    }

    /// Tile value at `(row, col)`, 0 when empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        exponent_to_value(self.0[Self::index(row, col)])
    }

    /// Write a tile value (0 clears the cell).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        let idx = Self::index(row, col);
        self.0[idx] = value_to_exponent(value);
    }

    /// Tile value at a row-major index in `0..16`.
    #[inline]
    pub fn tile_value(&self, idx: usize) -> u32 {
        assert!(idx < CELLS, "tile index {idx} is outside the board");
        exponent_to_value(self.0[idx])
    }

    /// Empty positions in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &exp)| exp == 0)
            .map(|(idx, _)| (idx / SIZE, idx % SIZE))
            .collect()
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.0.iter().filter(|&&exp| exp == 0).count()
    }

    /// Largest tile value present, 0 on an empty board.
    pub fn max_value(&self) -> u32 {
        self.0.iter().copied().max().map_or(0, exponent_to_value)
    }

    /// Return the highest tile value (e.g., 2048) present on the board.
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.max_value()
    }

    /// Cell-wise equality.
    #[inline]
    pub fn equals(&self, other: &Board) -> bool {
        self == other
    }

    /// True if some pair of horizontally or vertically neighbouring tiles
    /// holds the same value. Only right and down neighbours are scanned;
    /// adjacency is symmetric so that covers every pair.
    pub fn has_adjacent_pair(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let exp = self.0[row * SIZE + col];
                if exp == 0 {
                    continue;
                }
                if col + 1 < SIZE && self.0[row * SIZE + col + 1] == exp {
                    return true;
                }
                if row + 1 < SIZE && self.0[(row + 1) * SIZE + col] == exp {
                    return true;
                }
            }
        }
        false
    }

    /// Return true if no legal moves remain: the board is full and no
    /// neighbouring tiles are equal.
    ///
    /// ```
    /// use slide_2048::engine::Board;
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.count_empty() == 0 && !self.has_adjacent_pair()
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir)
    }

    /// Slide/merge in `dir`, reporting whether anything moved.
    #[inline]
    pub fn apply(self, dir: Move) -> MoveOutcome {
        ops::apply(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use slide_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if let Some((row, col)) = spawn::pick_cell(rng, &self) {
            let value = spawn::pick_value(rng);
            self.set(row, col, value);
        }
        self
    }

    /// Perform a move then insert a random tile if the move changed the board, using the provided RNG.
    pub fn make_move<R: Rng + ?Sized>(self, direction: Move, rng: &mut R) -> Self {
        let moved = self.shift(direction);
        if moved != self {
            moved.with_random_tile(rng)
        } else {
            self
        }
    }
}

#[inline]
fn exponent_to_value(exp: Exponent) -> u32 {
    if exp == 0 {
        0
    } else {
        1 << exp
    }
}

#[inline]
fn value_to_exponent(value: u32) -> Exponent {
    if value == 0 {
        return 0;
    }
    assert!(
        value >= 2 && value.is_power_of_two(),
        "tile value {value} is not a power of two >= 2"
    );
    value.trailing_zeros() as Exponent
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.rows())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(1 + SIZE * (CELL_WIDTH + 1));
        writeln!(f, "{separator}")?;
        for row in 0..SIZE {
            f.write_str("|")?;
            for col in 0..SIZE {
                match self.get(row, col) {
                    0 => write!(f, "{:>width$}|", "", width = CELL_WIDTH)?,
                    v => write!(f, "{:>width$}|", v, width = CELL_WIDTH)?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{separator}")?;
        }
        Ok(())
    }
}

/// Unpack the nibble-per-cell `u64` notation (first row in the high bits)
/// used throughout the tests.
#[cfg(test)]
pub(crate) fn from_packed(raw: u64) -> Board {
    Board(std::array::from_fn(|idx| ((raw >> (60 - 4 * idx)) & 0xf) as Exponent))
}
