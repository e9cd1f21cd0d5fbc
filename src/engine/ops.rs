use super::state::{Board, Exponent, Move, SIZE};

// 2^31 is the largest tile a u32 cell value can report.
const MAX_EXPONENT: Exponent = 31;

type Line = [Exponent; SIZE];

/// Result of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// True if at least one tile moved or merged.
    pub changed: bool,
    /// Number of merged pairs.
    pub merges: u32,
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// ```
/// use slide_2048::engine::{apply, Board, Move};
/// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// let out = apply(b, Move::Left);
/// assert!(out.changed);
/// assert_eq!(out.board.rows()[0], [4, 0, 0, 0]);
/// ```
pub fn apply(board: Board, direction: Move) -> MoveOutcome {
    let mut next = board;
    let mut merges = 0;
    for line_idx in 0..SIZE {
        let cells = line_cells(direction, line_idx);
        let mut line: Line = cells.map(|idx| board.0[idx]);
        merges += shift_line(&mut line);
        for (&idx, &exp) in cells.iter().zip(line.iter()) {
            next.0[idx] = exp;
        }
    }
    MoveOutcome {
        board: next,
        changed: next != board,
        merges,
    }
}

/// Like [`apply`] but returns only the resulting board.
pub fn shift(board: Board, direction: Move) -> Board {
    apply(board, direction).board
}

/// Row-major indices of one line, starting at the edge tiles move toward.
fn line_cells(direction: Move, line_idx: usize) -> [usize; SIZE] {
    std::array::from_fn(|k| {
        let (row, col) = match direction {
            Move::Left => (line_idx, k),
            Move::Right => (line_idx, SIZE - 1 - k),
            Move::Up => (k, line_idx),
            Move::Down => (SIZE - 1 - k, line_idx),
        };
        row * SIZE + col
    })
}

/// Compact, merge, compact again toward index 0. Each tile merges at most
/// once per call. Returns the number of merged pairs.
pub(crate) fn shift_line(line: &mut Line) -> u32 {
    compact(line);
    let mut merges = 0;
    let mut idx = 0;
    while idx + 1 < SIZE {
        let exp = line[idx];
        if exp != 0 && exp < MAX_EXPONENT && exp == line[idx + 1] {
            line[idx] = exp + 1;
            line[idx + 1] = 0;
            merges += 1;
            // the merged cell and its partner are consumed
            idx += 2;
        } else {
            idx += 1;
        }
    }
    if merges > 0 {
        compact(line);
    }
    merges
}

fn compact(line: &mut Line) {
    let mut write = 0;
    for read in 0..SIZE {
        let exp = line[read];
        if exp == 0 {
            continue;
        }
        if read != write {
            line[write] = exp;
            line[read] = 0;
        }
        write += 1;
    }
}
