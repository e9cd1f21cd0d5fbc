use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::Board;
use crate::error::GameError;

/// Source of new tiles: where the next one lands and what it is worth.
///
/// Owns its generator, so every draw advances one sequence. Seed it for
/// reproducible games.
///
/// ```
/// use slide_2048::engine::{Board, TileSpawner};
/// let mut spawner = TileSpawner::seeded(7);
/// let mut board = Board::EMPTY;
/// let (row, col, value) = spawner.spawn(&mut board).unwrap();
/// assert_eq!(board.get(row, col), value);
/// ```
#[derive(Debug, Clone)]
pub struct TileSpawner<R = StdRng> {
    rng: R,
}

impl TileSpawner<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TileSpawner<R> {
    pub fn new(rng: R) -> Self {
        TileSpawner { rng }
    }

    /// Pick an empty cell uniformly.
    pub fn choose_empty_cell(&mut self, board: &Board) -> Result<(usize, usize), GameError> {
        pick_cell(&mut self.rng, board).ok_or(GameError::SpawnOnFullBoard)
    }

    /// 2 with probability 0.9, otherwise 4.
    pub fn choose_tile_value(&mut self) -> u32 {
        pick_value(&mut self.rng)
    }

    /// Place one new tile, returning its position and value.
    pub fn spawn(&mut self, board: &mut Board) -> Result<(usize, usize, u32), GameError> {
        let (row, col) = self.choose_empty_cell(board)?;
        let value = self.choose_tile_value();
        board.set(row, col, value);
        trace!("spawned {value} at ({row}, {col})");
        Ok((row, col, value))
    }
}

pub(crate) fn pick_cell<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<(usize, usize)> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.gen_range(0..empty.len())])
}

pub(crate) fn pick_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}
