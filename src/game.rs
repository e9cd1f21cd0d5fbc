//! Turn-by-turn game state: one board, one tile source, one status.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{ops, Board, Move, TileSpawner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Over,
}

impl GameStatus {
    pub fn of(board: &Board) -> Self {
        if board.is_game_over() {
            GameStatus::Over
        } else {
            GameStatus::InProgress
        }
    }
}

/// Where the controller is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    /// Transient: held only while `submit_move` runs, so callers always
    /// observe `AwaitingMove` or `Over` between turns.
    Evaluating,
    Over,
}

/// What the presentation layer reads back after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub changed: bool,
    pub status: GameStatus,
    /// Highest tile, only once the game is over.
    pub score: Option<u32>,
}

/// Owns the board and the tile source for one game.
///
/// ```
/// use slide_2048::engine::Move;
/// use slide_2048::game::{Game, GameStatus};
/// let mut game = Game::new(42);
/// assert_eq!(game.board().count_empty(), 14);
/// let res = game.submit_move(Move::Left);
/// assert_eq!(res.status, GameStatus::InProgress);
/// ```
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    board: Board,
    spawner: TileSpawner<R>,
    phase: Phase,
    moves: u32,
}

impl Game<StdRng> {
    /// Empty board plus two spawned tiles, drawn from a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_spawner(TileSpawner::seeded(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_spawner(spawner: TileSpawner<R>) -> Self {
        let mut game = Self::from_board(Board::EMPTY, spawner);
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Resume from an arbitrary position without spawning.
    pub fn from_board(board: Board, spawner: TileSpawner<R>) -> Self {
        let phase = match GameStatus::of(&board) {
            GameStatus::Over => Phase::Over,
            GameStatus::InProgress => Phase::AwaitingMove,
        };
        Game {
            board,
            spawner,
            phase,
            moves: 0,
        }
    }

    /// Play one full turn: slide, spawn if anything moved, re-evaluate status.
    ///
    /// A finished game ignores further moves and keeps returning its final result.
    pub fn submit_move(&mut self, direction: Move) -> MoveResult {
        if self.phase == Phase::Over {
            return self.result(false);
        }
        self.phase = Phase::Evaluating;

        let outcome = ops::apply(self.board, direction);
        debug!(
            "move {direction}: changed={} merges={}",
            outcome.changed, outcome.merges
        );
        self.board = outcome.board;
        if outcome.changed {
            self.moves += 1;
            self.spawn_tile();
        }

        self.phase = match self.status() {
            GameStatus::Over => {
                info!(
                    "game over after {} moves, highest tile {}",
                    self.moves,
                    self.board.max_value()
                );
                Phase::Over
            }
            GameStatus::InProgress => Phase::AwaitingMove,
        };
        self.result(outcome.changed)
    }

    fn spawn_tile(&mut self) {
        if self.board.count_empty() == 0 {
            debug!("no empty cell left, skipping spawn");
            return;
        }
        if let Err(err) = self.spawner.spawn(&mut self.board) {
            unreachable!("{err} after checking for empty cells");
        }
    }

    fn result(&self, changed: bool) -> MoveResult {
        MoveResult {
            board: self.board,
            changed,
            status: self.status(),
            score: self.score(),
        }
    }
}

impl<R> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.board)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of moves that changed the board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Highest tile on the board once the game is over.
    pub fn score(&self) -> Option<u32> {
        match self.status() {
            GameStatus::Over => Some(self.board.max_value()),
            GameStatus::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKERBOARD: [[u32; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    #[test]
    fn new_game_has_two_tiles() {
        let game = Game::new(42);
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.phase(), Phase::AwaitingMove);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.score(), None);
        assert_eq!(game.moves(), 0);
        for idx in 0..16 {
            assert!(matches!(game.board().tile_value(idx), 0 | 2 | 4));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Game::new(7);
        let mut b = Game::new(7);
        assert_eq!(a.board(), b.board());
        for dir in [Move::Left, Move::Up, Move::Right, Move::Down].iter().cycle().take(40) {
            assert_eq!(a.submit_move(*dir), b.submit_move(*dir));
        }
    }

    #[test]
    fn changed_move_spawns_one_tile() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_board(board, TileSpawner::seeded(5));
        let res = game.submit_move(Move::Left);
        assert!(res.changed);
        assert_eq!(res.status, GameStatus::InProgress);
        assert_eq!(res.score, None);
        assert_eq!(res.board.get(0, 0), 4);
        // The merged 4 plus exactly one new tile.
        assert_eq!(res.board.count_empty(), 14);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn noop_move_spawns_nothing() {
        let board = Board::from_rows([[0; 4], [0; 4], [0; 4], [0, 0, 0, 2]]);
        let mut game = Game::from_board(board, TileSpawner::seeded(5));
        let res = game.submit_move(Move::Down);
        assert!(!res.changed);
        assert_eq!(res.board, board);
        assert_eq!(res.status, GameStatus::InProgress);
        assert_eq!(game.moves(), 0);
        assert_ne!(game.phase(), Phase::Evaluating);
    }

    #[test]
    fn terminal_board_is_over_before_any_move() {
        let board = Board::from_rows(CHECKERBOARD);
        let mut game = Game::from_board(board, TileSpawner::seeded(0));
        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.score(), Some(4));

        let res = game.submit_move(Move::Up);
        assert!(!res.changed);
        assert_eq!(res.board, board);
        assert_eq!(res.status, GameStatus::Over);
        assert_eq!(res.score, Some(4));
    }

    #[test]
    fn spawn_fills_last_cell_but_pair_remains() {
        // Left merges the 8s and frees (3, 3), the only cell the spawn can use.
        let board = Board::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 32],
            [8, 8, 16, 64],
        ]);
        let mut game = Game::from_board(board, TileSpawner::seeded(3));
        let res = game.submit_move(Move::Left);
        assert!(res.changed);
        assert_eq!(res.board.rows()[3][..3], [16, 16, 64]);
        // 16 16 merge is still available, so the game goes on.
        assert_eq!(res.status, GameStatus::InProgress);
        assert_eq!(game.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn final_merge_and_spawn_end_the_game() {
        let board = Board::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [8, 4, 2, 4],
            [16, 16, 64, 32],
        ]);
        let mut game = Game::from_board(board, TileSpawner::seeded(9));
        let res = game.submit_move(Move::Right);
        assert!(res.changed);
        assert_eq!(res.board.rows()[3][1..], [32, 64, 32]);
        assert!(matches!(res.board.get(3, 0), 2 | 4));
        assert_eq!(res.status, GameStatus::Over);
        assert_eq!(res.score, Some(64));
        assert_eq!(game.phase(), Phase::Over);
    }

    #[test]
    fn random_play_reaches_game_over() {
        let mut game = Game::new(2048);
        let mut turns = 0;
        for dir in Move::ALL.iter().cycle() {
            if game.status() == GameStatus::Over {
                break;
            }
            game.submit_move(*dir);
            turns += 1;
            assert!(turns < 1_000_000, "game never ended");
        }
        assert_eq!(game.phase(), Phase::Over);
        let score = game.score().unwrap();
        assert!(score.is_power_of_two() && score >= 4);
        assert_eq!(score, game.board().max_value());
    }
}
