#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move {0:?}: expected one of W, A, S, D")]
    InvalidInput(String),
    #[error("cannot spawn a tile: no empty cell on the board")]
    SpawnOnFullBoard,
}
