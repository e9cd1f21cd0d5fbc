//! Terminal presentation. The engine never calls into this module; the
//! binary drives a [`Game`] through a [`Frontend`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::engine::{Board, Move, SIZE};
use crate::game::{Game, GameStatus};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Move),
    Quit,
}

pub trait Frontend {
    fn render(&mut self, board: &Board) -> io::Result<()>;

    /// Block until the player picks a direction or quits. Unrecognised
    /// tokens are handled here and never reach the game.
    fn read_input(&mut self) -> io::Result<Input>;

    fn game_over(&mut self, board: &Board, score: u32) -> io::Result<()>;
}

/// Display strings for each cell, empty cells as "".
pub fn render(board: &Board) -> [[String; SIZE]; SIZE] {
    board.rows().map(|row| {
        row.map(|value| match value {
            0 => String::new(),
            v => v.to_string(),
        })
    })
}

/// Line-oriented frontend over any reader/writer pair.
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    delay: Duration,
    clear: bool,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalFrontend {
            input,
            output,
            delay: Duration::ZERO,
            clear: false,
            pending: VecDeque::new(),
        }
    }

    /// Pause after each redraw.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Clear the screen before each redraw.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn render(&mut self, board: &Board) -> io::Result<()> {
        if self.clear {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        write!(self.output, "{board}")?;
        self.output.flush()?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }

    fn read_input(&mut self) -> io::Result<Input> {
        loop {
            write!(self.output, "Enter move (W/A/S/D): ")?;
            self.output.flush()?;
            let Some(token) = self.next_token()? else {
                return Ok(Input::Quit);
            };
            if token.eq_ignore_ascii_case("q") {
                return Ok(Input::Quit);
            }
            match token.parse::<Move>() {
                Ok(dir) => return Ok(Input::Move(dir)),
                Err(err) => {
                    debug!("{err}");
                    writeln!(self.output, "Invalid move! Please enter W, A, S, or D.")?;
                }
            }
        }
    }

    fn game_over(&mut self, board: &Board, score: u32) -> io::Result<()> {
        self.render(board)?;
        writeln!(self.output, "Game Over! Your score: {score}")?;
        self.output.flush()
    }
}

/// Run turns until the game ends or the player quits. Returns the score
/// when the game ended.
pub fn run<R: Rng, F: Frontend>(game: &mut Game<R>, ui: &mut F) -> io::Result<Option<u32>> {
    while game.status() == GameStatus::InProgress {
        ui.render(game.board())?;
        match ui.read_input()? {
            Input::Quit => return Ok(None),
            Input::Move(dir) => {
                game.submit_move(dir);
            }
        }
    }
    let score = game.board().max_value();
    ui.game_over(game.board(), score)?;
    Ok(Some(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TileSpawner;
    use std::io::Cursor;

    fn frontend(input: &str) -> TerminalFrontend<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalFrontend::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn render_cells() {
        let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0, 0, 1024, 0], [0; 4]]);
        let cells = render(&b);
        assert_eq!(cells[0][0], "2");
        assert_eq!(cells[0][1], "");
        assert_eq!(cells[2][2], "1024");
    }

    #[test]
    fn it_reads_moves_case_insensitively() {
        let mut ui = frontend("w A\ns\n d \n");
        assert_eq!(ui.read_input().unwrap(), Input::Move(Move::Up));
        assert_eq!(ui.read_input().unwrap(), Input::Move(Move::Left));
        assert_eq!(ui.read_input().unwrap(), Input::Move(Move::Down));
        assert_eq!(ui.read_input().unwrap(), Input::Move(Move::Right));
        assert_eq!(ui.read_input().unwrap(), Input::Quit);
    }

    #[test]
    fn it_reprompts_on_invalid_input() {
        let mut ui = frontend("x\n\nz d\n");
        assert_eq!(ui.read_input().unwrap(), Input::Move(Move::Right));
        let out = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(out.matches("Invalid move!").count(), 2);
        assert_eq!(out.matches("Enter move (W/A/S/D): ").count(), 3);
    }

    #[test]
    fn it_quits_on_q() {
        let mut ui = frontend("Q\nw\n");
        assert_eq!(ui.read_input().unwrap(), Input::Quit);
    }

    #[test]
    fn it_clears_when_asked() {
        let mut ui = frontend("").with_clear(true);
        ui.render(&Board::EMPTY).unwrap();
        let out = String::from_utf8(ui.into_output()).unwrap();
        assert!(out.starts_with(CLEAR_SCREEN));
    }

    #[test]
    fn run_stops_when_player_quits() {
        let mut game = Game::new(1);
        let before = *game.board();
        let mut ui = frontend("bogus\nq\n");
        assert_eq!(run(&mut game, &mut ui).unwrap(), None);
        assert_eq!(*game.board(), before);
        let out = String::from_utf8(ui.into_output()).unwrap();
        assert!(out.contains("Invalid move!"));
        assert!(!out.contains("Game Over"));
    }

    #[test]
    fn run_reports_score_on_finished_board() {
        let board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 128]]);
        let mut game = Game::from_board(board, TileSpawner::seeded(0));
        let mut ui = frontend("");
        assert_eq!(run(&mut game, &mut ui).unwrap(), Some(128));
        let out = String::from_utf8(ui.into_output()).unwrap();
        assert!(out.ends_with("Game Over! Your score: 128\n"));
    }

    #[test]
    fn run_plays_scripted_moves() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_board(board, TileSpawner::seeded(4));
        let mut ui = frontend("a\nq\n");
        assert_eq!(run(&mut game, &mut ui).unwrap(), None);
        assert_eq!(game.board().get(0, 0), 4);
        assert_eq!(game.moves(), 1);
    }
}
