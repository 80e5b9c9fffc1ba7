//! In-process facade for transports
//!
//! [`Engine`] plays a single game between a remote human and the computer. Squares are passed
//! as algebraic strings, like `"E2"`, and each reply carries the computer's move together with
//! the textual board dump. Encoding the replies into some wire format is up to the transport.

use crate::board::parse_square;
use crate::game::{Game, GameError};
use crate::moves::{Move, RawMove};
use crate::search::{MoveSearch, RandomSearch};
use crate::settings::Settings;

use tracing::info;

/// Result of a facade operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A move was made. The squares are in uppercase algebraic notation, like `"E2"`.
    Move {
        start: String,
        end: String,
        board: String,
    },
    /// Status message, without any move
    Status(String),
}

type SearchFactory = Box<dyn FnMut() -> Box<dyn MoveSearch + Send> + Send>;

/// Holds the current game and translates transport requests into game operations
pub struct Engine {
    game: Option<Game>,
    make_search: SearchFactory,
}

impl Engine {
    /// Creates an engine where the computer plays random moves
    pub fn new() -> Engine {
        Engine::with_search(|| Box::new(RandomSearch::new()))
    }

    /// Creates an engine which calls `make_search` to get the search for each new game
    pub fn with_search<F>(make_search: F) -> Engine
    where
        F: FnMut() -> Box<dyn MoveSearch + Send> + Send + 'static,
    {
        Engine {
            game: None,
            make_search: Box::new(make_search),
        }
    }

    /// Returns the current game, if any
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn game_mut(&mut self) -> Result<&mut Game, GameError> {
        self.game.as_mut().ok_or(GameError::NotStarted)
    }

    /// Starts a new game, replacing the current one
    ///
    /// If `first_mover_is_computer` is set, the computer plays White and makes its first move
    /// right away. Otherwise, the human plays White and may pass the first move in `start` and
    /// `end`, so the reply already contains the computer's answer.
    pub fn new_game(
        &mut self,
        first_mover_is_computer: bool,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Reply, GameError> {
        let mut game = Game::new(Settings::against_computer(first_mover_is_computer));
        game.set_boxed_search((self.make_search)());
        game.new_game()?;
        info!(first_mover_is_computer, "engine started new game");
        let game = self.game.insert(game);

        if first_mover_is_computer {
            let mv = game.computer_move()?;
            return Ok(move_reply(game, &mv));
        }
        match (start, end) {
            (Some(start), Some(end)) => self.make_move(start, end),
            _ => Ok(Reply::Status("Game started".to_string())),
        }
    }

    /// Makes the human's move from `start` to `end` and returns the computer's reply
    ///
    /// If the game ends right after the human's move, the reply is that move itself. The move
    /// is refused with [`GameError::NotYourTurn`] if the side to move is not the human's.
    pub fn make_move(&mut self, start: &str, end: &str) -> Result<Reply, GameError> {
        let game = self.game_mut()?;
        if game.is_ended() {
            return Err(GameError::GameAlreadyEnded);
        }
        if !game.active_player().is_local() {
            return Err(GameError::NotYourTurn);
        }
        let mv = RawMove::new(parse_square(start)?, parse_square(end)?);
        let mut last = game.simulate_move(mv)?;
        if !game.is_ended() && !game.active_player().is_local() {
            last = game.computer_move()?;
        }
        Ok(move_reply(game, &last))
    }

    /// Ends the current game
    pub fn quit(&mut self) -> Result<Reply, GameError> {
        let game = self.game_mut()?;
        if !game.is_ended() {
            game.end_game("Quitting Game");
        }
        Ok(Reply::Status("Game has ended".to_string()))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn move_reply(game: &Game, mv: &Move) -> Reply {
    Reply::Move {
        start: mv.src().as_upper(),
        end: mv.dst().as_upper(),
        board: game.board().dump(),
    }
}
