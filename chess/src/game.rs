//! Game orchestration
//!
//! [`Game`] owns the board, the history and the turn order, and exposes the move protocol used by
//! all the callers: click-like [`Game::move_at()`] for interactive input, [`Game::simulate_move()`]
//! for callers which know both squares in advance, and [`Game::computer_move()`] to let the move
//! search play. All of them go through the same commit step, so each accepted move results in
//! exactly one state transition.
//!
//! A single `Game` must not be mutated concurrently. Different games share nothing, so they can
//! live on different threads.

use crate::board::{Board, OutOfRangeError};
use crate::history::MovesHistory;
use crate::movegen::{self, KingStatus};
use crate::moves::{Move, RawMove};
use crate::player::{Player, PlayerKind};
use crate::search::MoveSearch;
use crate::settings::Settings;
use crate::types::{Color, Coord};

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Error returned by game operations
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    /// Coordinates outside the board
    #[error("{0}")]
    OutOfRange(#[from] OutOfRangeError),
    /// The move is not legal for the side to move
    #[error("illegal move {src}{dst}")]
    IllegalMove { src: Coord, dst: Coord },
    /// The game has already ended, no more moves are accepted
    #[error("game already ended")]
    GameAlreadyEnded,
    /// [`Game::new_game()`] wasn't called yet
    #[error("game is not started")]
    NotStarted,
    /// The side to move is not played by the computer
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    /// The side to move is not played by the caller
    #[error("it is not the player's turn")]
    NotYourTurn,
    /// The move search returned a move which is not legal
    #[error("computer chose illegal move {0}")]
    IllegalAiMove(RawMove),
    /// There is no move search, or it returned no move
    #[error("computer didn't choose any move")]
    NoAiMove,
}

/// Game lifecycle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// The game is created, but the pieces are not set up yet
    Setup,
    /// The game is being played
    InProgress,
    /// The game is over; this state is final
    Ended,
}

/// What [`Game::move_at()`] did
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing happened
    Rejected,
    /// The square with the piece of the side to move became active
    Selected(Coord),
    /// The active square was clicked again, so it's not active anymore
    Unselected,
    /// The selected piece was moved. If the computer plays next, `reply` contains its move.
    Moved { mv: Move, reply: Option<Move> },
}

impl Action {
    /// Returns the move made by this action, not counting the computer's reply
    pub fn moved(&self) -> Option<Move> {
        match *self {
            Action::Moved { mv, .. } => Some(mv),
            _ => None,
        }
    }
}

/// Single chess game
///
/// # Example
///
/// ```
/// # use openchess::{Game, GameState, Settings, Color};
/// #
/// let mut game = Game::new(Settings::local_pair());
/// game.new_game().unwrap();
///
/// // Select the pawn on e2, then move it to e4
/// game.move_at(4, 1).unwrap();
/// let action = game.move_at(4, 3).unwrap();
/// assert_eq!(action.moved().unwrap().to_string(), "e2e4");
/// assert_eq!(game.active_color(), Color::Black);
/// assert_eq!(game.state(), GameState::InProgress);
/// ```
pub struct Game {
    settings: Settings,
    board: Board,
    history: MovesHistory,
    active: Color,
    blocked: bool,
    state: GameState,
    end_message: Option<String>,
    search: Option<Box<dyn MoveSearch + Send>>,
}

impl Game {
    pub fn new(settings: Settings) -> Game {
        Game {
            settings,
            board: Board::empty(),
            history: MovesHistory::new(),
            active: Color::White,
            blocked: false,
            state: GameState::Setup,
            end_message: None,
            search: None,
        }
    }

    /// Sets the move search used by computer players
    pub fn with_search(mut self, search: impl MoveSearch + Send + 'static) -> Game {
        self.set_search(search);
        self
    }

    pub fn set_search(&mut self, search: impl MoveSearch + Send + 'static) {
        self.search = Some(Box::new(search));
    }

    pub fn set_boxed_search(&mut self, search: Box<dyn MoveSearch + Send>) {
        self.search = Some(search);
    }

    /// Starts the game from the initial position, with White to move
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.new_game_from(Board::initial(), Color::White)
    }

    /// Starts the game from an arbitrary position, with `side` to move
    ///
    /// The position is expected to have both kings on the board.
    pub fn new_game_from(&mut self, board: Board, side: Color) -> Result<(), GameError> {
        if self.state == GameState::Ended {
            return Err(GameError::GameAlreadyEnded);
        }
        self.board = board;
        self.board.unselect();
        self.history = MovesHistory::new();
        self.active = side;
        self.state = GameState::InProgress;
        self.end_message = None;
        self.blocked = !self.active_player().is_local();
        info!(
            white = %self.settings.white(),
            black = %self.settings.black(),
            "new game"
        );
        self.check_end();
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MovesHistory {
        &self.history
    }

    /// Number of plies played so far
    pub fn plies(&self) -> usize {
        self.history.len()
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        self.settings.player(self.active)
    }

    /// Returns `true` if the input from the local player is not accepted now
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == GameState::Ended
    }

    /// Message describing how the game ended
    pub fn end_message(&self) -> Option<&str> {
        self.end_message.as_deref()
    }

    /// Switches the side to move
    ///
    /// The input gate is closed if the new player is not a local one, and opened otherwise.
    pub fn switch_active(&mut self) {
        self.active = self.active.inv();
        self.blocked = !self.active_player().is_local();
    }

    /// Passes the turn to the other player
    pub fn next_move(&mut self) {
        self.switch_active();
        let player = self.active_player();
        debug!(
            player = player.name(),
            color = %player.color(),
            kind = %player.kind(),
            blocked = self.blocked,
            "next move"
        );
    }

    /// Ends the game. No moves are accepted after that.
    pub fn end_game(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(plies = self.history.len(), "game ended: {}", message);
        self.blocked = true;
        self.state = GameState::Ended;
        self.end_message = Some(message);
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Setup => Err(GameError::NotStarted),
            GameState::InProgress => Ok(()),
            GameState::Ended => Err(GameError::GameAlreadyEnded),
        }
    }

    /// Handles a click on the square `(x, y)`
    ///
    /// Depending on the square and the current selection, this either selects a piece of the side
    /// to move, removes the selection, or moves the selected piece to the square. Anything else
    /// is silently ignored and reported as [`Action::Rejected`], as well as any input while the
    /// local input is blocked.
    ///
    /// After the move, if the computer is to play, its reply is made right away.
    pub fn move_at(&mut self, x: usize, y: usize) -> Result<Action, GameError> {
        let coord = Coord::try_new(x, y).ok_or(OutOfRangeError::Coords { x, y })?;
        self.ensure_in_progress()?;
        if self.blocked {
            debug!(square = %coord, "input is blocked");
            return Ok(Action::Rejected);
        }

        let own = self.board.get(coord).map(|p| p.color()) == Some(self.active);
        let active = self.board.active();

        if active.is_none() && !own {
            return Ok(Action::Rejected);
        }
        if own && active != Some(coord) {
            self.board.unselect();
            self.board.select(coord);
            return Ok(Action::Selected(coord));
        }
        if active == Some(coord) {
            self.board.unselect();
            return Ok(Action::Unselected);
        }

        let src = match active {
            Some(src) => src,
            None => return Ok(Action::Rejected),
        };
        assert!(
            self.board.get(src).is_some(),
            "active square {} holds no piece",
            src
        );
        if !self.board.legal_moves(src).contains(&coord) {
            debug!(src = %src, dst = %coord, "bad move");
            return Ok(Action::Rejected);
        }

        let mv = self.commit(RawMove::new(src, coord));
        let reply = if self.can_do_computer_move() {
            Some(self.computer_move()?)
        } else {
            None
        };
        Ok(Action::Moved { mv, reply })
    }

    /// Selects, validates and makes the move in one step
    ///
    /// This is meant for the callers which get both squares at once, like a remote player. The
    /// input gate is not considered, and no computer reply is made. If the move is illegal,
    /// nothing changes on the board, the selection included.
    pub fn simulate_move(&mut self, mv: RawMove) -> Result<Move, GameError> {
        self.ensure_in_progress()?;
        let prev = self.board.active();
        self.board.select(mv.src);
        if !movegen::is_legal(&self.board, mv, self.active) {
            match prev {
                Some(c) => self.board.select(c),
                None => self.board.unselect(),
            }
            debug!(mv = %mv, "bad move");
            return Err(GameError::IllegalMove {
                src: mv.src,
                dst: mv.dst,
            });
        }
        Ok(self.commit(mv))
    }

    fn can_do_computer_move(&self) -> bool {
        self.state == GameState::InProgress
            && self.active_player().kind() == PlayerKind::Computer
            && self.search.is_some()
    }

    /// Asks the move search for a move and makes it
    ///
    /// If the search returns an illegal move or no move at all, nothing is applied and the game
    /// is ended, as the search cannot be trusted anymore.
    pub fn computer_move(&mut self) -> Result<Move, GameError> {
        self.ensure_in_progress()?;
        if self.active_player().kind() != PlayerKind::Computer {
            return Err(GameError::NotComputerTurn);
        }
        let search = self.search.as_mut().ok_or(GameError::NoAiMove)?;
        let mv = match search.select_move(&self.board, self.active, self.history.last()) {
            Some(mv) => mv,
            None => {
                warn!(color = %self.active, "computer didn't choose any move");
                self.end_game("Computer didn't choose any move");
                return Err(GameError::NoAiMove);
            }
        };
        if !movegen::is_legal(&self.board, mv, self.active) {
            warn!(mv = %mv, color = %self.active, "computer chose illegal move");
            self.end_game(format!("Computer chose illegal move {}", mv));
            return Err(GameError::IllegalAiMove(mv));
        }
        Ok(self.commit(mv))
    }

    /// Lets the computer play until the game ends
    ///
    /// If the game is still going after [`Settings::max_plies()`] plies in total, it's ended as
    /// a draw.
    pub fn play_self(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let max_plies = self.settings.max_plies();
        while !self.is_ended() {
            if self.plies() >= max_plies {
                self.end_game(format!(
                    "Over {} moves were made, ending game in draw",
                    max_plies
                ));
                break;
            }
            self.computer_move()?;
        }
        Ok(())
    }

    fn commit(&mut self, mv: RawMove) -> Move {
        let applied = self.board.apply(mv);
        debug!(mv = %applied, color = %applied.color(), "move made");
        self.history.push(applied);
        self.board.unselect();
        self.next_move();
        self.check_end();
        applied
    }

    fn check_end(&mut self) {
        match movegen::king_status(&self.board, self.active) {
            KingStatus::None => {}
            KingStatus::Checkmate => {
                self.end_game(format!("Checkmate! {} player lose!", self.active));
            }
            KingStatus::Stalemate => self.end_game("Stalemate! Draw!"),
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("settings", &self.settings)
            .field("board", &self.board)
            .field("history", &self.history)
            .field("active", &self.active)
            .field("blocked", &self.blocked)
            .field("state", &self.state)
            .field("end_message", &self.end_message)
            .finish_non_exhaustive()
    }
}
