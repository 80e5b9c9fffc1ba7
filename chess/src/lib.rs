//! Chess game engine
//!
//! The crate contains the board with legal move generation, players, the move history and the
//! [`Game`] which runs the match between local, remote and computer players. The computer's moves
//! come from a [`MoveSearch`], which is injected into the game.
//!
//! [`api::Engine`] is a thin facade for transports which talk in algebraic square names.

pub mod api;
pub mod board;
pub mod game;
pub mod history;
pub mod movegen;
pub mod moves;
pub mod player;
pub mod search;
pub mod settings;
pub mod types;

pub use board::{Board, OutOfRangeError, PrettyStyle, Square};
pub use game::{Action, Game, GameError, GameState};
pub use history::MovesHistory;
pub use movegen::KingStatus;
pub use moves::{Move, MoveKind, PromotePiece, RawMove};
pub use player::{Player, PlayerKind};
pub use search::{GreedySearch, MoveSearch, RandomSearch};
pub use settings::Settings;
pub use types::{CastlingRights, CastlingSide, Color, Coord, File, Piece, PieceKind, Rank};
