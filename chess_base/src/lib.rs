//! # Base types for openchess
//!
//! This is an auxiliary crate for `openchess`, which contains coordinates, colors and piece kinds.
//! It was split from the main crate, so collaborators that only need to translate algebraic
//! notation (such as a transport layer) don't have to depend on the engine itself.

pub mod geometry;
pub mod types;

pub use types::{CastlingRights, CastlingSide, Color, Coord, CoordParseError, File, PieceKind, Rank};
