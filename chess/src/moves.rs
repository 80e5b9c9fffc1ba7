//! Move types
//!
//! There are two kinds of moves here. [`RawMove`] is just a pair of squares with an optional
//! promotion piece, which is what the outside world (a transport layer or a move search) supplies.
//! It is not validated in any way. [`Move`] is produced by the board when the move is actually
//! applied, and describes what happened: which piece moved, what was captured and so on.

use crate::types::{CastlingSide, Color, Coord, CoordParseError, Piece, PieceKind};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
}

impl From<PromotePiece> for PieceKind {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => PieceKind::Knight,
            PromotePiece::Bishop => PieceKind::Bishop,
            PromotePiece::Rook => PieceKind::Rook,
            PromotePiece::Queen => PieceKind::Queen,
        }
    }
}

impl TryFrom<PieceKind> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: PieceKind) -> Result<Self, Self::Error> {
        match p {
            PieceKind::Knight => Ok(PromotePiece::Knight),
            PieceKind::Bishop => Ok(PromotePiece::Bishop),
            PieceKind::Rook => Ok(PromotePiece::Rook),
            PieceKind::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

impl PromotePiece {
    pub fn as_char(&self) -> char {
        PieceKind::from(*self).as_char().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<Self> {
        PieceKind::from_char(c)?.try_into().ok()
    }
}

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Non-pawn move or capture (except castling), or single pawn step
    #[default]
    Simple,
    /// Double pawn step from its initial rank
    PawnDouble,
    /// Enpassant capture
    Enpassant,
    /// Kingside castling
    CastlingKingside,
    /// Queenside castling
    CastlingQueenside,
    /// Pawn promotion (either non-capture or capture)
    Promote,
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

/// Error parsing [`RawMove`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawMoveParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
    /// Bad promotion char
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Unvalidated move request
///
/// Formatted as long algebraic notation, like `e2e4` or `e7e8q`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawMove {
    pub src: Coord,
    pub dst: Coord,
    pub promote: Option<PromotePiece>,
}

impl RawMove {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> RawMove {
        RawMove {
            src,
            dst,
            promote: None,
        }
    }

    #[inline]
    pub const fn with_promote(src: Coord, dst: Coord, promote: PromotePiece) -> RawMove {
        RawMove {
            src,
            dst,
            promote: Some(promote),
        }
    }

    /// The same squares with source and destination swapped
    #[inline]
    pub const fn reversed(&self) -> RawMove {
        RawMove::new(self.dst, self.src)
    }
}

impl fmt::Display for RawMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for RawMove {
    type Err = RawMoveParseError;

    fn from_str(s: &str) -> Result<RawMove, Self::Err> {
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(RawMoveParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(RawMoveParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(RawMoveParseError::BadDst)?;
        let promote = match s.as_bytes().get(4) {
            Some(&b) => Some(
                PromotePiece::from_char(b as char)
                    .ok_or(RawMoveParseError::BadPromote(b as char))?,
            ),
            None => None,
        };
        Ok(RawMove { src, dst, promote })
    }
}

/// Applied chess move
///
/// Moves are only created by [`Board::apply()`](crate::board::Board::apply), so a `Move` always
/// describes something that really happened on the board. It is never changed after creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    piece: Piece,
    captured: Option<Piece>,
    promote: Option<PromotePiece>,
}

impl Move {
    #[inline]
    pub(crate) const fn new(
        kind: MoveKind,
        src: Coord,
        dst: Coord,
        piece: Piece,
        captured: Option<Piece>,
        promote: Option<PromotePiece>,
    ) -> Move {
        Move {
            kind,
            src,
            dst,
            piece,
            captured,
            promote,
        }
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Piece that made the move, as it was before promotion
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color()
    }

    /// Captured piece, including the pawn taken by enpassant
    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }

    #[inline]
    pub const fn raw(&self) -> RawMove {
        RawMove {
            src: self.src,
            dst: self.dst,
            promote: self.promote,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.raw().fmt(f)
    }
}
