//! Core types
//!
//! Most of the coordinate types live in `openchess_base` and are re-exported here.

pub use openchess_base::types::{
    CastlingRights, CastlingSide, Color, Coord, CoordParseError, File, PieceKind, Rank,
};

use std::fmt;

/// Chess piece
///
/// A piece always has the color of the player who owns it. The kind decides which
/// movement rule applies to it, see [`movegen`](crate::movegen).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the symbol of the piece: uppercase for White, lowercase for Black
    pub fn symbol(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Returns the Unicode chess symbol of the piece
    pub fn utf8_symbol(&self) -> char {
        const WHITE: [char; PieceKind::COUNT] = ['♙', '♘', '♗', '♖', '♕', '♔'];
        const BLACK: [char; PieceKind::COUNT] = ['♟', '♞', '♝', '♜', '♛', '♚'];
        match self.color {
            Color::White => WHITE[self.kind as usize],
            Color::Black => BLACK[self.kind as usize],
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, PieceKind::from_char(c)?))
    }

    /// Material value in pawns, used by the reference searches
    pub const fn value(&self) -> u32 {
        match self.kind {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::iter() {
                let piece = Piece::new(color, kind);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.kind(), kind);
                assert_eq!(Piece::from_symbol(piece.symbol()), Some(piece));
            }
        }
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).symbol(), 'N');
        assert_eq!(Piece::new(Color::Black, PieceKind::King).symbol(), 'k');
        assert_eq!(Piece::new(Color::Black, PieceKind::Queen).utf8_symbol(), '♛');
        assert_eq!(Piece::from_symbol('x'), None);
    }
}
