//! Board and related things

use crate::movegen::{self, Destinations, KingStatus};
use crate::moves::{Move, MoveKind, PromotePiece, RawMove};
use crate::types::{CastlingRights, CastlingSide, Color, Coord, CoordParseError, File, Piece, PieceKind, Rank};
use openchess_base::geometry;

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error indicating that a square outside the board was requested
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum OutOfRangeError {
    /// Numeric coordinates outside `0..8`
    #[error("coordinates ({x}, {y}) are out of range")]
    Coords { x: usize, y: usize },
    /// Square in algebraic notation which cannot be parsed
    #[error("bad square {0:?}: {1}")]
    Notation(String, CoordParseError),
}

/// Parses a square in algebraic notation, like `E2` or `e2`
pub fn parse_square(s: &str) -> Result<Coord, OutOfRangeError> {
    Coord::from_str(s).map_err(|e| OutOfRangeError::Notation(s.to_string(), e))
}

/// Single board square
///
/// The coordinates of the square never change. The square owns the piece standing on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    coord: Coord,
    piece: Option<Piece>,
}

impl Square {
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.coord.x()
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.coord.y()
    }

    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

/// Chess board
///
/// The board owns all 64 squares in a flat array indexed by [`Coord::index()`]. Apart from the
/// pieces, it remembers castling rights and the enpassant destination created by the last double
/// pawn step, as these are needed to compute legal moves.
///
/// The board also keeps the currently selected ("active") square, which is transient state used
/// by the click-to-move protocol in [`Game`](crate::game::Game). At most one square is selected
/// at any time.
///
/// # Example
///
/// ```
/// # use openchess::{Board, Color};
/// #
/// let board = Board::initial();
/// assert_eq!(board.count(Color::White), 16);
/// assert_eq!(board.square_at(4, 1).unwrap().piece().unwrap().symbol(), 'P');
/// assert!(board.square_at(8, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Square; 64],
    active: Option<Coord>,
    castling: CastlingRights,
    ep_dest: Option<Coord>,
}

impl Board {
    /// Returns a board without any pieces
    pub fn empty() -> Board {
        let mut squares = [Square {
            coord: Coord::from_index(0),
            piece: None,
        }; 64];
        for coord in Coord::iter() {
            squares[coord.index()].coord = coord;
        }
        Board {
            squares,
            active: None,
            castling: CastlingRights::EMPTY,
            ep_dest: None,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        res.set_pieces_for_new_game();
        res
    }

    /// Puts all the 32 pieces on their initial squares
    ///
    /// Everything else on the board is cleared, including the selection.
    pub fn set_pieces_for_new_game(&mut self) {
        *self = Board::empty();
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                self.put2(file, geometry::home_rank(color), Some(Piece::new(color, kind)));
                self.put2(
                    file,
                    geometry::pawn_rank(color),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        self.castling = CastlingRights::FULL;
    }

    /// Returns the square at `(x, y)`, where `x` is the file and `y` is the rank, both zero-based
    pub fn square_at(&self, x: usize, y: usize) -> Result<&Square, OutOfRangeError> {
        let coord = Coord::try_new(x, y).ok_or(OutOfRangeError::Coords { x, y })?;
        Ok(self.square(coord))
    }

    #[inline]
    pub fn square(&self, c: Coord) -> &Square {
        &self.squares[c.index()]
    }

    /// Returns the piece on the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.squares[c.index()].piece
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `piece` to the square with coordinate `c`, replacing whatever stood there
    ///
    /// This is intended for setting up positions. Castling rights are not adjusted, use
    /// [`Board::set_castling()`] for that.
    #[inline]
    pub fn put(&mut self, c: Coord, piece: Option<Piece>) {
        self.squares[c.index()].piece = piece;
    }

    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, piece: Option<Piece>) {
        self.put(Coord::from_parts(file, rank), piece);
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn set_castling(&mut self, castling: CastlingRights) {
        self.castling = castling;
    }

    /// Returns the square a pawn may capture enpassant onto, if any
    #[inline]
    pub fn ep_dest(&self) -> Option<Coord> {
        self.ep_dest
    }

    /// Marks the square `c` as active. Any previous selection is dropped.
    #[inline]
    pub fn select(&mut self, c: Coord) {
        self.active = Some(c);
    }

    #[inline]
    pub fn unselect(&mut self) {
        self.active = None;
    }

    #[inline]
    pub fn active(&self) -> Option<Coord> {
        self.active
    }

    #[inline]
    pub fn active_square(&self) -> Option<&Square> {
        self.active.map(|c| self.square(c))
    }

    /// Iterates over all the pieces of color `c` together with their coordinates
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares.iter().filter_map(move |sq| match sq.piece {
            Some(p) if p.color() == c => Some((sq.coord, p)),
            _ => None,
        })
    }

    pub fn count(&self, c: Color) -> usize {
        self.pieces(c).count()
    }

    /// Returns the position of the king of color `c`
    ///
    /// # Panics
    ///
    /// Panics if there is no such king on the board.
    pub fn king_pos(&self, c: Color) -> Coord {
        self.try_king_pos(c)
            .unwrap_or_else(|| panic!("no {} king on the board", c))
    }

    pub fn try_king_pos(&self, c: Color) -> Option<Coord> {
        let king = Piece::new(c, PieceKind::King);
        self.pieces(c).find(|&(_, p)| p == king).map(|(coord, _)| coord)
    }

    /// Returns `true` if the king of color `c` is in check
    #[inline]
    pub fn is_check(&self, c: Color) -> bool {
        movegen::is_check(self, c)
    }

    /// Returns the legal destinations for the piece on `src`
    ///
    /// See [`movegen::legal_moves()`].
    #[inline]
    pub fn legal_moves(&self, src: Coord) -> Destinations {
        movegen::legal_moves(self, src)
    }

    /// Checks whether the king of color `c` is checkmated or stalemated
    #[inline]
    pub fn king_status(&self, c: Color) -> KingStatus {
        movegen::king_status(self, c)
    }

    /// Moves the piece from `from` to `to`, capturing whatever stands on `to`
    ///
    /// Same as [`Board::apply()`] without promotion choice.
    #[inline]
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Move {
        self.apply(RawMove::new(from, to))
    }

    /// Applies the move to the board and returns its full description
    ///
    /// The move is **not** checked for legality, this is the caller's job. Castling (the king
    /// moves two files), enpassant and promotion are recognized from the squares. If a pawn
    /// reaches its last rank and no promotion piece is given, it becomes a queen.
    ///
    /// # Panics
    ///
    /// Panics if there is no piece on the source square.
    pub fn apply(&mut self, mv: RawMove) -> Move {
        let piece = self
            .get(mv.src)
            .unwrap_or_else(|| panic!("no piece to move on {}", mv.src));
        let color = piece.color();
        let dx = mv.dst.x() as isize - mv.src.x() as isize;
        let dy = mv.dst.y() as isize - mv.src.y() as isize;

        let mut kind = MoveKind::Simple;
        let mut captured = self.get(mv.dst);
        let mut promote = None;

        match piece.kind() {
            PieceKind::Pawn => {
                if dy.abs() == 2 {
                    kind = MoveKind::PawnDouble;
                } else if dx != 0 && captured.is_none() && Some(mv.dst) == self.ep_dest {
                    kind = MoveKind::Enpassant;
                    let taken = Coord::from_parts(mv.dst.file(), mv.src.rank());
                    captured = self.squares[taken.index()].piece.take();
                }
                if mv.dst.rank() == geometry::promote_rank(color) {
                    kind = MoveKind::Promote;
                    promote = Some(mv.promote.unwrap_or(PromotePiece::Queen));
                }
            }
            PieceKind::King if dx.abs() == 2 => {
                let side = if dx > 0 {
                    CastlingSide::King
                } else {
                    CastlingSide::Queen
                };
                kind = MoveKind::from(side);
                let (rook_src, rook_dst) = match side {
                    CastlingSide::King => (File::H, File::F),
                    CastlingSide::Queen => (File::A, File::D),
                };
                let rank = mv.src.rank();
                let rook = self.squares[Coord::from_parts(rook_src, rank).index()].piece.take();
                self.put2(rook_dst, rank, rook);
            }
            _ => {}
        }

        let placed = match promote {
            Some(p) => Piece::new(color, p.into()),
            None => piece,
        };
        self.put(mv.src, None);
        self.put(mv.dst, Some(placed));

        if piece.kind() == PieceKind::King {
            self.castling.unset_color(color);
        }
        self.revoke_rook_castling(mv.src);
        self.revoke_rook_castling(mv.dst);
        self.ep_dest = match kind {
            MoveKind::PawnDouble => Some(Coord::from_parts(
                mv.src.file(),
                Rank::from_index((mv.src.y() + mv.dst.y()) / 2),
            )),
            _ => None,
        };

        Move::new(kind, mv.src, mv.dst, piece, captured, promote)
    }

    fn revoke_rook_castling(&mut self, c: Coord) {
        for color in [Color::White, Color::Black] {
            let rank = geometry::home_rank(color);
            if c == Coord::from_parts(File::A, rank) {
                self.castling.unset(color, CastlingSide::Queen);
            }
            if c == Coord::from_parts(File::H, rank) {
                self.castling.unset(color, CastlingSide::King);
            }
        }
    }

    /// Returns a plain textual dump of the board
    ///
    /// There is one line per rank, starting from rank 8. Each square is written as its piece
    /// symbol (nothing for an empty square) followed by `", "`.
    ///
    /// ```
    /// # use openchess::Board;
    /// #
    /// let dump = Board::initial().dump();
    /// let mut lines = dump.lines();
    /// assert_eq!(lines.next(), Some("r, n, b, q, k, b, n, r, "));
    /// assert_eq!(lines.nth(2), Some(", , , , , , , , "));
    /// ```
    pub fn dump(&self) -> String {
        let mut res = String::with_capacity(8 * 25);
        for rank in Rank::iter_top_down() {
            for file in File::iter() {
                if let Some(p) = self.get2(file, rank) {
                    res.push(p.symbol());
                }
                res.push_str(", ");
            }
            res.push('\n');
        }
        res
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use openchess::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.dump())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

struct Frame {
    horz: char,
    vert: char,
    corner: char,
    empty: char,
    piece: fn(&Piece) -> char,
}

const ASCII_FRAME: Frame = Frame {
    horz: '-',
    vert: '|',
    corner: '+',
    empty: '.',
    piece: Piece::symbol,
};

const UTF8_FRAME: Frame = Frame {
    horz: '─',
    vert: '│',
    corner: '┼',
    empty: '·',
    piece: Piece::utf8_symbol,
};

impl PrettyStyle {
    fn frame(self) -> &'static Frame {
        match self {
            PrettyStyle::Ascii => &ASCII_FRAME,
            PrettyStyle::Utf8 => &UTF8_FRAME,
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let frame = self.style.frame();
        for rank in Rank::iter_top_down() {
            let row: String = File::iter()
                .map(|file| {
                    self.board
                        .get2(file, rank)
                        .map_or(frame.empty, |p| (frame.piece)(&p))
                })
                .collect();
            writeln!(f, "{}{}{}", rank, frame.vert, row)?;
        }
        let line: String = File::iter().map(|_| frame.horz).collect();
        writeln!(f, "{}{}{}", frame.horz, frame.corner, line)?;
        let files: String = File::iter().map(|file| file.as_char()).collect();
        writeln!(f, " {}{}", frame.vert, files)?;
        if let Some(active) = self.board.active() {
            writeln!(f, "selected: {}", active)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        for color in [Color::White, Color::Black] {
            assert_eq!(b.count(color), 16);
            let kings = b
                .pieces(color)
                .filter(|(_, p)| p.kind() == PieceKind::King)
                .count();
            assert_eq!(kings, 1);
            let pawn_rank = geometry::pawn_rank(color);
            for file in File::iter() {
                assert_eq!(
                    b.get2(file, pawn_rank),
                    Some(Piece::new(color, PieceKind::Pawn))
                );
            }
        }
        assert_eq!(b.king_pos(Color::White), c("e1"));
        assert_eq!(b.king_pos(Color::Black), c("e8"));
        assert_eq!(b.castling(), CastlingRights::FULL);
        assert_eq!(b.active(), None);
    }

    #[test]
    fn test_square_at() {
        let b = Board::initial();
        let sq = b.square_at(3, 0).unwrap();
        assert_eq!(sq.coord(), c("d1"));
        assert_eq!((sq.x(), sq.y()), (3, 0));
        assert_eq!(sq.piece(), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert!(b.square_at(3, 4).unwrap().is_empty());
        assert_eq!(b.square_at(8, 3), Err(OutOfRangeError::Coords { x: 8, y: 3 }));
        assert_eq!(b.square_at(0, 100), Err(OutOfRangeError::Coords { x: 0, y: 100 }));
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("E2"), Ok(c("e2")));
        assert_eq!(
            parse_square("J2"),
            Err(OutOfRangeError::Notation(
                "J2".to_string(),
                CoordParseError::UnexpectedFileChar('J')
            ))
        );
        assert!(parse_square("").is_err());
    }

    #[test]
    fn test_select() {
        let mut b = Board::initial();
        b.select(c("e2"));
        assert_eq!(b.active(), Some(c("e2")));
        b.select(c("d2"));
        assert_eq!(b.active_square().map(|s| s.coord()), Some(c("d2")));
        b.unselect();
        b.unselect();
        assert_eq!(b.active(), None);
    }

    #[test]
    fn test_move_and_back() {
        let mut b = Board::initial();
        let before = b.clone();
        let mv = b.move_piece(c("g1"), c("f3"));
        assert_eq!(mv.piece(), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(mv.captured(), None);
        assert!(b.get(c("g1")).is_none());
        b.move_piece(c("f3"), c("g1"));
        assert_eq!(b.get(c("g1")), before.get(c("g1")));
        assert_eq!(b.get(c("f3")), None);
    }

    #[test]
    fn test_capture() {
        let mut b = Board::initial();
        let mv = b.move_piece(c("d1"), c("d7"));
        assert_eq!(mv.captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(b.count(Color::Black), 15);
        assert_eq!(b.get(c("d7")), Some(Piece::new(Color::White, PieceKind::Queen)));
    }

    #[test]
    fn test_double_step_and_enpassant() {
        let mut b = Board::initial();
        let mv = b.move_piece(c("e2"), c("e4"));
        assert_eq!(mv.kind(), MoveKind::PawnDouble);
        assert_eq!(b.ep_dest(), Some(c("e3")));
        b.move_piece(c("e4"), c("e5"));
        assert_eq!(b.ep_dest(), None);
        b.move_piece(c("d7"), c("d5"));
        assert_eq!(b.ep_dest(), Some(c("d6")));

        let mv = b.move_piece(c("e5"), c("d6"));
        assert_eq!(mv.kind(), MoveKind::Enpassant);
        assert_eq!(mv.captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(b.get(c("d5")), None);
        assert_eq!(b.count(Color::Black), 15);
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut b = Board::initial();
        for sq in ["f1", "g1", "b8", "c8", "d8"] {
            b.put(c(sq), None);
        }
        let mv = b.move_piece(c("e1"), c("g1"));
        assert_eq!(mv.kind(), MoveKind::CastlingKingside);
        assert_eq!(b.get(c("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(b.get(c("h1")), None);
        assert_eq!(b.castling().to_string(), "kq");

        let mv = b.move_piece(c("e8"), c("c8"));
        assert_eq!(mv.kind(), MoveKind::CastlingQueenside);
        assert_eq!(b.get(c("d8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(b.get(c("a8")), None);
        assert_eq!(b.castling(), CastlingRights::EMPTY);
    }

    #[test]
    fn test_rook_moves_revoke_castling() {
        let mut b = Board::initial();
        b.put(c("a2"), None);
        b.move_piece(c("a1"), c("a5"));
        assert_eq!(b.castling().to_string(), "Kkq");
        b.put(c("h7"), None);
        b.move_piece(c("h8"), c("h2"));
        assert_eq!(b.castling().to_string(), "Kq");
        b.move_piece(c("h2"), c("h1"));
        assert_eq!(b.castling().to_string(), "q");
    }

    #[test]
    fn test_promote() {
        let mut b = Board::empty();
        b.put(c("b7"), Some(Piece::new(Color::White, PieceKind::Pawn)));
        b.put(c("a8"), Some(Piece::new(Color::Black, PieceKind::Rook)));
        b.put(c("g2"), Some(Piece::new(Color::Black, PieceKind::Pawn)));

        let mv = b.apply(RawMove::with_promote(c("b7"), c("a8"), PromotePiece::Knight));
        assert_eq!(mv.kind(), MoveKind::Promote);
        assert_eq!(mv.promote(), Some(PromotePiece::Knight));
        assert_eq!(mv.captured(), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(b.get(c("a8")), Some(Piece::new(Color::White, PieceKind::Knight)));

        let mv = b.move_piece(c("g2"), c("g1"));
        assert_eq!(mv.promote(), Some(PromotePiece::Queen));
        assert_eq!(b.get(c("g1")), Some(Piece::new(Color::Black, PieceKind::Queen)));
    }

    #[test]
    #[should_panic]
    fn test_move_from_empty() {
        let mut b = Board::initial();
        b.move_piece(c("e4"), c("e5"));
    }

    #[test]
    fn test_dump() {
        let b = Board::initial();
        let expected = "r, n, b, q, k, b, n, r, \n\
                        p, p, p, p, p, p, p, p, \n\
                        , , , , , , , , \n\
                        , , , , , , , , \n\
                        , , , , , , , , \n\
                        , , , , , , , , \n\
                        P, P, P, P, P, P, P, P, \n\
                        R, N, B, Q, K, B, N, R, \n";
        assert_eq!(b.dump(), expected);
        assert_eq!(b.to_string(), expected);
    }

    #[test]
    fn test_pretty_utf8() {
        let b = Board::initial();
        let s = b.pretty(PrettyStyle::Utf8).to_string();
        assert!(s.starts_with("8│♜♞♝♛♚♝♞♜\n"));
        assert!(s.contains("1│♖♘♗♕♔♗♘♖\n"));
    }

    #[test]
    fn test_pretty_selection() {
        let mut b = Board::initial();
        let s = b.pretty(PrettyStyle::Ascii).to_string();
        assert!(s.ends_with("-+--------\n |abcdefgh\n"));
        assert!(s.contains("4|........\n"));

        b.select(c("g1"));
        let s = b.pretty(PrettyStyle::Ascii).to_string();
        assert!(s.ends_with(" |abcdefgh\nselected: g1\n"));
        let s = b.pretty(PrettyStyle::Utf8).to_string();
        assert!(s.contains("4│········\n"));
        assert!(s.ends_with("selected: g1\n"));
    }
}
