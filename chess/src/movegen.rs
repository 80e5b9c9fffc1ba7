//! Move generation
//!
//! Moves are generated in two steps. First, the movement pattern of the piece gives the
//! candidate destinations ([`pattern_moves()`]). Then each candidate is applied to a copy of the
//! board, and the ones leaving the mover's king in check are dropped ([`legal_moves()`]).

use crate::board::Board;
use crate::moves::RawMove;
use crate::types::{CastlingSide, Color, Coord, File, Piece, PieceKind};
use openchess_base::geometry;

use arrayvec::ArrayVec;

/// Destinations of a single piece
///
/// A queen in the center of an empty board has 27 moves, and no piece can have more.
pub type Destinations = ArrayVec<Coord, 27>;

/// Result of [`king_status()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KingStatus {
    /// The side has at least one legal move
    None,
    /// The side is in check and has no legal moves
    Checkmate,
    /// The side is not in check, but has no legal moves
    Stalemate,
}

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIAG_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const LINE_DIRS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

fn is_diag_slider(p: Piece) -> bool {
    matches!(p.kind(), PieceKind::Bishop | PieceKind::Queen)
}

fn is_line_slider(p: Piece) -> bool {
    matches!(p.kind(), PieceKind::Rook | PieceKind::Queen)
}

fn first_on_ray(b: &Board, from: Coord, (dx, dy): (isize, isize)) -> Option<Piece> {
    let mut cur = from;
    while let Some(next) = cur.try_shift(dx, dy) {
        if let Some(p) = b.get(next) {
            return Some(p);
        }
        cur = next;
    }
    None
}

/// Returns `true` if the square `coord` is attacked by any piece of color `by`
pub fn is_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    // A pawn attacks forward, so we look for it one rank behind from its point of view
    let back = -geometry::pawn_forward_delta(by);
    let pawn = Piece::new(by, PieceKind::Pawn);
    for dx in [-1, 1] {
        if coord.try_shift(dx, back).and_then(|c| b.get(c)) == Some(pawn) {
            return true;
        }
    }

    // Near attacks
    let knight = Piece::new(by, PieceKind::Knight);
    let king = Piece::new(by, PieceKind::King);
    let near = |deltas: &[(isize, isize)], target: Piece| {
        deltas
            .iter()
            .filter_map(|&(dx, dy)| coord.try_shift(dx, dy))
            .any(|c| b.get(c) == Some(target))
    };
    if near(&KNIGHT_DELTAS, knight) || near(&KING_DELTAS, king) {
        return true;
    }

    // Far attacks
    let far = |dirs: &[(isize, isize)], is_slider: fn(Piece) -> bool| {
        dirs.iter().any(|&dir| match first_on_ray(b, coord, dir) {
            Some(p) => p.color() == by && is_slider(p),
            None => false,
        })
    };
    far(&DIAG_DIRS, is_diag_slider) || far(&LINE_DIRS, is_line_slider)
}

/// Returns `true` if the king of color `c` is in check
pub fn is_check(b: &Board, c: Color) -> bool {
    is_attacked(b, b.king_pos(c), c.inv())
}

fn push_steps(b: &Board, src: Coord, color: Color, deltas: &[(isize, isize)], res: &mut Destinations) {
    for &(dx, dy) in deltas {
        if let Some(dst) = src.try_shift(dx, dy) {
            match b.get(dst) {
                Some(p) if p.color() == color => {}
                _ => res.push(dst),
            }
        }
    }
}

fn push_rays(b: &Board, src: Coord, color: Color, dirs: &[(isize, isize)], res: &mut Destinations) {
    for &(dx, dy) in dirs {
        let mut cur = src;
        while let Some(dst) = cur.try_shift(dx, dy) {
            match b.get(dst) {
                None => res.push(dst),
                Some(p) => {
                    if p.color() != color {
                        res.push(dst);
                    }
                    break;
                }
            }
            cur = dst;
        }
    }
}

fn push_pawn(b: &Board, src: Coord, color: Color, res: &mut Destinations) {
    let fwd = geometry::pawn_forward_delta(color);
    if let Some(one) = src.try_shift(0, fwd) {
        if b.get(one).is_none() {
            res.push(one);
            if src.rank() == geometry::pawn_rank(color) {
                if let Some(two) = one.try_shift(0, fwd) {
                    if b.get(two).is_none() {
                        res.push(two);
                    }
                }
            }
        }
    }
    for dx in [-1, 1] {
        if let Some(dst) = src.try_shift(dx, fwd) {
            let can_take = match b.get(dst) {
                Some(p) => p.color() != color,
                None => b.ep_dest() == Some(dst),
            };
            if can_take {
                res.push(dst);
            }
        }
    }
}

const KINGSIDE_BETWEEN: &[File] = &[File::F, File::G];
const QUEENSIDE_BETWEEN: &[File] = &[File::B, File::C, File::D];

fn push_castling(b: &Board, src: Coord, color: Color, res: &mut Destinations) {
    let rank = geometry::home_rank(color);
    if src != Coord::from_parts(File::E, rank) || is_attacked(b, src, color.inv()) {
        return;
    }
    let rook = Piece::new(color, PieceKind::Rook);
    for side in [CastlingSide::King, CastlingSide::Queen] {
        if !b.castling().has(color, side) {
            continue;
        }
        let (rook_file, between, pass, dst) = match side {
            CastlingSide::King => (File::H, KINGSIDE_BETWEEN, File::F, File::G),
            CastlingSide::Queen => (File::A, QUEENSIDE_BETWEEN, File::D, File::C),
        };
        if b.get2(rook_file, rank) != Some(rook)
            || between.iter().any(|&f| b.get2(f, rank).is_some())
            || is_attacked(b, Coord::from_parts(pass, rank), color.inv())
        {
            continue;
        }
        // The destination itself is checked later, together with all the other king moves
        res.push(Coord::from_parts(dst, rank));
    }
}

/// Returns the destinations allowed by the movement rule of the piece on `src`
///
/// Blocking pieces and captures are considered, but the moves may leave the king in check.
/// Returns an empty list if there is no piece on `src`.
pub fn pattern_moves(b: &Board, src: Coord) -> Destinations {
    let mut res = Destinations::new();
    let piece = match b.get(src) {
        Some(p) => p,
        None => return res,
    };
    let color = piece.color();
    match piece.kind() {
        PieceKind::Pawn => push_pawn(b, src, color, &mut res),
        PieceKind::Knight => push_steps(b, src, color, &KNIGHT_DELTAS, &mut res),
        PieceKind::Bishop => push_rays(b, src, color, &DIAG_DIRS, &mut res),
        PieceKind::Rook => push_rays(b, src, color, &LINE_DIRS, &mut res),
        PieceKind::Queen => {
            push_rays(b, src, color, &DIAG_DIRS, &mut res);
            push_rays(b, src, color, &LINE_DIRS, &mut res);
        }
        PieceKind::King => {
            push_steps(b, src, color, &KING_DELTAS, &mut res);
            push_castling(b, src, color, &mut res);
        }
    }
    res
}

/// Returns `true` if making `mv` keeps the king of color `c` out of check
pub fn is_king_safe_after(b: &Board, mv: RawMove, c: Color) -> bool {
    let mut probe = b.clone();
    probe.apply(mv);
    !is_check(&probe, c)
}

/// Returns the legal destinations for the piece on `src`
///
/// These are the [`pattern_moves()`] that don't leave the king of the moving side in check.
pub fn legal_moves(b: &Board, src: Coord) -> Destinations {
    let color = match b.get(src) {
        Some(p) => p.color(),
        None => return Destinations::new(),
    };
    let mut res = pattern_moves(b, src);
    res.retain(|dst| is_king_safe_after(b, RawMove::new(src, *dst), color));
    res
}

/// Returns `true` if `mv` is legal for the side of color `c`
pub fn is_legal(b: &Board, mv: RawMove, c: Color) -> bool {
    match b.get(mv.src) {
        Some(p) if p.color() == c => legal_moves(b, mv.src).contains(&mv.dst),
        _ => false,
    }
}

/// Returns all the legal moves of the side of color `c`
///
/// Promotions are returned without the promotion piece, so they will promote to a queen.
pub fn all_legal_moves(b: &Board, c: Color) -> Vec<RawMove> {
    let mut res = Vec::new();
    for (src, _) in b.pieces(c) {
        res.extend(legal_moves(b, src).into_iter().map(|dst| RawMove::new(src, dst)));
    }
    res
}

/// Returns `true` if the side of color `c` has at least one legal move
pub fn has_legal_moves(b: &Board, c: Color) -> bool {
    b.pieces(c).any(|(src, _)| !legal_moves(b, src).is_empty())
}

/// Checks whether the king of color `c` is checkmated or stalemated
pub fn king_status(b: &Board, c: Color) -> KingStatus {
    if has_legal_moves(b, c) {
        return KingStatus::None;
    }
    if is_check(b, c) {
        KingStatus::Checkmate
    } else {
        KingStatus::Stalemate
    }
}
