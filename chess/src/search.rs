//! Move search contract
//!
//! The game doesn't know how the computer chooses its moves. It only calls [`MoveSearch`] when a
//! computer player is to move, and checks that the returned move is legal before applying it.

use crate::board::Board;
use crate::movegen;
use crate::moves::{Move, RawMove};
use crate::types::Color;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Chooses a move for the computer player
pub trait MoveSearch {
    /// Returns the move for the side of color `side`
    ///
    /// `board` is the current, fully updated position, and `last_move` is the move which was
    /// played just before. The returned move must be legal for `side`, otherwise the game rejects
    /// it with [`GameError::IllegalAiMove`](crate::game::GameError::IllegalAiMove). Returning
    /// `None` means that the search gave up.
    fn select_move(&mut self, board: &Board, side: Color, last_move: Option<&Move>) -> Option<RawMove>;
}

impl<F> MoveSearch for F
where
    F: FnMut(&Board, Color, Option<&Move>) -> Option<RawMove>,
{
    #[inline]
    fn select_move(&mut self, board: &Board, side: Color, last_move: Option<&Move>) -> Option<RawMove> {
        self(board, side, last_move)
    }
}

/// Plays a uniformly random legal move
#[derive(Debug, Clone)]
pub struct RandomSearch {
    rng: StdRng,
}

impl RandomSearch {
    pub fn new() -> Self {
        RandomSearch {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a search with reproducible choices
    pub fn with_seed(seed: u64) -> Self {
        RandomSearch {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSearch for RandomSearch {
    fn select_move(&mut self, board: &Board, side: Color, _last_move: Option<&Move>) -> Option<RawMove> {
        movegen::all_legal_moves(board, side)
            .choose(&mut self.rng)
            .copied()
    }
}

/// Takes the most valuable piece it can, otherwise plays a random move
///
/// It doesn't look further than one ply, so it happily gives its queen away for a pawn.
#[derive(Debug, Clone)]
pub struct GreedySearch {
    rng: StdRng,
}

impl GreedySearch {
    pub fn new() -> Self {
        GreedySearch {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        GreedySearch {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedySearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSearch for GreedySearch {
    fn select_move(&mut self, board: &Board, side: Color, _last_move: Option<&Move>) -> Option<RawMove> {
        let moves = movegen::all_legal_moves(board, side);
        let gain = |mv: &RawMove| board.get(mv.dst).map_or(0, |p| p.value());
        let best = moves.iter().map(gain).max()?;
        let candidates: Vec<RawMove> = moves.into_iter().filter(|mv| gain(mv) == best).collect();
        candidates.choose(&mut self.rng).copied()
    }
}
