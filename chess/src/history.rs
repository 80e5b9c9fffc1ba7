//! History of the applied moves

use crate::moves::Move;

use std::fmt;
use std::slice;

/// Append-only sequence of moves applied in a game
///
/// Moves are never removed while the game lasts. The last move is handed over to the move
/// search as context.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MovesHistory {
    moves: Vec<Move>,
}

impl MovesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Returns the last applied move, if any
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Number of plies played
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Move> {
        self.moves.get(idx)
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Wraps the history to print it as space-separated long algebraic moves, like `e2e4 e7e5`
    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }
}

impl<'a> IntoIterator for &'a MovesHistory {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

pub struct UciList<'a>(&'a MovesHistory);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::RawMove;
    use std::str::FromStr;

    #[test]
    fn test_history() {
        let mut board = Board::initial();
        let mut history = MovesHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
        assert_eq!(history.uci_list().to_string(), "");

        for s in ["e2e4", "e7e5", "g1f3"] {
            history.push(board.apply(RawMove::from_str(s).unwrap()));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().map(|m| m.to_string()), Some("g1f3".to_string()));
        assert_eq!(history.get(1).map(|m| m.to_string()), Some("e7e5".to_string()));
        assert_eq!(history.get(3), None);
        assert_eq!(history.uci_list().to_string(), "e2e4 e7e5 g1f3");
        assert_eq!((&history).into_iter().count(), 3);
    }
}
