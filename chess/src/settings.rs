//! Game settings

use crate::player::{Player, PlayerKind};
use crate::types::Color;

/// Default limit on the number of plies in automated play
pub const DEFAULT_MAX_PLIES: usize = 300;

/// Settings of a single game
///
/// By default, a local player plays White against the computer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    white: Player,
    black: Player,
    max_plies: usize,
}

impl Settings {
    /// Creates settings with the given players
    ///
    /// # Panics
    ///
    /// Panics if the colors of the players don't match their sides.
    pub fn new(white: Player, black: Player) -> Settings {
        assert_eq!(white.color(), Color::White, "white player must have white color");
        assert_eq!(black.color(), Color::Black, "black player must have black color");
        Settings {
            white,
            black,
            max_plies: DEFAULT_MAX_PLIES,
        }
    }

    /// Human against the computer. If `computer_first` is `true`, the computer plays White.
    pub fn against_computer(computer_first: bool) -> Settings {
        if computer_first {
            Self::new(
                Player::computer("Computer", Color::White),
                Player::local("Player", Color::Black),
            )
        } else {
            Self::new(
                Player::local("Player", Color::White),
                Player::computer("Computer", Color::Black),
            )
        }
    }

    /// Two local players sharing the same input
    pub fn local_pair() -> Settings {
        Self::new(
            Player::local("White", Color::White),
            Player::local("Black", Color::Black),
        )
    }

    /// Computer against computer
    pub fn self_play() -> Settings {
        Self::new(
            Player::computer("Computer 1", Color::White),
            Player::computer("Computer 2", Color::Black),
        )
    }

    pub fn with_white(mut self, white: Player) -> Settings {
        assert_eq!(white.color(), Color::White, "white player must have white color");
        self.white = white;
        self
    }

    pub fn with_black(mut self, black: Player) -> Settings {
        assert_eq!(black.color(), Color::Black, "black player must have black color");
        self.black = black;
        self
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Settings {
        self.max_plies = max_plies;
        self
    }

    pub fn white(&self) -> &Player {
        &self.white
    }

    pub fn black(&self) -> &Player {
        &self.black
    }

    pub fn player(&self, c: Color) -> &Player {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn max_plies(&self) -> usize {
        self.max_plies
    }

    /// Returns `true` if one of the players is the computer
    pub fn is_against_computer(&self) -> bool {
        self.white.kind() == PlayerKind::Computer || self.black.kind() == PlayerKind::Computer
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::against_computer(false)
    }
}
