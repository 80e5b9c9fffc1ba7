//! Players

use crate::types::Color;

use std::fmt;

/// Who is behind the player
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// Human entering moves locally
    Local,
    /// Remote player whose moves arrive through a transport
    Network,
    /// Moves are chosen by a [`MoveSearch`](crate::search::MoveSearch)
    Computer,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Network => "network",
            Self::Computer => "computer",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
    color: Color,
    kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color, kind: PlayerKind) -> Player {
        Player {
            name: name.into(),
            color,
            kind,
        }
    }

    pub fn local(name: impl Into<String>, color: Color) -> Player {
        Self::new(name, color, PlayerKind::Local)
    }

    pub fn network(name: impl Into<String>, color: Color) -> Player {
        Self::new(name, color, PlayerKind::Network)
    }

    pub fn computer(name: impl Into<String>, color: Color) -> Player {
        Self::new(name, color, PlayerKind::Computer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Returns `true` if moves of this player come from the local input
    pub fn is_local(&self) -> bool {
        self.kind == PlayerKind::Local
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} ({}, {})", self.name, self.color, self.kind)
    }
}
