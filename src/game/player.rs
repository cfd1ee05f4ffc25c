use std::fmt;

use super::board::Cell;

/// The two sides. `One` always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const FIRST: Player = Player::One;

    /// Player who places the piece after `placed` successful drops.
    pub fn from_step(placed: usize) -> Player {
        if placed % 2 == 0 {
            Self::FIRST
        } else {
            Self::FIRST.other()
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Name used in the final report.
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
