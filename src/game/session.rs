use tracing::{debug, warn};

use super::board::{Board, GAME_SIZE, GAME_WIDTH};
use super::connection::{find_connection, Connection};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Continuing,
    Won,
    Draw,
    InputError,
}

impl GameStatus {
    /// Numeric state used by the classic con4 driver.
    pub fn code(self) -> u8 {
        match self {
            GameStatus::Continuing => 0,
            GameStatus::Won => 1,
            GameStatus::Draw => 2,
            GameStatus::InputError => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::Continuing
    }
}

/// One game of Connect Four.
///
/// Every mutation goes through [`GameSession::apply_move`], which either
/// commits a whole placement (cell, cursor, player, step) or changes nothing
/// but the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    /// Player who placed the last piece; `None` before the first move.
    current_player: Option<Player>,
    step: usize,
    last_position: Option<usize>,
    status: GameStatus,
    connection: Option<Connection>,
}

impl GameSession {
    /// Empty board, step 0, Player 1 to move.
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            current_player: None,
            step: 0,
            last_position: None,
            status: GameStatus::Continuing,
            connection: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Successfully placed pieces so far.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Player who made the most recent successful move.
    pub fn current_player(&self) -> Option<Player> {
        self.current_player
    }

    /// Player whose piece the next call to `apply_move` places.
    ///
    /// Turns follow the count of placed pieces, so a rejected move never
    /// hands the turn over.
    pub fn next_player(&self) -> Player {
        Player::from_step(self.step)
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won => self.current_player,
            _ => None,
        }
    }

    /// Direction family of the winning line, once won.
    pub fn winning_connection(&self) -> Option<Connection> {
        self.connection
    }

    /// Absolute board position of the most recently placed piece.
    pub fn last_position(&self) -> Option<usize> {
        self.last_position
    }

    /// Columns that can still take a piece; empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..GAME_WIDTH)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Play `column` for the next player and return the resulting status.
    ///
    /// Out-of-range columns and full columns end in `InputError` without any
    /// other change. Once the status is terminal further calls are no-ops that
    /// re-report it.
    pub fn apply_move(&mut self, column: i64) -> GameStatus {
        if self.is_terminal() {
            debug!(column, status = ?self.status, "move ignored, game is over");
            return self.status;
        }

        let Some(col) = usize::try_from(column).ok().filter(|&c| c < GAME_WIDTH) else {
            warn!(column, "column out of range");
            self.status = GameStatus::InputError;
            return self.status;
        };

        let player = self.next_player();
        let position = match self.board.drop_piece(col, player) {
            Ok(position) => position,
            Err(err) => {
                warn!(column, %err, "move rejected");
                self.status = GameStatus::InputError;
                return self.status;
            }
        };
        debug!(column, position, player = player.name(), "filled column");

        self.current_player = Some(player);
        self.last_position = Some(position);
        self.step += 1;

        // Only the new piece can have completed a line; see `connection`.
        if let Some(connection) = find_connection(&self.board, position) {
            self.connection = Some(connection);
            self.status = GameStatus::Won;
        } else if self.step >= GAME_SIZE {
            self.status = GameStatus::Draw;
        }

        self.status
    }

    /// Resume after a rejected move. Does nothing unless the status is
    /// `InputError`; a rejected move leaves nothing else to undo.
    pub fn clear_input_error(&mut self) {
        if self.status == GameStatus::InputError {
            self.status = GameStatus::Continuing;
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
