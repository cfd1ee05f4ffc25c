//! Core Connect Four rules: padded board, player types, anchored win
//! detection and the per-game state machine.

mod board;
mod connection;
mod player;
mod session;

pub use board::{
    Board, BoardError, Cell, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, GAME_HEIGHT, GAME_SIZE,
    GAME_WIDTH, PADDING, WIN_COND,
};
pub use connection::{find_connection, Connection};
pub use player::Player;
pub use session::{GameSession, GameStatus};
