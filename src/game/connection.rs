//! Anchored win detection.
//!
//! Only windows passing through the most recently filled cell are inspected.
//! That is sufficient because pieces are never removed and a check runs after
//! every single placement: any line of four that exists must have been
//! completed by the last piece. Adding undo or any other way of clearing cells
//! invalidates this and requires a full-board scan instead.
//!
//! Window arithmetic relies on the sentinel border of [`Board`]: starting from
//! a playable cell, every offset used here stays inside the backing store.

use tracing::trace;

use super::board::{Board, Cell, BOARD_WIDTH, WIN_COND};

/// Direction family of a completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    Vertical,
    Horizontal,
    Diagonal,
}

/// Check for a line of `WIN_COND` through `position`.
///
/// Families are tried in order vertical, horizontal, diagonal and the first
/// match is returned. An empty anchor never connects.
pub fn find_connection(board: &Board, position: usize) -> Option<Connection> {
    let target = board.cell_at(position);
    if target.is_empty() {
        return None;
    }

    if check_vertical(board, position, target) {
        trace!(position, "win: vertical");
        Some(Connection::Vertical)
    } else if check_horizontal(board, position, target) {
        trace!(position, "win: horizontal");
        Some(Connection::Horizontal)
    } else if check_diagonals(board, position, target) {
        trace!(position, "win: diagonal");
        Some(Connection::Diagonal)
    } else {
        None
    }
}

/// The anchor plus the three cells below it.
///
/// The anchor is always the top of its column, so nothing above it can
/// complete a vertical line.
fn check_vertical(board: &Board, position: usize, target: Cell) -> bool {
    window_matches(board, position - (WIN_COND - 1) * BOARD_WIDTH, BOARD_WIDTH, target)
}

fn check_horizontal(board: &Board, position: usize, target: Cell) -> bool {
    sliding_windows(board, position, 1, target)
}

fn check_diagonals(board: &Board, position: usize, target: Cell) -> bool {
    sliding_windows(board, position, BOARD_WIDTH - 1, target)
        || sliding_windows(board, position, BOARD_WIDTH + 1, target)
}

/// Every `WIN_COND` window along `step` that contains `position`.
fn sliding_windows(board: &Board, position: usize, step: usize, target: Cell) -> bool {
    (0..WIN_COND).any(|offset| window_matches(board, position - offset * step, step, target))
}

fn window_matches(board: &Board, start: usize, step: usize, target: Cell) -> bool {
    (0..WIN_COND).all(|i| board.cell_at(start + i * step) == target)
}
