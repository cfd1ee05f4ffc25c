//! Plain-text board output for human observation.

use std::fmt::Write;

use crate::game::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH, GAME_HEIGHT, GAME_WIDTH};

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::One => 'X',
        Cell::Two => 'O',
    }
}

/// Render the playable grid, top row first, with column indices underneath.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..GAME_HEIGHT).rev() {
        let line: Vec<String> = (0..GAME_WIDTH)
            .map(|col| symbol(board.get(row, col)).to_string())
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    let footer: Vec<String> = (0..GAME_WIDTH).map(|col| col.to_string()).collect();
    let _ = writeln!(out, "{}", footer.join(" "));
    out
}

/// Dump the whole backing store as cell codes, padding included, top row first.
pub fn render_full_board(board: &Board) -> String {
    let cells = board.raw_cells();
    let mut out = String::new();
    for row in (0..BOARD_HEIGHT).rev() {
        let line: Vec<String> = cells[row * BOARD_WIDTH..(row + 1) * BOARD_WIDTH]
            .iter()
            .map(|cell| cell.code().to_string())
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}
