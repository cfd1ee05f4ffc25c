use super::Player;

/// Playable columns.
pub const GAME_WIDTH: usize = 7;
/// Playable rows.
pub const GAME_HEIGHT: usize = 6;
/// Number of playable cells, and so the longest possible game.
pub const GAME_SIZE: usize = GAME_WIDTH * GAME_HEIGHT;
/// Same-owner cells in a line needed to win.
pub const WIN_COND: usize = 4;
/// Sentinel border on every side of the playable grid.
pub const PADDING: usize = WIN_COND - 1;
/// Row stride of the backing store.
pub const BOARD_WIDTH: usize = GAME_WIDTH + 2 * PADDING;
pub const BOARD_HEIGHT: usize = GAME_HEIGHT + 2 * PADDING;
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// Numeric encoding used by the classic con4 board dump.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 9,
            Cell::One => 0,
            Cell::Two => 1,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is outside the board")]
    InvalidColumn { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("cell {position} is occupied below its column cursor")]
    InternalInconsistency { position: usize },
}

/// Padded Connect Four grid.
///
/// The playable 7x6 area sits inside a border of `PADDING` cells that stay
/// `Cell::Empty` forever. Any window of `WIN_COND` cells reaching at most
/// `PADDING` cells away from a playable cell therefore stays inside
/// `cells`, and the border never compares equal to a player's cell.
///
/// Positions are absolute indices into the row-major backing store, row 0 at
/// the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
    /// Absolute row of the next free cell per playable column.
    next_row: [usize; GAME_WIDTH],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
            next_row: [PADDING; GAME_WIDTH],
        }
    }

    /// Absolute position of a playable `(row, col)`, row 0 being the bottom.
    pub fn position(row: usize, col: usize) -> usize {
        (row + PADDING) * BOARD_WIDTH + col + PADDING
    }

    /// Inverse of [`Board::position`]; `None` for padding cells.
    pub fn coords(position: usize) -> Option<(usize, usize)> {
        let row = (position / BOARD_WIDTH).checked_sub(PADDING)?;
        let col = (position % BOARD_WIDTH).checked_sub(PADDING)?;
        (row < GAME_HEIGHT && col < GAME_WIDTH).then_some((row, col))
    }

    /// Raw read of an absolute position, padding included.
    pub fn cell_at(&self, position: usize) -> Cell {
        self.cells[position]
    }

    /// Read a playable cell, row 0 being the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::position(row, col)]
    }

    /// Number of pieces in a playable column; 0 for columns off the board.
    pub fn column_height(&self, col: usize) -> usize {
        self.next_row.get(col).map_or(0, |&row| row - PADDING)
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        match self.next_row.get(col) {
            Some(&row) => row >= GAME_HEIGHT + PADDING,
            None => true,
        }
    }

    pub fn is_full(&self) -> bool {
        (0..GAME_WIDTH).all(|col| self.is_column_full(col))
    }

    /// Drop a piece into a column, returning the absolute position it landed on.
    ///
    /// Fails without touching the board if the column is full, or if the cell
    /// under the cursor is already taken (cursor and cells out of sync).
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, BoardError> {
        let row = *self
            .next_row
            .get(col)
            .ok_or(BoardError::InvalidColumn { column: col })?;

        if row >= GAME_HEIGHT + PADDING {
            return Err(BoardError::ColumnFull { column: col });
        }

        let position = row * BOARD_WIDTH + col + PADDING;
        if !self.cells[position].is_empty() {
            return Err(BoardError::InternalInconsistency { position });
        }

        self.cells[position] = player.to_cell();
        self.next_row[col] += 1;
        Ok(position)
    }

    /// The whole backing store, padding included.
    pub fn raw_cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn set_raw(&mut self, position: usize, cell: Cell) {
        self.cells[position] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
