use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::ops::{self, Score, Tile, MAX_TILE, SIZE};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// A `(row, col)` cell coordinate, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid tile {value} at ({row}, {col}): expected 0 or a power of two in 2..={max}", max = MAX_TILE)]
    InvalidTile { row: usize, col: usize, value: Tile },
}

/// The 4x4 board. Empty cells are 0, tiles hold their value (2, 4, 8, ...).
///
/// Deserializing goes through [`Grid::from_rows`], so invalid tiles are rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[[Tile; SIZE]; SIZE]")]
pub struct Grid([[Tile; SIZE]; SIZE]);

impl Grid {
    /// A grid with no tiles.
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    /// Build a grid from rows, checking that every cell is 0 or a power of two
    /// between 2 and [`MAX_TILE`](crate::engine::MAX_TILE).
    ///
    /// ```
    /// use grid_2048::engine::Grid;
    /// let g = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(g.count_empty(), 14);
    /// assert!(Grid::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// ```
    pub fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Result<Self, GridError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value != 0 && (value < 2 || value > MAX_TILE || !value.is_power_of_two()) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Grid(rows))
    }

    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Tile {
        self[pos]
    }

    /// Every empty cell in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut empty = Vec::with_capacity(SIZE * SIZE);
        for (row, cells) in self.0.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == 0 {
                    empty.push(Position::new(row, col));
                }
            }
        }
        empty
    }

    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Highest tile value on the grid, 0 when empty.
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Slide and merge every line toward `direction`, in place. Returns the points gained.
    ///
    /// ```
    /// use grid_2048::engine::{Grid, Move};
    /// let mut g = Grid::from_rows([[2, 0, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(g.shift(Move::Right), 4);
    /// assert_eq!(g.rows()[0], [0, 0, 0, 4]);
    /// ```
    pub fn shift(&mut self, direction: Move) -> Score {
        (0..SIZE).fold(0, |gained, index| {
            let positions = ops::line_positions(direction, index);
            let mut line = positions.map(|pos| self[pos]);
            let points = ops::shift_line(&mut line);
            for (pos, value) in positions.into_iter().zip(line) {
                self[pos] = value;
            }
            gained + points
        })
    }

    /// True when no cell is empty and no two neighbours (row- or column-wise) are equal.
    pub fn is_terminal(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.0[row][col];
                if value == 0 {
                    return false;
                }
                if col + 1 < SIZE && value == self.0[row][col + 1] {
                    return false;
                }
                if row + 1 < SIZE && value == self.0[row + 1][col] {
                    return false;
                }
            }
        }
        true
    }
}

impl TryFrom<[[Tile; SIZE]; SIZE]> for Grid {
    type Error = GridError;

    fn try_from(rows: [[Tile; SIZE]; SIZE]) -> Result<Self, GridError> {
        Grid::from_rows(rows)
    }
}

impl Index<Position> for Grid {
    type Output = Tile;

    fn index(&self, pos: Position) -> &Tile {
        &self.0[pos.row][pos.col]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Tile {
        &mut self.0[pos.row][pos.col]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grid").field(&self.0).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(SIZE * 8 - 1);
        for (idx, cells) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = cells.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{x:^7}"),
    }
}
