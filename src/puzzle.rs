use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use crate::error::{PuzzleError, Result};

/// Tile value; `0` is the blank.
pub type Tile = u8;

pub const MIN_SIZE: usize = 2;
/// Largest side length whose tiles still fit in a [`Tile`].
pub const MAX_SIZE: usize = 15;

/// Direction the blank travels in a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Enumeration order used for neighbor generation.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Locates the unique blank in a raw tile sequence.
pub fn blank_index(tiles: &[Tile]) -> Result<usize> {
    let mut blanks = tiles.iter().enumerate().filter(|&(_, &t)| t == 0);
    match (blanks.next(), blanks.next()) {
        (Some((idx, _)), None) => Ok(idx),
        (None, _) => Err(PuzzleError::InvariantViolation(
            "configuration has no blank".to_string(),
        )),
        (Some(_), Some(_)) => Err(PuzzleError::InvariantViolation(
            "configuration has more than one blank".to_string(),
        )),
    }
}

/// One immutable configuration of a `size x size` board, stored row-major.
///
/// Equality and hashing follow the tile sequence; the blank position is
/// derived from it and cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    size: usize,
    tiles: Box<[Tile]>,
    #[serde(skip)]
    blank: usize,
}

impl Board {
    pub fn new(size: usize, tiles: Vec<Tile>) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::InvalidSize(size));
        }
        let cells = size * size;
        if tiles.len() != cells {
            return Err(PuzzleError::InvalidTiles(format!(
                "expected {} tiles, got {}",
                cells,
                tiles.len()
            )));
        }
        let blank = blank_index(&tiles)?;

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let slot = seen.get_mut(tile as usize).ok_or_else(|| {
                PuzzleError::InvalidTiles(format!("tile {} out of range for {}x{}", tile, size, size))
            })?;
            if *slot {
                return Err(PuzzleError::InvalidTiles(format!("tile {} appears twice", tile)));
            }
            *slot = true;
        }

        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
            blank,
        })
    }

    /// The solved configuration `1, 2, ..., size²-1, 0`.
    pub fn goal(size: usize) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::InvalidSize(size));
        }
        let cells = size * size;
        let tiles: Vec<Tile> = (1..cells)
            .map(|v| v as Tile)
            .chain(std::iter::once(0))
            .collect();

        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
            blank: cells - 1,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Zero-indexed `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// The board after moving the blank one cell in `mv`, if that cell exists.
    pub fn slide(&self, mv: Move) -> Option<Self> {
        let (row, col) = self.blank_position();
        let (dr, dc) = mv.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;
        if new_row < 0 || new_row >= size || new_col < 0 || new_col >= size {
            return None;
        }

        let target = new_row as usize * self.size + new_col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every board one slide away, in [`Move::ALL`] order.
    pub fn neighbors(&self) -> SmallVec<[Board; 4]> {
        Move::ALL.iter().filter_map(|&mv| self.slide(mv)).collect()
    }

    /// Like [`Board::neighbors`] but keeps the move that produced each board.
    pub fn successors(&self) -> SmallVec<[(Move, Board); 4]> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.slide(mv).map(|b| (mv, b)))
            .collect()
    }

    /// The single move taking `self` to `next`, if they are adjacent.
    pub fn move_to(&self, next: &Board) -> Option<Move> {
        self.successors()
            .into_iter()
            .find(|(_, b)| b == next)
            .map(|(mv, _)| mv)
    }
}

/// Converts a configuration path into the blank moves that walk it.
pub fn moves_along(path: &[Board]) -> Result<Vec<Move>> {
    path.windows(2)
        .map(|pair| {
            pair[0].move_to(&pair[1]).ok_or_else(|| {
                PuzzleError::InvariantViolation(
                    "consecutive path entries are not one slide apart".to_string(),
                )
            })
        })
        .collect()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                if val == 0 {
                    write!(f, "{:>width$} ", ".", width = width)?;
                } else {
                    write!(f, "{:>width$} ", val, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
