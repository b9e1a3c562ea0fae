//! Parity test deciding whether one board can be slid into another.

use crate::puzzle::{Board, Tile};

/// Pairs `i < j` with `tiles[i] > tiles[j]`, ignoring the blank.
pub fn count_inversions(tiles: &[Tile]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

/// Parity that no slide can change.
///
/// Odd sizes: inversion parity. Even sizes: a vertical slide moves one tile
/// past `size - 1` others and shifts the blank one row, so the sum of the
/// inversions and the blank's row (counted from the bottom, starting at 1)
/// keeps its parity.
fn permutation_parity(board: &Board) -> usize {
    let inversions = count_inversions(board.tiles());
    let size = board.size();

    if size % 2 == 1 {
        inversions % 2
    } else {
        let (blank_row, _) = board.blank_position();
        let row_from_bottom = size - blank_row;
        (inversions + row_from_bottom) % 2
    }
}

/// Whether `board` can reach `goal` by legal slides.
pub fn is_solvable(board: &Board, goal: &Board) -> bool {
    board.size() == goal.size() && permutation_parity(board) == permutation_parity(goal)
}
