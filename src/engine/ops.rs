use rand::Rng;

use super::state::{Move, Position};

pub type Tile = u32;
pub type Score = u64;

/// Side length of the (square) grid.
pub const SIZE: usize = 4;

/// Largest tile reachable on a 4x4 grid (2^17, with 4s spawning).
pub const MAX_TILE: Tile = 1 << 17;

/// Compact the non-zero tiles of `line` toward index 0, keeping their order,
/// and fill the tail with zeros.
pub fn slide(line: &mut [Tile]) {
    let kept = line.iter().filter(|&&v| v != 0).count();
    let mut write = 0;
    while write < kept {
        if let Some(offset) = line[write..].iter().position(|&v| v != 0) {
            line.swap(write, write + offset);
        }
        write += 1;
    }
}

/// Merge adjacent equal tiles in a single left-to-right pass.
///
/// The left tile of a pair doubles and the right one is cleared, so a freshly
/// merged tile never takes part in a second merge. Returns the points gained,
/// i.e. the sum of every doubled value. A pair whose double does not fit in a
/// `Tile` is left alone.
pub fn combine(line: &mut [Tile]) -> Score {
    let mut gained = 0;
    for idx in 0..line.len().saturating_sub(1) {
        let val = line[idx];
        if val == 0 || val != line[idx + 1] {
            continue;
        }
        if let Some(merged) = val.checked_mul(2) {
            line[idx] = merged;
            line[idx + 1] = 0;
            gained += Score::from(merged);
        }
    }
    gained
}

/// Slide, combine, slide. The second slide closes the gaps left by merges.
pub fn shift_line(line: &mut [Tile]) -> Score {
    slide(line);
    let gained = combine(line);
    slide(line);
    gained
}

/// Cells of line `index` for `direction`, ordered from the edge tiles move toward.
///
/// Left/Up read a row/column front to back; Right/Down read it back to front,
/// which is the same as reversing the line before processing and again after.
pub fn line_positions(direction: Move, index: usize) -> [Position; SIZE] {
    std::array::from_fn(|step| {
        let back = SIZE - 1 - step;
        match direction {
            Move::Left => Position::new(index, step),
            Move::Right => Position::new(index, back),
            Move::Up => Position::new(step, index),
            Move::Down => Position::new(back, index),
        }
    })
}

/// A new tile value: 2 (90%) or 4 (10%).
pub(crate) fn spawn_value<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}
