use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned pixel rectangle believed to bound an 8x8 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BoardRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoardRegion {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Ordering key used to pick the largest / smallest candidate.
    #[inline]
    pub const fn size_key(&self) -> usize {
        self.width + self.height
    }

    /// Cell size in pixels, `round(width / 8) x round(height / 8)`.
    ///
    /// Midpoints round to the even neighbour: 84px gives 10px cells, 92px
    /// gives 12px cells.
    pub fn cell_size(&self) -> (usize, usize) {
        (round_eighth(self.width), round_eighth(self.height))
    }
}

fn round_eighth(v: usize) -> usize {
    let (q, r) = (v / 8, v % 8);
    if r > 4 || (r == 4 && q % 2 == 1) {
        q + 1
    } else {
        q
    }
}

impl fmt::Display for BoardRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}
