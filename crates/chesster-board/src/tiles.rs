//! Cutting a located board into 64 per-square tiles.

use crate::region::BoardRegion;
use chesster_core::{RgbImage, RgbImageView, Square};

/// One square of the board, copied out of the source image.
#[derive(Clone, Debug)]
pub struct Tile {
    pub square: Square,
    pub image: RgbImage,
    /// Top-left pixel of the tile in the source image.
    pub origin: (usize, usize),
}

/// Slice `region` into an 8x8 grid of tiles.
///
/// Grid row `r` (top to bottom) and column `c` (left to right) map to
/// `Square(file = c, rank = 7 - r)`: the top-left tile is `a8` and the
/// bottom-right tile is `h1`. Cells are `round(width / 8) x round(height / 8)`
/// pixels (midpoints to even); tiles reaching past the image edge are
/// clamped and may be empty. The result is ordered by [`Square::index`],
/// `a1` first.
pub fn slice_board(image: &RgbImageView<'_>, region: &BoardRegion) -> Vec<Tile> {
    let (cell_w, cell_h) = region.cell_size();

    Square::all()
        .map(|square| {
            let row = 7 - square.rank() as usize;
            let col = square.file() as usize;
            let origin = (region.x + col * cell_w, region.y + row * cell_h);
            Tile {
                square,
                image: image.crop(origin.0, origin.1, cell_w, cell_h),
                origin,
            }
        })
        .collect()
}

/// Look up the tile cut for `square` in a board-ordered tile list.
pub fn tile_at(tiles: &[Tile], square: Square) -> Option<&Tile> {
    tiles
        .get(square.index())
        .filter(|t| t.square == square)
        .or_else(|| tiles.iter().find(|t| t.square == square))
}
