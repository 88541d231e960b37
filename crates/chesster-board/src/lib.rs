//! Model-free chessboard locator built on top of `chesster-core`.
//!
//! ## Quickstart
//!
//! ```
//! use chesster_board::{slice_board, BoardSelection, GridLocator, LocatorParams};
//! use chesster_core::RgbImage;
//!
//! let image = RgbImage::filled(64, 64, [40, 40, 40]);
//! let locator = GridLocator::new(LocatorParams::default());
//!
//! match locator.locate_best(&image.view(), BoardSelection::Largest) {
//!     Some(region) => println!("{} tiles", slice_board(&image.view(), &region).len()),
//!     None => println!("no board"),
//! }
//! ```
//!
//! Algorithm:
//! 1. Sweep the image in raster order, skipping pixels inside accepted boards.
//! 2. At each pixel, measure the run of similar colour to the right; its
//!    length is the candidate cell size (rejected below `min_tile_size`).
//! 3. Require 7 more runs to the right, each within `segment_ratio_tolerance`
//!    of the cell size.
//! 4. Require 8 such runs downwards from the same pixel.
//! 5. Accept the rectangle spanned by both walks; jump past it on the row.
//!    A failed attempt skips the first run instead.
//! 6. Slice the chosen region into 64 tiles, top-left tile = `a8`.

mod locator;
mod params;
mod region;
mod scan;
mod tiles;

pub use locator::{locate_board, locate_boards, select, GridLocator};
pub use params::{BoardSelection, LocatorParams};
pub use region::BoardRegion;
pub use scan::{color_delta, scan_run, scan_run_dir, ScanDirection, ScanError};
pub use tiles::{slice_board, tile_at, Tile};
