//! High-level facade crate for the `chesster-*` workspace.
//!
//! This crate provides:
//! - re-exports of the position model (`chesster-core`) and the board
//!   locator (`chesster-board`)
//! - the board assembly pipeline: locate -> slice -> classify -> orient, with
//!   piece and orientation classifiers supplied by the caller
//! - JSON config/report helpers and (feature `image`) file-based helpers
//!
//! ## Quickstart
//!
//! ```no_run
//! use chesster::detect;
//! use chesster::orientation::FixedOrientation;
//! use chesster::{BoardVision, PieceClassifier, VisionParams};
//! use chesster::board::Tile;
//! use chesster::core::Piece;
//!
//! struct AllEmpty;
//!
//! impl PieceClassifier for AllEmpty {
//!     type Error = std::convert::Infallible;
//!
//!     fn classify(&mut self, tiles: &[Tile]) -> Result<Vec<Piece>, Self::Error> {
//!         Ok(vec![Piece::Empty; tiles.len()])
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_rgb("board.png")?;
//! let vision = BoardVision::new(VisionParams::default());
//! let position = vision.predict_board(
//!     &detect::rgb_view(&img),
//!     &mut AllEmpty,
//!     &mut FixedOrientation(false),
//! )?;
//! match position {
//!     Some(p) => println!("{}", p.to_fen()),
//!     None => println!("no board"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `chesster::core`: squares, pieces, positions, FEN, moves, evaluations, RGB images.
//! - `chesster::board`: run scanner, grid locator and tile slicing.
//! - `chesster::vision`: the pipeline and the classifier traits.
//! - `chesster::orientation`: feature encoding for orientation classifiers.
//! - `chesster::io`: JSON config and report types.
//! - `chesster::detect` (feature `image`): helpers working on `image::RgbImage` and files.

pub use chesster_board as board;
pub use chesster_core as core;

pub use chesster_board::{BoardRegion, BoardSelection, LocatorParams};
pub use chesster_core::{Piece, Position, Square};

pub mod io;
pub mod orientation;
pub mod vision;

pub use vision::{
    classify_tiles, BoardPrediction, BoardVision, OrientationClassifier, PieceClassifier,
    VisionError, VisionParams,
};

#[cfg(feature = "image")]
pub mod detect;
