//! Core types for chessboard vision.
//!
//! This crate holds the position model shared by the detector and its
//! consumers (squares, pieces, positions, moves and the FEN placement codec),
//! the engine-facing evaluation data, and a lightweight RGB image view. It
//! does not depend on any concrete image library.

mod evaluation;
pub mod fen;
mod image;
mod logger;
mod moves;
mod piece;
mod position;
mod square;

pub use evaluation::{Evaluation, EvaluationRequest, Score, DEFAULT_SEARCH_DEPTH};
pub use fen::FenError;
pub use image::{ImageError, RgbImage, RgbImageView, CHANNELS};
pub use moves::{Move, MoveError};
pub use piece::{Piece, PieceKind, PieceLabelError, Side};
pub use position::{Position, PositionError};
pub use square::{Square, SquareError, BOARD_SIZE};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, level_from_str, LOG_ENV};
