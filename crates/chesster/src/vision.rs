//! Board assembly: locate -> slice -> classify squares -> orient.

use crate::board::{slice_board, BoardRegion, BoardSelection, GridLocator, LocatorParams, Tile};
use crate::core::{ImageError, Piece, Position, RgbImageView};
use log::info;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

const SQUARES: usize = 64;

/// Labels one square image as a piece.
///
/// Tiles arrive as an ordered batch of 64, `a1` first; the returned labels
/// must follow the same order.
pub trait PieceClassifier {
    type Error: std::error::Error + Send + Sync + 'static;

    fn classify(&mut self, tiles: &[Tile]) -> Result<Vec<Piece>, Self::Error>;
}

/// Decides whether a recognized position is seen upside down (black at the
/// bottom of the image).
pub trait OrientationClassifier {
    type Error: std::error::Error + Send + Sync + 'static;

    fn is_inverted(&mut self, position: &Position) -> Result<bool, Self::Error>;
}

/// Errors produced by the vision pipeline and its I/O helpers.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error("piece classifier failed")]
    PieceClassifier(#[source] BoxError),

    #[error("orientation classifier failed")]
    OrientationClassifier(#[source] BoxError),

    #[error("a board is classified as 64 tiles, got {0}")]
    TileCount(usize),

    #[error("piece classifier returned {got} labels for {expected} tiles")]
    LabelCount { expected: usize, got: usize },

    #[error(transparent)]
    Buffer(#[from] ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

/// Configuration of the vision pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionParams {
    pub locator: LocatorParams,
    /// Which board to keep when several are found.
    pub selection: BoardSelection,
}

/// Everything the pipeline learned about one image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPrediction {
    pub region: BoardRegion,
    /// Final position, already rotated if the board was seen inverted.
    pub position: Position,
    pub inverted: bool,
}

/// Photograph-to-position pipeline with injected classifiers.
pub struct BoardVision {
    params: VisionParams,
    locator: GridLocator,
}

impl BoardVision {
    pub fn new(params: VisionParams) -> Self {
        let locator = GridLocator::new(params.locator.clone());
        Self { params, locator }
    }

    #[inline]
    pub fn params(&self) -> &VisionParams {
        &self.params
    }

    /// Recognize the position shown in `image`.
    ///
    /// `Ok(None)` means no board was found. Classifier failures are returned
    /// as errors; nothing is retried.
    pub fn predict_board<P, O>(
        &self,
        image: &RgbImageView<'_>,
        pieces: &mut P,
        orientation: &mut O,
    ) -> Result<Option<Position>, VisionError>
    where
        P: PieceClassifier + ?Sized,
        O: OrientationClassifier + ?Sized,
    {
        Ok(self
            .predict_board_detailed(image, pieces, orientation)?
            .map(|p| p.position))
    }

    /// Like [`predict_board`](Self::predict_board), also reporting the board
    /// region and the orientation decision.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, image, pieces, orientation),
            fields(width = image.width, height = image.height)
        )
    )]
    pub fn predict_board_detailed<P, O>(
        &self,
        image: &RgbImageView<'_>,
        pieces: &mut P,
        orientation: &mut O,
    ) -> Result<Option<BoardPrediction>, VisionError>
    where
        P: PieceClassifier + ?Sized,
        O: OrientationClassifier + ?Sized,
    {
        let Some(region) = self.locator.locate_best(image, self.params.selection) else {
            info!("no board was found in the input image");
            return Ok(None);
        };
        info!("found a board ({region})");

        let tiles = slice_board(image, &region);
        let position = classify_tiles(pieces, &tiles)?;
        info!("piece prediction yielded {position}");

        let inverted = orientation
            .is_inverted(&position)
            .map_err(|e| VisionError::OrientationClassifier(Box::new(e)))?;
        info!(
            "board orientation is {}",
            if inverted { "inverted" } else { "normal" }
        );

        let position = if inverted {
            let rotated = position.inverted();
            info!("rotated position: {rotated}");
            rotated
        } else {
            position
        };

        Ok(Some(BoardPrediction {
            region,
            position,
            inverted,
        }))
    }
}

impl Default for BoardVision {
    fn default() -> Self {
        Self::new(VisionParams::default())
    }
}

/// Run the piece classifier on a full tile batch and assemble the position.
pub fn classify_tiles<P>(classifier: &mut P, tiles: &[Tile]) -> Result<Position, VisionError>
where
    P: PieceClassifier + ?Sized,
{
    if tiles.len() != SQUARES {
        return Err(VisionError::TileCount(tiles.len()));
    }
    let labels = classifier
        .classify(tiles)
        .map_err(|e| VisionError::PieceClassifier(Box::new(e)))?;
    if labels.len() != SQUARES {
        return Err(VisionError::LabelCount {
            expected: SQUARES,
            got: labels.len(),
        });
    }

    let mut position = Position::empty();
    for (tile, piece) in tiles.iter().zip(labels) {
        position[tile.square] = piece;
    }
    Ok(position)
}
