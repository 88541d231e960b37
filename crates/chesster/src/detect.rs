use crate::board::{slice_board, BoardRegion, GridLocator, Tile};
use crate::core::{self, ImageError};
use crate::io::{VisionConfig, VisionReport};
use crate::vision::{
    BoardPrediction, BoardVision, OrientationClassifier, PieceClassifier, VisionError,
    VisionParams,
};
use log::{info, warn};
use std::fs;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Convert an `image::RgbImage` into the lightweight `chesster-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> core::RgbImageView<'_> {
    core::RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a raw row-major RGB buffer into an `image::RgbImage`.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<::image::RgbImage, VisionError> {
    // Validates the length against the dimensions.
    core::RgbImageView::new(width as usize, height as usize, data)?;
    ::image::RgbImage::from_raw(width, height, data.to_vec()).ok_or(VisionError::Buffer(
        ImageError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        },
    ))
}

/// Convert an owned `chesster-core` image (e.g. a tile) into an `image::RgbImage`.
pub fn to_rgb_image(img: &core::RgbImage) -> Result<::image::RgbImage, VisionError> {
    let dims = || ImageError::InvalidDimensions {
        width: img.width,
        height: img.height,
    };
    let width = u32::try_from(img.width).map_err(|_| dims())?;
    let height = u32::try_from(img.height).map_err(|_| dims())?;
    rgb_image_from_slice(width, height, &img.data)
}

/// Decode an image file of any supported format to RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<::image::RgbImage, VisionError> {
    Ok(::image::open(path)?.to_rgb8())
}

/// Locate the board in an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn locate_board(img: &::image::RgbImage, params: &VisionParams) -> Option<BoardRegion> {
    GridLocator::new(params.locator.clone()).locate_best(&rgb_view(img), params.selection)
}

/// Decode `path` and slice its board into tiles. `Ok(None)` if no board.
pub fn extract_tiles_from_path(
    path: impl AsRef<Path>,
    params: &VisionParams,
) -> Result<Option<(BoardRegion, Vec<Tile>)>, VisionError> {
    let img = load_rgb(path)?;
    Ok(locate_board(&img, params).map(|region| (region, slice_board(&rgb_view(&img), &region))))
}

/// Decode `path` and run the full pipeline on it.
pub fn predict_board_from_path<P, O>(
    vision: &BoardVision,
    path: impl AsRef<Path>,
    pieces: &mut P,
    orientation: &mut O,
) -> Result<Option<BoardPrediction>, VisionError>
where
    P: PieceClassifier + ?Sized,
    O: OrientationClassifier + ?Sized,
{
    let img = load_rgb(path)?;
    vision.predict_board_detailed(&rgb_view(&img), pieces, orientation)
}

/// Write every tile as `<square>.png` (e.g. `e4.png`) into `dir`.
///
/// Tiles clamped to nothing at the image edge are skipped. Returns the number
/// of files written.
pub fn save_tiles(tiles: &[Tile], dir: impl AsRef<Path>) -> Result<usize, VisionError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for tile in tiles {
        if tile.image.width == 0 || tile.image.height == 0 {
            warn!("skipping empty tile {} at {:?}", tile.square, tile.origin);
            continue;
        }
        to_rgb_image(&tile.image)?.save(dir.join(format!("{}.png", tile.square)))?;
        written += 1;
    }
    info!("wrote {written} tiles to {}", dir.display());
    Ok(written)
}

/// Run one configured recognition: decode, predict, optionally dump tiles.
///
/// Decoding and I/O failures are returned as errors; pipeline failures are
/// recorded in the report.
pub fn run_config<P, O>(
    cfg: &VisionConfig,
    pieces: &mut P,
    orientation: &mut O,
) -> Result<VisionReport, VisionError>
where
    P: PieceClassifier + ?Sized,
    O: OrientationClassifier + ?Sized,
{
    let img = load_rgb(&cfg.image_path)?;
    let view = rgb_view(&img);
    let vision = BoardVision::new(cfg.build_params());
    let mut report = VisionReport::new(cfg);

    match vision.predict_board_detailed(&view, pieces, orientation) {
        Ok(prediction) => {
            if let (Some(dir), Some(p)) = (cfg.tiles_dir.as_ref(), prediction.as_ref()) {
                save_tiles(&slice_board(&view, &p.region), dir)?;
            }
            report.set_prediction(prediction.as_ref());
        }
        Err(err) => report.set_error(&err),
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_shares_the_image_buffer() {
        let mut img = ::image::RgbImage::new(3, 2);
        img.put_pixel(2, 1, ::image::Rgb([1, 2, 3]));
        let view = rgb_view(&img);
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.pixel(2, 1), [1, 2, 3]);
    }

    #[test]
    fn slice_length_is_checked() {
        assert!(rgb_image_from_slice(2, 2, &[0; 12]).is_ok());
        let err = rgb_image_from_slice(2, 2, &[0; 11]).unwrap_err();
        assert!(matches!(
            err,
            VisionError::Buffer(ImageError::InvalidBuffer {
                expected: 12,
                got: 11
            })
        ));
    }

    #[test]
    fn empty_tiles_are_not_written() {
        // 12px wide region flush with the right edge: 2px cells, so files
        // g and h start at or past x = 12 and clamp to nothing.
        let img = core::RgbImage::filled(12, 16, [90, 90, 90]);
        let tiles = slice_board(&img.view(), &BoardRegion::new(0, 0, 12, 16));
        let dir = tempfile::tempdir().expect("tempdir");

        let written = save_tiles(&tiles, dir.path()).expect("save");
        assert_eq!(written, 48);
        assert_eq!(fs::read_dir(dir.path()).expect("dir").count(), 48);
        assert!(dir.path().join("f1.png").exists());
        assert!(!dir.path().join("g1.png").exists());
        assert!(!dir.path().join("h8.png").exists());
    }

    #[test]
    fn core_images_convert_losslessly() {
        let mut tile = core::RgbImage::filled(4, 3, [9, 8, 7]);
        tile.put_pixel(3, 2, [200, 100, 50]);
        let img = to_rgb_image(&tile).expect("convert");
        assert_eq!(img.get_pixel(3, 2).0, [200, 100, 50]);
        assert_eq!(img.get_pixel(0, 0).0, [9, 8, 7]);
    }
}
