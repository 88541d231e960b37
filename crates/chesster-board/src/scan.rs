//! Colour-run scanning along one image axis.
//!
//! This is the only place pixel colours are inspected; everything above it
//! reasons in run lengths.

use chesster_core::RgbImageView;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("scan step must be (1, 0) or (0, 1), got (dx={dx}, dy={dy})")]
    InvalidDirection { dx: usize, dy: usize },
    #[error("scan start ({x}, {y}) lies outside the {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Unit scan direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanDirection {
    Right,
    Down,
}

impl ScanDirection {
    #[inline]
    pub const fn step(self) -> (usize, usize) {
        match self {
            ScanDirection::Right => (1, 0),
            ScanDirection::Down => (0, 1),
        }
    }
}

/// Normalized brightness distance in `[0, 1]`: the difference of the two
/// channel means divided by 255.
#[inline]
pub fn color_delta(a: [u8; 3], b: [u8; 3]) -> f32 {
    let sum = |c: [u8; 3]| c[0] as u32 + c[1] as u32 + c[2] as u32;
    (sum(b) as f32 - sum(a) as f32).abs() / (255.0 * 3.0)
}

/// Length of the run of similar colour starting at `(x, y)` and stepping by
/// `(dx, dy)`.
///
/// Returns the index of the first sample whose [`color_delta`] to the
/// reference exceeds `max_delta`, or the number of samples up to the image
/// edge if none does. With `adapt`, the reference follows the last accepted
/// sample so slow gradients stay in one run; otherwise it is the start pixel.
pub fn scan_run(
    image: &RgbImageView<'_>,
    x: usize,
    y: usize,
    dx: usize,
    dy: usize,
    max_delta: f32,
    adapt: bool,
) -> Result<usize, ScanError> {
    if !matches!((dx, dy), (1, 0) | (0, 1)) {
        return Err(ScanError::InvalidDirection { dx, dy });
    }
    if !image.contains(x, y) {
        return Err(ScanError::OutOfBounds {
            x,
            y,
            width: image.width,
            height: image.height,
        });
    }
    Ok(run_length(image, x, y, dx, dy, max_delta, adapt))
}

/// [`scan_run`] along a typed unit direction.
///
/// The start pixel must lie inside the image; a start outside it yields 0.
#[inline]
pub fn scan_run_dir(
    image: &RgbImageView<'_>,
    x: usize,
    y: usize,
    dir: ScanDirection,
    max_delta: f32,
    adapt: bool,
) -> usize {
    let (dx, dy) = dir.step();
    run_length(image, x, y, dx, dy, max_delta, adapt)
}

fn run_length(
    image: &RgbImageView<'_>,
    x: usize,
    y: usize,
    dx: usize,
    dy: usize,
    max_delta: f32,
    adapt: bool,
) -> usize {
    if !image.contains(x, y) {
        return 0;
    }
    let mut reference = image.pixel(x, y);
    let mut i = 0usize;
    loop {
        let (sx, sy) = (x + i * dx, y + i * dy);
        if !image.contains(sx, sy) {
            return i;
        }
        let sample = image.pixel(sx, sy);
        if color_delta(reference, sample) > max_delta {
            return i;
        }
        if adapt {
            reference = sample;
        }
        i += 1;
    }
}
