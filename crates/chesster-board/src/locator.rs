use crate::params::{BoardSelection, LocatorParams};
use crate::region::BoardRegion;
use crate::scan::{scan_run_dir, ScanDirection};
use chesster_core::RgbImageView;
use log::{debug, trace};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Cells per board side.
const GRID_CELLS: usize = 8;

/// Run-length based 8x8 grid locator.
///
/// Sweeps the image row by row. At every pixel outside an already accepted
/// region it tries to walk 8 runs of similar colour to the right, all close to
/// the length of the first one, then 8 such runs downwards from the same
/// pixel. Both succeeding yields a [`BoardRegion`].
pub struct GridLocator {
    params: LocatorParams,
}

/// Outcome of walking 8 runs along one axis.
enum Walk {
    /// All 8 runs matched; total length.
    Complete(usize),
    /// Aborted after `runs` runs.
    Aborted { runs: usize },
}

impl GridLocator {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Find all candidate boards, in discovery (raster) order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn locate(&self, image: &RgbImageView<'_>) -> Vec<BoardRegion> {
        let mut regions: Vec<BoardRegion> = Vec::new();

        for y in 0..image.height {
            let mut x = 0usize;
            while x < image.width {
                if let Some(inside) = regions.iter().find(|r| r.contains(x, y)) {
                    x = inside.right();
                    continue;
                }
                x += self.try_at(image, x, y, &mut regions);
            }
        }

        debug!(
            "located {} board candidate(s) in {}x{} image",
            regions.len(),
            image.width,
            image.height
        );
        regions
    }

    /// Locate all candidates and keep one of them.
    ///
    /// Candidates are ordered by `width + height`, largest first; `Largest`
    /// keeps the first and `Smallest` the last. `None` if nothing was found.
    pub fn locate_best(
        &self,
        image: &RgbImageView<'_>,
        selection: BoardSelection,
    ) -> Option<BoardRegion> {
        select(self.locate(image), selection)
    }

    /// One detection attempt at `(x, y)`. Returns how far to advance the
    /// cursor, always at least one pixel.
    fn try_at(
        &self,
        image: &RgbImageView<'_>,
        x: usize,
        y: usize,
        regions: &mut Vec<BoardRegion>,
    ) -> usize {
        let p = &self.params;
        let cell = scan_run_dir(
            image,
            x,
            y,
            ScanDirection::Right,
            p.max_color_delta,
            p.adapt_color_during_scan,
        );
        if cell < p.min_tile_size.max(1) {
            return cell.max(1);
        }

        let width = match self.walk(image, x, y, ScanDirection::Right, cell) {
            Walk::Complete(total) => total,
            Walk::Aborted { .. } => return cell,
        };

        match self.walk(image, x, y, ScanDirection::Down, cell) {
            Walk::Complete(height) => {
                let region = BoardRegion::new(x, y, width, height);
                debug!("board candidate {region} (cell {cell}px)");
                regions.push(region);
                GRID_CELLS * cell
            }
            Walk::Aborted { runs } => {
                // The real board may start one cell further right.
                trace!("({x}, {y}): 8 columns of {cell}px but only {runs} matching rows");
                cell
            }
        }
    }

    /// Walk 8 consecutive runs from `(x, y)` along `dir`, each within the
    /// ratio tolerance of `cell`.
    fn walk(
        &self,
        image: &RgbImageView<'_>,
        x: usize,
        y: usize,
        dir: ScanDirection,
        cell: usize,
    ) -> Walk {
        let p = &self.params;
        let (dx, dy) = dir.step();
        let mut total = 0usize;

        for runs in 0..GRID_CELLS {
            let (sx, sy) = (x + total * dx, y + total * dy);
            if !image.contains(sx, sy) {
                return Walk::Aborted { runs };
            }
            let len = scan_run_dir(
                image,
                sx,
                sy,
                dir,
                p.max_color_delta,
                p.adapt_color_during_scan,
            );
            if (1.0 - len as f32 / cell as f32).abs() > p.segment_ratio_tolerance {
                return Walk::Aborted { runs };
            }
            total += len;
        }
        Walk::Complete(total)
    }
}

impl Default for GridLocator {
    fn default() -> Self {
        Self::new(LocatorParams::default())
    }
}

/// Stable sort by `width + height` descending, then pick by `selection`.
pub fn select(mut regions: Vec<BoardRegion>, selection: BoardSelection) -> Option<BoardRegion> {
    regions.sort_by(|a, b| b.size_key().cmp(&a.size_key()));
    match selection {
        BoardSelection::Largest => regions.first().copied(),
        BoardSelection::Smallest => regions.last().copied(),
    }
}

/// Find all candidate boards with default parameters.
pub fn locate_boards(image: &RgbImageView<'_>) -> Vec<BoardRegion> {
    GridLocator::default().locate(image)
}

/// Find the largest board with default parameters.
pub fn locate_board(image: &RgbImageView<'_>) -> Option<BoardRegion> {
    GridLocator::default().locate_best(image, BoardSelection::Largest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chesster_core::RgbImage;

    const LIGHT: [u8; 3] = [238, 238, 210];
    const DARK: [u8; 3] = [118, 150, 86];
    const BACKGROUND: [u8; 3] = [40, 40, 40];

    fn paint_grid(img: &mut RgbImage, x0: usize, y0: usize, cols: &[usize; 8], rows: &[usize; 8]) {
        let mut top = y0;
        for (r, &h) in rows.iter().enumerate() {
            let mut left = x0;
            for (c, &w) in cols.iter().enumerate() {
                let color = if (r + c) % 2 == 0 { LIGHT } else { DARK };
                for y in top..top + h {
                    for x in left..left + w {
                        img.put_pixel(x, y, color);
                    }
                }
                left += w;
            }
            top += h;
        }
    }

    fn paint_board(img: &mut RgbImage, x0: usize, y0: usize, cell: usize) {
        paint_grid(img, x0, y0, &[cell; 8], &[cell; 8]);
    }

    #[test]
    fn finds_single_board() {
        let mut img = RgbImage::filled(120, 100, BACKGROUND);
        paint_board(&mut img, 17, 9, 10);

        let regions = GridLocator::default().locate(&img.view());
        assert_eq!(regions, vec![BoardRegion::new(17, 9, 80, 80)]);
    }

    #[test]
    fn blank_image_has_no_board() {
        let img = RgbImage::filled(64, 64, BACKGROUND);
        assert!(locate_boards(&img.view()).is_empty());
        assert_eq!(locate_board(&img.view()), None);
    }

    #[test]
    fn board_touching_the_image_edge_is_found() {
        let mut img = RgbImage::filled(48, 48, BACKGROUND);
        paint_board(&mut img, 0, 0, 6);
        // The board covers the full width: the last run ends at the edge.
        let mut edge = RgbImage::filled(48, 60, BACKGROUND);
        paint_board(&mut edge, 0, 5, 6);

        assert_eq!(
            locate_boards(&img.view()),
            vec![BoardRegion::new(0, 0, 48, 48)]
        );
        assert_eq!(
            locate_boards(&edge.view()),
            vec![BoardRegion::new(0, 5, 48, 48)]
        );
    }

    #[test]
    fn tiles_below_min_size_are_ignored() {
        let mut img = RgbImage::filled(40, 40, BACKGROUND);
        paint_board(&mut img, 4, 4, 3);
        assert!(locate_boards(&img.view()).is_empty());

        let locator = GridLocator::new(LocatorParams {
            min_tile_size: 3,
            ..LocatorParams::default()
        });
        assert_eq!(locator.locate(&img.view()), vec![BoardRegion::new(4, 4, 24, 24)]);
    }

    #[test]
    fn uneven_columns_are_rejected() {
        let mut img = RgbImage::filled(140, 120, BACKGROUND);
        // Fourth column 20% wider than the first.
        paint_grid(&mut img, 10, 10, &[10, 10, 10, 12, 10, 10, 10, 10], &[10; 8]);
        assert!(locate_boards(&img.view()).is_empty());
    }

    #[test]
    fn row_heights_are_checked_against_the_column_width() {
        let mut img = RgbImage::filled(100, 110, BACKGROUND);
        paint_grid(
            &mut img,
            5,
            5,
            &[10; 8],
            &[10, 11, 10, 11, 10, 11, 10, 11],
        );
        assert!(locate_boards(&img.view()).is_empty());

        let locator = GridLocator::new(LocatorParams {
            segment_ratio_tolerance: 0.15,
            ..LocatorParams::default()
        });
        assert_eq!(
            locator.locate(&img.view()),
            vec![BoardRegion::new(5, 5, 80, 84)]
        );
    }

    #[test]
    fn background_run_matching_the_cell_does_not_hide_the_board() {
        // The margin left of the board is exactly one cell wide, so the
        // horizontal walk from x = 0 succeeds but its vertical walk does not.
        let mut img = RgbImage::filled(100, 100, BACKGROUND);
        paint_board(&mut img, 10, 10, 10);
        assert_eq!(
            locate_boards(&img.view()),
            vec![BoardRegion::new(10, 10, 80, 80)]
        );
    }

    #[test]
    fn selection_orders_by_size() {
        let mut img = RgbImage::filled(200, 120, BACKGROUND);
        paint_board(&mut img, 5, 5, 6);
        paint_board(&mut img, 80, 10, 12);

        let locator = GridLocator::default();
        let all = locator.locate(&img.view());
        assert_eq!(all.len(), 2);
        assert_eq!(
            locator.locate_best(&img.view(), BoardSelection::Largest),
            Some(BoardRegion::new(80, 10, 96, 96))
        );
        assert_eq!(
            locator.locate_best(&img.view(), BoardSelection::Smallest),
            Some(BoardRegion::new(5, 5, 48, 48))
        );
    }

    #[test]
    fn select_is_stable_for_equal_sizes() {
        let a = BoardRegion::new(0, 0, 40, 40);
        let b = BoardRegion::new(50, 0, 40, 40);
        assert_eq!(select(vec![a, b], BoardSelection::Largest), Some(a));
        assert_eq!(select(vec![a, b], BoardSelection::Smallest), Some(b));
        assert_eq!(select(Vec::new(), BoardSelection::Largest), None);
    }
}
