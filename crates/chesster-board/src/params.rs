use serde::{Deserialize, Serialize};

/// Tolerances for the run-based board locator.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorParams {
    /// Maximal brightness delta (0..1) between neighbouring samples of one run.
    pub max_color_delta: f32,

    /// Allowed relative deviation of a run from the first run of the grid.
    pub segment_ratio_tolerance: f32,

    /// Minimal length in pixels of the first run; shorter cells are noise.
    pub min_tile_size: usize,

    /// Let the run reference colour drift with the scanned pixels.
    pub adapt_color_during_scan: bool,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            max_color_delta: 0.1,
            segment_ratio_tolerance: 0.05,
            min_tile_size: 4,
            adapt_color_during_scan: true,
        }
    }
}

/// Which candidate to keep when several boards are found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSelection {
    #[default]
    Largest,
    Smallest,
}
