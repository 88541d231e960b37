//! JSON configuration and report helpers for board recognition runs.

use crate::board::{BoardRegion, BoardSelection, LocatorParams};
use crate::vision::{BoardPrediction, VisionError, VisionParams};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum VisionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for a single recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Directory receiving one PNG per square, if set.
    #[serde(default)]
    pub tiles_dir: Option<String>,
    #[serde(default)]
    pub locator: Option<LocatorParams>,
    #[serde(default)]
    pub selection: BoardSelection,
}

impl VisionConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            tiles_dir: None,
            locator: None,
            selection: BoardSelection::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, VisionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VisionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("board_vision_report.json"))
    }

    /// Build pipeline parameters, applying overrides from the config.
    pub fn build_params(&self) -> VisionParams {
        let mut params = VisionParams {
            selection: self.selection,
            ..VisionParams::default()
        };
        if let Some(locator) = self.locator.clone() {
            params.locator = locator;
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionReport {
    pub image_path: String,
    #[serde(default)]
    pub region: Option<BoardRegion>,
    /// Piece placement of the final position.
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub inverted: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VisionReport {
    pub fn new(cfg: &VisionConfig) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            region: None,
            fen: None,
            inverted: None,
            error: None,
        }
    }

    /// Populate report fields from a successful run. `None` records that no
    /// board was found.
    pub fn set_prediction(&mut self, prediction: Option<&BoardPrediction>) {
        match prediction {
            Some(p) => {
                self.region = Some(p.region);
                self.fen = Some(p.position.to_fen());
                self.inverted = Some(p.inverted);
                self.error = None;
            }
            None => {
                self.region = None;
                self.fen = None;
                self.inverted = None;
                self.error = Some("no board found".to_string());
            }
        }
    }

    /// Record a pipeline error.
    pub fn set_error(&mut self, err: &VisionError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, VisionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VisionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
