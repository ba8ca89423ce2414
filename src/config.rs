use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Load and parse a TOML configuration file.
pub fn load(path: &Path) -> Result<PrfConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Top-level prfmap configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrfConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Model settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Parallel execution settings.
    #[serde(default)]
    pub run: RunToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Stimulus NIfTI file ([width, height, volumes], singleton axes allowed).
    pub stimulus: Option<PathBuf>,
    /// Output NIfTI file for the generated time courses.
    pub output: Option<PathBuf>,
    /// Load the stimulus volume-by-volume to bound memory.
    #[serde(default)]
    pub streamed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Repetition time in seconds per volume.
    #[serde(default = "default_tr")]
    pub tr: f64,
    /// Supersampled visual-space width in pixels.
    #[serde(default = "default_visual_size")]
    pub width: usize,
    /// Supersampled visual-space height in pixels.
    #[serde(default = "default_visual_size")]
    pub height: usize,
    /// Candidate x positions.
    #[serde(default = "default_position_axis")]
    pub x_positions: AxisToml,
    /// Candidate y positions.
    #[serde(default = "default_position_axis")]
    pub y_positions: AxisToml,
    /// Candidate pRF sizes (standard deviations).
    #[serde(default = "default_size_axis")]
    pub prf_sizes: AxisToml,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            tr: default_tr(),
            width: default_visual_size(),
            height: default_visual_size(),
            x_positions: default_position_axis(),
            y_positions: default_position_axis(),
            prf_sizes: default_size_axis(),
        }
    }
}

/// Evenly spaced candidate values from `min` to `max` inclusive.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisToml {
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

fn default_tr() -> f64 {
    2.0
}
fn default_visual_size() -> usize {
    200
}
fn default_position_axis() -> AxisToml {
    AxisToml {
        min: 0.0,
        max: 199.0,
        n: 40,
    }
}
fn default_size_axis() -> AxisToml {
    AxisToml {
        min: 1.0,
        max: 40.0,
        n: 40,
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    /// Number of parallel chunks for both pipeline stages.
    #[serde(default = "default_n_chunks")]
    pub n_chunks: usize,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            n_chunks: default_n_chunks(),
        }
    }
}

fn default_n_chunks() -> usize {
    8
}
