//! JSON hand-off for an external plotter.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::spectral::transform::DisplaySpectrum;

/// One channel's feature series with its time axis and segment boundaries.
#[derive(Debug, Serialize)]
pub struct FeatureTrack {
    pub channel: usize,
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<usize>>,
}

#[derive(Debug, Serialize)]
pub struct FeatureReport {
    pub file: String,
    pub feature: &'static str,
    pub sample_rate: u32,
    pub duration: f64,
    pub frame_ms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    pub channels: Vec<FeatureTrack>,
}

#[derive(Debug, Serialize)]
pub struct SpectrumTrack {
    pub channel: usize,
    #[serde(flatten)]
    pub spectrum: DisplaySpectrum,
}

#[derive(Debug, Serialize)]
pub struct SpectrumReport {
    pub file: String,
    pub sample_rate: u32,
    pub start: f64,
    pub end: f64,
    pub window: String,
    pub channels: Vec<SpectrumTrack>,
}

pub fn write_json<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
