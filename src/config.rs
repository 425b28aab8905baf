use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::framing::DEFAULT_OVERLAP;
use crate::effects::fade::FadeShape;
use crate::spectral::window::Window;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default)]
    pub spectral: SpectralConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,
    #[serde(default = "default_overlap")]
    pub overlap: f64,
    #[serde(default = "default_step")]
    pub step: f64,
}

#[derive(Debug, Deserialize)]
pub struct FadeConfig {
    #[serde(default = "default_fade_ms")]
    pub duration_ms: u32,
    #[serde(default = "default_fade_shape")]
    pub shape: FadeShape,
}

#[derive(Debug, Deserialize)]
pub struct SpectralConfig {
    #[serde(default)]
    pub window: Window,
    #[serde(default = "default_cutoff_hz")]
    pub cutoff_hz: f64,
    #[serde(default = "default_add_hz")]
    pub add_hz: f64,
    #[serde(default = "default_add_amplitude")]
    pub add_amplitude: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            overlap: default_overlap(),
            step: default_step(),
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_fade_ms(),
            shape: default_fade_shape(),
        }
    }
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            window: Window::default(),
            cutoff_hz: default_cutoff_hz(),
            add_hz: default_add_hz(),
            add_amplitude: default_add_amplitude(),
        }
    }
}

fn default_frame_ms() -> u32 { 20 }
fn default_overlap() -> f64 { DEFAULT_OVERLAP }
fn default_step() -> f64 { 0.5 }
fn default_fade_ms() -> u32 { 500 }
fn default_fade_shape() -> FadeShape { FadeShape::Linear }
fn default_cutoff_hz() -> f64 { 2000.0 }
fn default_add_hz() -> f64 { 4000.0 }
fn default_add_amplitude() -> f64 { 1000.0 }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// `sigscope.toml` in the working directory, then the user config locations.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("sigscope.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("sigscope").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("sigscope").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
