// Game configuration
//
// Every field has a default, so a missing or partial `shape_match.toml` is
// fine. `SHAPE_MATCH_ASSETS` overrides the asset root.

use crate::engine::assets::{InvalidShapeName, ShapeName};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "shape_match.toml";

/// Environment variable overriding `asset_root`
pub const ASSETS_ENV: &str = "SHAPE_MATCH_ASSETS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("No shapes configured")]
    NoShapes,

    #[error("Shape '{0}' is listed more than once")]
    DuplicateShape(String),

    #[error("Invalid shape list: {0}")]
    InvalidShapeName(#[from] InvalidShapeName),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,

    /// Box size for the draggable outline (logical pixels)
    pub outline_size: f32,
    /// Box size for the drop target (logical pixels)
    pub target_size: f32,
    /// Vertical gap between stacked elements
    pub spacing: f32,

    /// "Confetti" pause after a correct match, in seconds
    pub celebration_secs: f32,
    /// Extra wait for the cue to report completion before advancing anyway
    pub audio_fallback_secs: f32,

    pub asset_root: PathBuf,
    /// Image key of the background, looked up like a filled image
    pub background: String,
    /// Shapes in presentation order
    pub shapes: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Shape Matching Game".to_string(),
            window_width: 800,
            window_height: 600,
            outline_size: 150.0,
            target_size: 200.0,
            spacing: 20.0,
            celebration_secs: 1.0,
            audio_fallback_secs: 4.0,
            asset_root: PathBuf::from("assets"),
            background: "sparkly_pink_background".to_string(),
            shapes: [
                "triangle",
                "square",
                "circle",
                "oval",
                "rectangle",
                "pentagon",
                "hexagon",
                "octagon",
                "rhombus",
                "trapezoid",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl GameConfig {
    /// Load from `path` if it exists, otherwise defaults; then apply the
    /// environment override
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        if let Some(root) = std::env::var_os(ASSETS_ENV) {
            config.asset_root = PathBuf::from(root);
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Validated shape names, in order; names identify shapes, so each appears once
    pub fn shape_names(&self) -> Result<Vec<ShapeName>, ConfigError> {
        if self.shapes.is_empty() {
            return Err(ConfigError::NoShapes);
        }
        let mut seen = HashSet::new();
        self.shapes
            .iter()
            .map(|s| {
                if !seen.insert(s.as_str()) {
                    return Err(ConfigError::DuplicateShape(s.clone()));
                }
                Ok(ShapeName::new(s.as_str())?)
            })
            .collect()
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_secs_f32(self.celebration_secs.max(0.0))
    }

    pub fn audio_fallback(&self) -> Duration {
        Duration::from_secs_f32(self.audio_fallback_secs.max(0.0))
    }
}
