//! Visualizer configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file in the
//! platform config directory, then environment variables (a `.env` file is
//! honoured).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// Environment variable overriding [`VisualizerConfig::step_interval_ms`].
pub const ENV_STEP_MS: &str = "GRAPHWALK_STEP_MS";
/// Environment variable overriding [`VisualizerConfig::vertex_diameter`].
pub const ENV_VERTEX_DIAMETER: &str = "GRAPHWALK_VERTEX_DIAMETER";
/// Environment variable overriding [`VisualizerConfig::animate_shortest_path_tree`].
pub const ENV_ANIMATE_DIJKSTRA: &str = "GRAPHWALK_ANIMATE_DIJKSTRA";

/// Configuration for algorithm playback and canvas hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Delay between two animation steps, in milliseconds.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Diameter of a vertex disc on the canvas.
    #[serde(default = "default_vertex_diameter")]
    pub vertex_diameter: f32,

    /// Side of the square hit box around a connection midpoint.
    #[serde(default = "default_edge_hit_size")]
    pub edge_hit_size: i32,

    /// Replay the shortest-path tree for Dijkstra instead of showing only
    /// the final distances.
    #[serde(default)]
    pub animate_shortest_path_tree: bool,
}

fn default_step_interval_ms() -> u64 {
    700
}

fn default_vertex_diameter() -> f32 {
    50.0
}

fn default_edge_hit_size() -> i32 {
    20
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            vertex_diameter: default_vertex_diameter(),
            edge_hit_size: default_edge_hit_size(),
            animate_shortest_path_tree: false,
        }
    }
}

impl VisualizerConfig {
    /// Create a config for quick playback (tests, demos).
    pub fn fast() -> Self {
        Self {
            step_interval_ms: 10,
            ..Default::default()
        }
    }

    /// Playback interval as a `Duration`.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// Load from the config file (if present) and the environment.
    pub fn load() -> EngineResult<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from an explicit JSON file, without environment overrides.
    pub fn load_from(path: &Path) -> EngineResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let config = Self::from_json(&contents)?;
        debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Unparseable values are
    /// ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_STEP_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.step_interval_ms = ms,
                Err(_) => warn!(var = ENV_STEP_MS, value = %raw, "config_env_ignored"),
            }
        }
        if let Some(raw) = lookup(ENV_VERTEX_DIAMETER) {
            match raw.trim().parse::<f32>() {
                Ok(d) if d > 0.0 => self.vertex_diameter = d,
                _ => warn!(var = ENV_VERTEX_DIAMETER, value = %raw, "config_env_ignored"),
            }
        }
        if let Some(raw) = lookup(ENV_ANIMATE_DIJKSTRA) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.animate_shortest_path_tree = true,
                "0" | "false" | "no" | "off" => self.animate_shortest_path_tree = false,
                _ => warn!(var = ENV_ANIMATE_DIJKSTRA, value = %raw, "config_env_ignored"),
            }
        }
    }

    /// Save to the platform config file.
    pub fn save(&self) -> EngineResult<()> {
        let path = Self::config_file_path().ok_or_else(|| EngineError::Config {
            message: "no platform config directory available".to_string(),
        })?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), "config_saved");
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "graphwalk", "graphwalk")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
