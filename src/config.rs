/// Application configuration
///
/// Every setting has a built-in default. An optional JSON file can override
/// any subset of them:
/// - Linux: ~/.config/character-gallery/config.json
/// - macOS: ~/Library/Application Support/character-gallery/config.json
/// - Windows: %APPDATA%\character-gallery\config.json
///
/// A missing or broken file is never fatal; the defaults are used instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Remote endpoint serving `{ "characters": [...] }`
pub const DEFAULT_ENDPOINT: &str = "https://harry-potter-api-ebon.vercel.app/characters";

/// Settings for the gallery window, the fetch and the card layout
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    // ========== Data Loader ==========

    /// URL of the character collection
    pub endpoint: String,

    // ========== Visibility ==========

    /// Fraction of a card (0.0 to 1.0) that must be inside the viewport
    /// before it counts as intersecting
    pub visibility_threshold: f32,

    /// Pixels added around the viewport before intersecting (0 = none)
    pub root_margin: f32,

    /// Duration of a full fade in or out, in milliseconds
    pub fade_duration_ms: u64,

    // ========== Layout ==========

    pub card_width: f32,
    pub card_image_height: f32,
    pub card_details_height: f32,
    /// Gap between neighbouring cards, horizontally and vertically
    pub card_spacing: f32,
    pub detail_width: f32,
    pub detail_image_height: f32,

    // ========== Window ==========

    pub window_width: f32,
    pub window_height: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            visibility_threshold: 0.5,
            root_margin: 0.0,
            fade_duration_ms: 500,
            card_width: 300.0,
            card_image_height: 500.0,
            card_details_height: 330.0,
            card_spacing: 40.0,
            detail_width: 600.0,
            detail_image_height: 800.0,
            window_width: 1280.0,
            window_height: 900.0,
        }
    }
}

impl GalleryConfig {
    /// Load the configuration from the user's config directory.
    ///
    /// Falls back to defaults when the file is absent or unusable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::debug!("No config directory on this platform, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the path where the config file is looked up
    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("character-gallery");
        path.push("config.json");
        Some(path)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse from a JSON string, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp every value into a usable range
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.visibility_threshold = if self.visibility_threshold.is_finite() {
            self.visibility_threshold.clamp(0.0, 1.0)
        } else {
            defaults.visibility_threshold
        };
        if !self.root_margin.is_finite() {
            self.root_margin = defaults.root_margin;
        }

        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        self.card_width = positive(self.card_width, defaults.card_width);
        self.card_image_height = positive(self.card_image_height, defaults.card_image_height);
        self.card_details_height = positive(self.card_details_height, defaults.card_details_height);
        self.detail_width = positive(self.detail_width, defaults.detail_width);
        self.detail_image_height = positive(self.detail_image_height, defaults.detail_image_height);
        self.window_width = positive(self.window_width, defaults.window_width);
        self.window_height = positive(self.window_height, defaults.window_height);
        self.card_spacing = if self.card_spacing.is_finite() {
            self.card_spacing.max(0.0)
        } else {
            defaults.card_spacing
        };

        if self.endpoint.trim().is_empty() {
            self.endpoint = defaults.endpoint;
        }

        self
    }

    /// Total height of one grid card
    pub fn card_height(&self) -> f32 {
        self.card_image_height + self.card_details_height
    }
}
