// src/config.rs

//! Configuration for the render view.
//!
//! Deserialized from JSON with every field optional; defaults match the
//! behavior of the stock view (persistent surface strategy, white
//! placeholder background, media-overlay z-order). `CONFIG` is the lazily
//! initialized default used when the embedder supplies nothing.

use crate::color::Color;
use crate::surface::CompositingStrategy;
use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Lazily initialized default configuration.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Complete configuration, grouped into view behavior and platform
/// workarounds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub view: ViewConfig,
    pub workarounds: WorkaroundConfig,
}

impl Config {
    /// Parses a configuration from a JSON document. Missing fields take
    /// their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Config> {
        serde_json::from_str(json).context("Failed to parse render-view configuration")
    }
}

/// Settings for the view and its surface provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Which surface strategy backs the controller.
    pub strategy: CompositingStrategy,
    /// Placeholder background painted until the first frame is swapped.
    pub background: Color,
    /// Request media-overlay z-order for the persistent surface at
    /// construction.
    pub media_overlay: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            strategy: CompositingStrategy::PersistentSurface,
            background: Color::WHITE,
            media_overlay: true,
        }
    }
}

/// Toggles for defensive workarounds against known platform bugs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkaroundConfig {
    /// Re-assert the surface container's visibility after surface
    /// creation. Some platform versions skip the relayout that follows
    /// surface creation, leaving content hidden until the visibility is
    /// poked again.
    pub reassert_visibility_on_create: bool,
}

impl Default for WorkaroundConfig {
    fn default() -> Self {
        WorkaroundConfig {
            reassert_visibility_on_create: true,
        }
    }
}
