//! User settings
//!
//! Stored as JSON next to the binary. A missing or unreadable file is never
//! fatal: the game falls back to defaults and says so in the log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level files, played in order
    pub levels: Vec<PathBuf>,

    // === Debug ===
    /// Start with the tile grid overlay visible
    pub show_grid: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Headless runner ===
    /// Seed for the demo pilot
    pub demo_seed: u64,
    /// Stop after this many ticks (0 = no limit)
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: (1..=3)
                .map(|n| PathBuf::from(format!("assets/levels/world-{n}.json")))
                .collect(),

            show_grid: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            demo_seed: 0x5eed,
            max_ticks: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
