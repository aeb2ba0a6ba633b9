use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tremolo/config.toml` or `~/.config/tremolo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TREMOLO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub viz: VizSettings,
    pub playlist: PlaylistSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume the player starts with (0.0..=1.0).
    pub default_volume: f32,
    /// Volume change per key press.
    pub volume_step: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 1.0,
            volume_step: 0.05,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Whether the spectrum pane starts visible.
    pub show_visualizer: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tremolo ~ ".to_string(),
            show_visualizer: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizSettings {
    /// Smoothing time constant of the spectrum analyser (0.0..1.0).
    /// Higher values make the bars lazier.
    pub smoothing: f32,
}

impl Default for VizSettings {
    fn default() -> Self {
        Self {
            smoothing: crate::viz::DEFAULT_SMOOTHING,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Whether playlist mutations are written back to disk immediately.
    pub autosave: bool,
    /// Optional override for the playlist file location.
    pub path: Option<PathBuf>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            autosave: true,
            path: None,
        }
    }
}
