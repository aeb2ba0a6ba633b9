//! The playlist store.
//!
//! The whole playlist is serialized verbatim as a JSON array into a single
//! file, `$XDG_DATA_HOME/tremolo/playlist.json` by default. Loads are
//! tolerant: a missing or corrupt file yields an empty playlist, and entries
//! whose backing file disappeared are dropped with a warning. The player
//! keeps running either way.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::PlaylistSettings;
use crate::library::Track;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("playlist I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("playlist serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Compute the data directory under `$XDG_DATA_HOME/tremolo` or
/// `~/.local/share/tremolo` when `XDG_DATA_HOME` is not set.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("tremolo"))
}

/// Resolve the playlist file path from settings or the XDG default.
pub fn resolve_playlist_path(settings: &PlaylistSettings) -> Option<PathBuf> {
    if let Some(p) = &settings.path {
        return Some(p.clone());
    }
    default_data_dir().map(|d| d.join("playlist.json"))
}

pub struct PlaylistStore {
    path: Option<PathBuf>,
}

impl PlaylistStore {
    pub fn open(settings: &PlaylistSettings) -> Self {
        let path = resolve_playlist_path(settings);
        if path.is_none() {
            log::warn!("no home directory found, playlist will not persist");
        }
        Self { path }
    }

    /// Build a store bound to an explicit file path.
    pub fn at(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the persisted playlist. Never fails: problems degrade to an
    /// empty (or shortened) list and a log entry.
    pub fn load(&self) -> Vec<Track> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to read playlist {}: {e}", path.display());
                return Vec::new();
            }
        };

        let tracks: Vec<Track> = match serde_json::from_str(&content) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("corrupt playlist {}: {e}", path.display());
                return Vec::new();
            }
        };

        // Files can vanish between sessions; keep only what still exists.
        let mut kept = Vec::with_capacity(tracks.len());
        for track in tracks {
            if track.path.is_file() {
                kept.push(track);
            } else {
                log::warn!("dropping missing file from playlist: {}", track.path.display());
            }
        }
        kept
    }

    /// Write the playlist back as a single JSON blob.
    pub fn save(&self, tracks: &[Track]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tracks)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
