//! The `Track` type and its identifier.
//!
//! Tracks are the unit the playlist stores and the audio thread plays. The
//! id is minted once at import time and survives playlist persistence, so
//! the audio thread can re-resolve "what is playing" after the list mutates.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A single playlist entry backed by an MP3 file on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier minted at import time.
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub path: PathBuf,
    /// File size recorded during validation.
    pub size_bytes: u64,
    pub duration: Option<Duration>,
    /// Precomputed "Artist - Title" line used by the list view.
    pub display: String,
}

/// Mint a new track id: unix milliseconds plus a random suffix.
pub fn new_track_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("{}-{:08x}", millis, rand::random::<u32>())
}

pub(super) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
