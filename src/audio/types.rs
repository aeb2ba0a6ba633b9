//! Audio-related small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

#[derive(Debug)]
pub enum AudioCmd {
    /// Start playing the playlist entry at the given position.
    Play(usize),
    /// Stop playback immediately.
    Stop,
    /// Toggle pause/resume.
    TogglePause,
    /// Skip to the next playlist entry.
    Next,
    /// Go to the previous playlist entry.
    Prev,
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i32),
    /// Set the playback volume (clamped to 0.0..=1.0).
    SetVolume(f32),
    /// Replace the thread's copy of the playlist after a mutation.
    SetPlaylist(Vec<Track>),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
///
/// This is the ephemeral playback state; it is never persisted.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Position of the playing entry in the playlist (if any).
    pub index: Option<usize>,
    /// Id of the playing track, used to re-resolve `index` across playlist edits.
    pub track_id: Option<String>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total duration of the current track, when known.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Current volume in 0.0..=1.0.
    pub volume: f32,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            track_id: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            volume: 1.0,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
