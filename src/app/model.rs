//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct holds the playlist as the UI sees it, the cursor, the
//! playback flags mirrored from the audio thread and the transient status
//! message used to surface non-fatal errors.

use crate::audio::PlaybackHandle;
use crate::library::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    /// UI-side mirror of the audio thread's volume.
    pub volume: f32,
    pub show_visualizer: bool,

    /// Set after any playlist mutation; drives autosave and the audio
    /// thread resync.
    pub playlist_dirty: bool,

    /// Typed-path input mode for adding files.
    pub input_mode: bool,
    pub input_buffer: String,

    /// Transient message shown in the status box (import errors and such).
    pub status: Option<String>,
}

impl App {
    /// Create a new `App` with the provided playlist.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            volume: 1.0,
            show_visualizer: true,
            playlist_dirty: false,
            input_mode: false,
            input_buffer: String::new(),
            status: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Mark the playlist as changed (needs saving and audio resync).
    pub fn mark_playlist_dirty(&mut self) {
        self.playlist_dirty = true;
    }
    /// Clear the "playlist dirty" flag.
    pub fn clear_playlist_dirty(&mut self) {
        self.playlist_dirty = false;
    }

    /// Set the selected entry, clamped to the playlist bounds.
    pub fn set_selected(&mut self, idx: usize) {
        if self.tracks.is_empty() {
            self.selected = 0;
        } else {
            self.selected = idx.min(self.tracks.len() - 1);
        }
    }

    /// Move the cursor to the next entry, wrapping around.
    pub fn next(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor to the previous entry, wrapping around.
    pub fn prev(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = if self.selected == 0 {
                self.tracks.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Append imported tracks and mark the playlist dirty.
    pub fn add_tracks(&mut self, added: Vec<Track>) {
        if added.is_empty() {
            return;
        }
        self.tracks.extend(added);
        self.mark_playlist_dirty();
    }

    /// Remove the selected entry, returning it. Keeps the cursor in bounds.
    pub fn remove_selected(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let removed = self.tracks.remove(self.selected);
        if self.selected >= self.tracks.len() && self.selected > 0 {
            self.selected -= 1;
        }
        self.mark_playlist_dirty();
        Some(removed)
    }

    /// Index of the entry currently loaded in the audio thread, if any.
    pub fn playing_index(&self) -> Option<usize> {
        self.playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().and_then(|info| info.index))
    }

    pub fn toggle_visualizer(&mut self) {
        self.show_visualizer = !self.show_visualizer;
    }

    /// Nudge the volume, clamped to 0.0..=1.0. Returns the new value.
    pub fn adjust_volume(&mut self, delta: f32) -> f32 {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        self.volume
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Enter add-path input mode.
    pub fn enter_input_mode(&mut self) {
        self.input_mode = true;
        self.input_buffer.clear();
        self.clear_status();
    }
    /// Leave input mode, discarding the buffer.
    pub fn cancel_input_mode(&mut self) {
        self.input_mode = false;
        self.input_buffer.clear();
    }
    /// Leave input mode and hand back the typed path.
    pub fn take_input(&mut self) -> String {
        self.input_mode = false;
        std::mem::take(&mut self.input_buffer)
    }
    pub fn push_input_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }
    pub fn pop_input_char(&mut self) {
        self.input_buffer.pop();
    }
}
