//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! The helper encapsulates opening/decoding a file, wrapping the source in
//! the visualizer tap and preparing a paused `Sink` at the requested start
//! position. Open/decode failures are reported, not fatal: the player keeps
//! running and skips the track.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

use crate::library::Track;

use super::tap::{Monitored, TapHandle};

#[derive(Debug, Error)]
pub(super) enum SinkError {
    #[error("failed to open {0}: {1}")]
    Open(String, String),

    #[error("failed to decode {0}: {1}")]
    Decode(String, String),
}

/// Create a paused `Sink` for `track` that starts playback at `start_at`,
/// with its samples mirrored into `tap`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    track: &Track,
    start_at: Duration,
    tap: &TapHandle,
) -> Result<Sink, SinkError> {
    let file = File::open(&track.path)
        .map_err(|e| SinkError::Open(track.path.display().to_string(), e.to_string()))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| SinkError::Decode(track.path.display().to_string(), e.to_string()))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(Monitored::new(source, tap.clone()));
    sink.pause();
    Ok(sink)
}
