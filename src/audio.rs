//! Audio playback subsystem.
//!
//! A dedicated thread owns the output stream and the single active sink;
//! the rest of the app talks to it through `AudioCmd` messages and reads
//! progress back through the shared `PlaybackInfo` handle. Every decoded
//! source is tapped so the visualizer can see the samples being played.

mod player;
mod sink;
mod tap;
mod thread;
mod types;

pub use player::*;
pub use tap::*;
pub use types::*;
